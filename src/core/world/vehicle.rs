//=========================================================================
// Vehicle
//=========================================================================
//
// Vehicle identity, kind, and transform as known to the game session.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use glam::Vec3;

//=== VehicleId ===========================================================

/// Stable vehicle identity assigned by the scene loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VehicleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

//=== VehicleKind =========================================================

/// Vehicle type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VehicleKind {
    #[default]
    Car,
}

//=== Vehicle =============================================================

/// A vehicle entity owned by the [`VehicleRegistry`](super::VehicleRegistry).
///
/// Other systems refer to a vehicle by its [`VehicleId`] and look it up
/// through the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub kind: VehicleKind,
}

impl Vehicle {
    /// Creates a car at the given transform.
    pub fn new(id: impl Into<VehicleId>, position: Vec3, rotation: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            rotation,
            kind: VehicleKind::Car,
        }
    }

    /// Creates a car at `position` with zero rotation.
    pub fn at(id: impl Into<VehicleId>, position: Vec3) -> Self {
        Self::new(id, position, Vec3::ZERO)
    }

    pub fn with_kind(mut self, kind: VehicleKind) -> Self {
        self.kind = kind;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
