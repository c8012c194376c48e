//=========================================================================
// Vehicle Registry
//=========================================================================
//
// Live set of vehicles known to the game session, in registration order.
//
// Registration order is significant: proximity tie-breaks pick the
// vehicle registered first. Vehicles live in a Vec in that order, with a
// HashMap from id to slot for lookups. Removal shifts later slots down.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec3;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::vehicle::{Vehicle, VehicleId};

//=== VehicleRegistry =====================================================

/// Owns every registered [`Vehicle`], keyed by [`VehicleId`].
#[derive(Debug, Clone, Default)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
    slots: HashMap<VehicleId, usize>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Mutation ---------------------------------------------------------

    /// Adds a vehicle if its id is not already registered.
    ///
    /// Duplicates are ignored (the first registration wins) and return `false`.
    pub fn register(&mut self, vehicle: Vehicle) -> bool {
        if self.contains(&vehicle.id) {
            warn!("Vehicle {} already registered, ignoring duplicate", vehicle.id);
            return false;
        }

        info!("Vehicle registered: {}", vehicle.id);
        self.slots.insert(vehicle.id.clone(), self.vehicles.len());
        self.vehicles.push(vehicle);
        true
    }

    /// Replaces the stored position of a vehicle.
    ///
    /// Returns `false` if no vehicle has that id.
    pub fn update_position(&mut self, id: &VehicleId, position: Vec3) -> bool {
        match self.get_mut(id) {
            Some(vehicle) => {
                vehicle.position = position;
                true
            }
            None => {
                debug!("Position update for unknown vehicle {}", id);
                false
            }
        }
    }

    /// Removes a vehicle, returning it if it was registered.
    pub fn deregister(&mut self, id: &VehicleId) -> Option<Vehicle> {
        let index = self.slots.remove(id)?;
        for slot in self.slots.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        info!("Vehicle deregistered: {}", id);
        Some(self.vehicles.remove(index))
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.slots.get(id).map(|&slot| &self.vehicles[slot])
    }

    pub fn contains(&self, id: &VehicleId) -> bool {
        self.slots.contains_key(id)
    }

    /// Iterates vehicles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn get_mut(&mut self, id: &VehicleId) -> Option<&mut Vehicle> {
        let slot = *self.slots.get(id)?;
        self.vehicles.get_mut(slot)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
