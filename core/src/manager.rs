//! High-level vehicle operations over a `Transport`.
//!
//! # Design
//! `VehicleManager` strings together `VehicleClient` builds, transport
//! round-trips and parses. Requests are issued strictly one after another.
//! Nothing is printed here; every outcome is returned to the caller.

use serde_json::{Map, Value};

use crate::client::VehicleClient;
use crate::error::ApiError;
use crate::geo::{self, Coordinates};
use crate::http::Transport;
use crate::types::Vehicle;

/// Result of `VehicleManager::get_nearest_vehicle`.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestVehicle {
    /// The closest vehicle, as returned by its own GET.
    pub vehicle: Vehicle,
    /// Distance from the target in meters.
    pub distance: f64,
}

pub struct VehicleManager<T> {
    client: VehicleClient,
    transport: T,
}

impl<T: Transport> VehicleManager<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: VehicleClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &VehicleClient {
        &self.client
    }

    /// Haversine distance in meters between two coordinate pairs.
    pub fn calculate_distance(from: Coordinates, to: Coordinates) -> f64 {
        geo::haversine_distance(from, to)
    }

    pub fn get_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        let response = self.transport.execute(self.client.build_list_vehicles())?;
        self.client.parse_list_vehicles(response)
    }

    /// Vehicles whose raw record has every `params` key equal to the given
    /// value. A record missing one of the keys does not match.
    pub fn filter_vehicles(&self, params: &Map<String, Value>) -> Result<Vec<Vehicle>, ApiError> {
        let response = self.transport.execute(self.client.build_list_vehicles())?;
        let records = self.client.parse_list_records(response)?;
        let total = records.len();
        let matched = records
            .iter()
            .filter(|record| matches_all(record, params))
            .map(Vehicle::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("filter kept {} of {total} vehicles", matched.len());
        Ok(matched)
    }

    pub fn get_vehicle(&self, id: u64) -> Result<Vehicle, ApiError> {
        let response = self.transport.execute(self.client.build_get_vehicle(id))?;
        self.client.parse_get_vehicle(response)
    }

    /// Returns the record the server created, carrying its assigned id.
    pub fn add_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, ApiError> {
        let request = self.client.build_create_vehicle(vehicle)?;
        let response = self.transport.execute(request)?;
        self.client.parse_create_vehicle(response)
    }

    pub fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, ApiError> {
        let request = self.client.build_update_vehicle(vehicle)?;
        let response = self.transport.execute(request)?;
        self.client.parse_update_vehicle(response)
    }

    pub fn delete_vehicle(&self, id: u64) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_vehicle(id))?;
        self.client.parse_delete_vehicle(response)?;
        log::debug!("deleted vehicle {id}");
        Ok(())
    }

    /// Distance in meters between two vehicles. Both lookups are sent before
    /// either is checked; `id1`'s failure is reported first.
    pub fn get_distance(&self, id1: u64, id2: u64) -> Result<f64, ApiError> {
        let first = self.transport.execute(self.client.build_get_vehicle(id1))?;
        let second = self.transport.execute(self.client.build_get_vehicle(id2))?;

        let first = self.client.parse_get_vehicle(first)?;
        let second = self.client.parse_get_vehicle(second)?;
        Ok(Self::calculate_distance(first.coordinates(), second.coordinates()))
    }

    /// Closest other vehicle to `id`, fetched with its own GET.
    ///
    /// `Ok(None)` means the list held no vehicle besides the target, in which
    /// case no third request is made.
    pub fn get_nearest_vehicle(&self, id: u64) -> Result<Option<NearestVehicle>, ApiError> {
        let target = self.transport.execute(self.client.build_get_vehicle(id))?;
        let list = self.transport.execute(self.client.build_list_vehicles())?;

        let target = self.client.parse_get_vehicle(target)?;
        let vehicles = self.client.parse_list_vehicles(list)?;

        let Some((closest, distance)) = geo::nearest(&target, &vehicles) else {
            log::debug!("no candidates near vehicle {id} among {} vehicles", vehicles.len());
            return Ok(None);
        };
        log::debug!("vehicle {} is closest to {id} at {distance:.1} m", closest.id());

        let response = self.transport.execute(self.client.build_get_vehicle(closest.id()))?;
        let vehicle = self.client.parse_get_vehicle(response)?;
        Ok(Some(NearestVehicle { vehicle, distance }))
    }
}

fn matches_all(record: &Value, params: &Map<String, Value>) -> bool {
    params.iter().all(|(key, expected)| {
        record
            .get(key)
            .is_some_and(|actual| values_equal(actual, expected))
    })
}

/// Structural equality, except that numbers compare by value: `55 == 55.0`.
fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            a.as_f64() == b.as_f64()
        }
        _ => actual == expected,
    }
}
