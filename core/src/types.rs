//! The vehicle record and its wire representations.
//!
//! # Design
//! `Vehicle` is immutable once built: fields are private and only exposed
//! through accessors. There is exactly one way to turn service JSON into a
//! `Vehicle`, `Vehicle::from_record`, and it owns the default-substitution
//! policy: absent or `null` fields become `"unknown"` for strings and 0 for
//! numbers. These types are defined independently from the mock-server crate;
//! integration tests catch any schema drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::geo::Coordinates;

const UNKNOWN: &str = "unknown";

/// A single vehicle as known to the inventory service.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: u64,
    name: String,
    model: String,
    year: i64,
    color: String,
    price: i64,
    latitude: f64,
    longitude: f64,
}

/// Request payload for creating or updating a vehicle: every field but `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProps {
    pub name: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Loosely-typed view of a vehicle object as it arrives from the service.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VehicleRecord {
    id: Option<u64>,
    name: Option<String>,
    model: Option<String>,
    year: Option<i64>,
    color: Option<String>,
    price: Option<i64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Vehicle {
    /// Build a vehicle that has not been assigned an id yet (`id == 0`).
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        year: i64,
        color: impl Into<String>,
        price: i64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            model: model.into(),
            year,
            color: color.into(),
            price,
            latitude,
            longitude,
        }
    }

    /// Same vehicle, carrying `id`. Used to address updates.
    pub fn with_id(self, id: u64) -> Self {
        Self { id, ..self }
    }

    pub fn from_props(props: VehicleProps) -> Self {
        Self::new(
            props.name,
            props.model,
            props.year,
            props.color,
            props.price,
            props.latitude,
            props.longitude,
        )
    }

    /// Map a JSON object from the service into a `Vehicle`.
    ///
    /// Missing and `null` fields fall back to `"unknown"` / 0. A field that is
    /// present with the wrong JSON type, or a value that is not an object,
    /// is a `Deserialization` error.
    pub fn from_record(record: &Value) -> Result<Self, ApiError> {
        let record = VehicleRecord::deserialize(record)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(Self {
            id: record.id.unwrap_or(0),
            name: record.name.unwrap_or_else(|| UNKNOWN.to_string()),
            model: record.model.unwrap_or_else(|| UNKNOWN.to_string()),
            year: record.year.unwrap_or(0),
            color: record.color.unwrap_or_else(|| UNKNOWN.to_string()),
            price: record.price.unwrap_or(0),
            latitude: record.latitude.unwrap_or(0.0),
            longitude: record.longitude.unwrap_or(0.0),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Everything except the id, as sent in create and update bodies.
    pub fn props(&self) -> VehicleProps {
        VehicleProps {
            name: self.name.clone(),
            model: self.model.clone(),
            year: self.year,
            color: self.color.clone(),
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Vehicle: {} {} {} {} {}>",
            self.name, self.model, self.year, self.color, self.price
        )
    }
}
