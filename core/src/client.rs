//! Stateless HTTP request builder and response parser for the vehicle API.
//!
//! # Design
//! `VehicleClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Executing the round-trip is left to a `Transport`.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Vehicle;

/// Synchronous, stateless client for the vehicle API.
#[derive(Debug, Clone)]
pub struct VehicleClient {
    base_url: String,
}

impl VehicleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_vehicles(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/vehicles", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_vehicle(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/vehicles/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_vehicle(&self, vehicle: &Vehicle) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/vehicles", self.base_url),
            headers: json_headers(),
            body: Some(props_body(vehicle)?),
        })
    }

    /// The target id is taken from `vehicle.id()`.
    pub fn build_update_vehicle(&self, vehicle: &Vehicle) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/vehicles/{}", self.base_url, vehicle.id()),
            headers: json_headers(),
            body: Some(props_body(vehicle)?),
        })
    }

    pub fn build_delete_vehicle(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/vehicles/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Raw JSON objects of a list response, for callers that match on fields
    /// before converting.
    pub fn parse_list_records(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        check_status(&response, HttpMethod::Get, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_list_vehicles(&self, response: HttpResponse) -> Result<Vec<Vehicle>, ApiError> {
        self.parse_list_records(response)?
            .iter()
            .map(Vehicle::from_record)
            .collect()
    }

    pub fn parse_get_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, HttpMethod::Get, 200)?;
        parse_vehicle(&response.body)
    }

    pub fn parse_create_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, HttpMethod::Post, 201)?;
        parse_vehicle(&response.body)
    }

    pub fn parse_update_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, HttpMethod::Put, 200)?;
        parse_vehicle(&response.body)
    }

    pub fn parse_delete_vehicle(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, HttpMethod::Delete, 204)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn props_body(vehicle: &Vehicle) -> Result<String, ApiError> {
    serde_json::to_string(&vehicle.props()).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn parse_vehicle(body: &str) -> Result<Vehicle, ApiError> {
    let record: Value =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Vehicle::from_record(&record)
}

/// Anything but the expected status is reported the same way.
fn check_status(response: &HttpResponse, method: HttpMethod, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    log::warn!("{method} returned {} (expected {expected})", response.status);
    Err(ApiError::UnexpectedStatus {
        method,
        status: response.status,
        body: response.body.clone(),
    })
}
