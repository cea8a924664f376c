//! Synchronous API client core for the vehicle inventory service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `VehicleManager` layers the
//! multi-request operations (distance, nearest vehicle) on top, executing
//! requests through any `Transport` the host provides.
//!
//! # Design
//! - `VehicleClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `Vehicle::from_record` is the single place service JSON becomes a
//!   `Vehicle`, applying the documented defaults.
//! - Every failure comes back as an `ApiError`; nothing here prints.

pub mod client;
pub mod error;
pub mod geo;
pub mod http;
pub mod manager;
pub mod types;

pub use client::VehicleClient;
pub use error::{request_failed_message, ApiError};
pub use geo::{haversine_distance, Coordinates, EARTH_RADIUS_METERS};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use manager::{NearestVehicle, VehicleManager};
pub use types::{Vehicle, VehicleProps};
