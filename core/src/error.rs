//! Error types for the vehicle API client.
//!
//! # Design
//! The service contract only distinguishes "got the expected success status"
//! from "did not". Every unexpected status therefore lands in a single
//! `UnexpectedStatus` variant whose message names the request method and the
//! status code. The remaining variants cover failures that happen before or
//! after the status check.

use thiserror::Error;

use crate::http::HttpMethod;

/// Errors returned by `VehicleClient` and `VehicleManager`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status other than the expected success code.
    #[error("Could not fulfill {method} request: HTTP code {status}")]
    UnexpectedStatus {
        method: HttpMethod,
        status: u16,
        body: String,
    },

    /// The request did not produce any response (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of an `UnexpectedStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The one-line report for a request that did not return its success status.
pub fn request_failed_message(method: HttpMethod, status: u16) -> String {
    format!("Could not fulfill {method} request: HTTP code {status}")
}
