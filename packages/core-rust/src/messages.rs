//! Request and response bodies for each service operation.
//!
//! These are plain data: created per call, serialized by the transport, then
//! dropped. Field names are the lower-case wire names (`s`, `v`, `err`).

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Implemented by responses that can carry a business-level failure.
///
/// The transport inspects this to choose the wire status while still
/// sending the full body.
pub trait Failer {
    /// The failure message, if the operation failed.
    fn failed(&self) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// Uppercase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UppercaseRequest {
    pub s: String,
}

/// Result of `uppercase`. `err` is serialized as `null` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UppercaseResponse {
    pub v: String,
    pub err: Option<String>,
}

impl UppercaseResponse {
    /// Folds a service result into a response body.
    ///
    /// On error `v` is the empty string and `err` holds the error message.
    #[must_use]
    pub fn from_result(result: Result<String, ServiceError>) -> Self {
        match result {
            Ok(v) => Self { v, err: None },
            Err(e) => Self {
                v: String::new(),
                err: Some(e.to_string()),
            },
        }
    }
}

impl Failer for UppercaseResponse {
    fn failed(&self) -> Option<&str> {
        self.err.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Count
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRequest {
    pub s: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub v: usize,
}

impl Failer for CountResponse {
    fn failed(&self) -> Option<&str> {
        None
    }
}
