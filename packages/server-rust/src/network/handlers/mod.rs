//! HTTP handler definitions for the string service.
//!
//! Defines `AppState` (the shared state carried through axum extractors)
//! and re-exports every handler for router assembly.

pub mod health;
pub mod metrics;
pub mod string_ops;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use metrics::metrics_handler;
pub use string_ops::{count_handler, uppercase_handler};

use std::sync::Arc;
use std::time::Instant;

use super::transport::{CountBinding, UppercaseBinding};
use super::ShutdownController;
use crate::service::ServiceMetrics;

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Transport binding for `POST /uppercase`.
    pub uppercase: UppercaseBinding,
    /// Transport binding for `POST /count`.
    pub count: CountBinding,
    /// Aggregator rendered by `GET /metrics`.
    pub metrics: Arc<ServiceMetrics>,
    /// Health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}
