//! String service server: decorated service pipeline, endpoint adapters,
//! HTTP transport, and metrics exposition.

pub mod cli;
pub mod network;
pub mod service;

pub use network::{NetworkConfig, NetworkModule};
pub use service::{build_service_pipeline, MetricsConfig, ServiceMetrics};
