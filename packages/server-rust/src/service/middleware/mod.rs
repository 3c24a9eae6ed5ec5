//! Decorators layered around the string service.
//!
//! - [`logging`]: One structured log line per call
//! - [`instrumenting`]: Call counts, latency, and `count` result distributions
//! - [`pipeline`]: Composes both around the base service

pub mod instrumenting;
pub mod logging;
pub mod pipeline;

pub use instrumenting::{InstrumentingLayer, InstrumentingMiddleware};
pub use logging::{LoggingLayer, LoggingMiddleware};
pub use pipeline::build_service_pipeline;
