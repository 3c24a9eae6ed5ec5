//! The decorated string service and its endpoints.
//!
//! 1. **Metrics** (`metrics`): Aggregator the instrumenting decorator records into
//! 2. **Middleware** (`middleware`): Logging and instrumenting decorators
//! 3. **Endpoints** (`endpoint`): One typed request -> response adapter per operation

pub mod config;
pub mod endpoint;
pub mod metrics;
pub mod middleware;

pub use config::MetricsConfig;
pub use endpoint::{make_count_endpoint, make_uppercase_endpoint, CountEndpoint, UppercaseEndpoint};
pub use metrics::ServiceMetrics;
pub use middleware::build_service_pipeline;
