//! String service core: the service contract, its base implementation, and
//! the typed request/response schemas shared by every transport.

pub mod error;
pub mod messages;
pub mod service;

pub use error::ServiceError;
pub use messages::{CountRequest, CountResponse, Failer, UppercaseRequest, UppercaseResponse};
pub use service::{BasicStringService, Method, StringService};
