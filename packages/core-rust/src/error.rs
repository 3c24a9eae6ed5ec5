//! Business-level errors returned by [`StringService`](crate::StringService) operations.

/// Errors a string service operation can report to its caller.
///
/// These travel as ordinary return data through every decorator and end up
/// embedded in the response body; they never fail the transport call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// `uppercase` was called with an empty string.
    #[error("empty string")]
    EmptyInput,
}
