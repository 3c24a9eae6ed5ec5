//! The string service contract and its base implementation.
//!
//! [`StringService`] is the capability set every link of the decorator chain
//! implements: the base service computes, decorators observe and delegate.

use std::fmt;
use std::sync::Arc;

use crate::error::ServiceError;

/// Business operations exposed by the string service.
///
/// Implementations must be safe to call concurrently from many callers;
/// the methods take `&self` and are synchronous.
pub trait StringService: Send + Sync {
    /// Returns `s` mapped to upper case.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::EmptyInput`] when `s` is empty.
    fn uppercase(&self, s: &str) -> Result<String, ServiceError>;

    /// Returns the number of characters (Unicode scalar values) in `s`.
    fn count(&self, s: &str) -> usize;
}

impl<S: StringService + ?Sized> StringService for &S {
    fn uppercase(&self, s: &str) -> Result<String, ServiceError> {
        (**self).uppercase(s)
    }

    fn count(&self, s: &str) -> usize {
        (**self).count(s)
    }
}

impl<S: StringService + ?Sized> StringService for Box<S> {
    fn uppercase(&self, s: &str) -> Result<String, ServiceError> {
        (**self).uppercase(s)
    }

    fn count(&self, s: &str) -> usize {
        (**self).count(s)
    }
}

impl<S: StringService + ?Sized> StringService for Arc<S> {
    fn uppercase(&self, s: &str) -> Result<String, ServiceError> {
        (**self).uppercase(s)
    }

    fn count(&self, s: &str) -> usize {
        (**self).count(s)
    }
}

/// The innermost link of every chain: pure computation, no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStringService;

impl StringService for BasicStringService {
    fn uppercase(&self, s: &str) -> Result<String, ServiceError> {
        if s.is_empty() {
            return Err(ServiceError::EmptyInput);
        }
        Ok(s.to_uppercase())
    }

    fn count(&self, s: &str) -> usize {
        s.chars().count()
    }
}

/// Identifies a service operation in logs, metric labels, and routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Uppercase,
    Count,
}

impl Method {
    /// Every operation, in declaration order.
    pub const ALL: [Method; 2] = [Method::Uppercase, Method::Count];

    /// Stable lower-case label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
