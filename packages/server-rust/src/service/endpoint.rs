//! Endpoint adapters: one typed `tower::Service` per operation.
//!
//! Each endpoint turns its operation's request into a call on the decorated
//! service and folds the result into the operation's response. Business
//! errors become response data, so the endpoint itself never fails.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future::{ready, Ready};
use stringsvc_core::{
    CountRequest, CountResponse, StringService, UppercaseRequest, UppercaseResponse,
};
use tower::Service;

/// Endpoint for `uppercase`.
#[derive(Clone)]
pub struct UppercaseEndpoint {
    svc: Arc<dyn StringService>,
}

impl Service<UppercaseRequest> for UppercaseEndpoint {
    type Response = UppercaseResponse;
    type Error = Infallible;
    type Future = Ready<Result<UppercaseResponse, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: UppercaseRequest) -> Self::Future {
        ready(Ok(UppercaseResponse::from_result(self.svc.uppercase(&req.s))))
    }
}

/// Endpoint for `count`.
#[derive(Clone)]
pub struct CountEndpoint {
    svc: Arc<dyn StringService>,
}

impl Service<CountRequest> for CountEndpoint {
    type Response = CountResponse;
    type Error = Infallible;
    type Future = Ready<Result<CountResponse, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: CountRequest) -> Self::Future {
        ready(Ok(CountResponse {
            v: self.svc.count(&req.s),
        }))
    }
}

/// Creates the `uppercase` endpoint backed by `svc`.
#[must_use]
pub fn make_uppercase_endpoint(svc: Arc<dyn StringService>) -> UppercaseEndpoint {
    UppercaseEndpoint { svc }
}

/// Creates the `count` endpoint backed by `svc`.
#[must_use]
pub fn make_count_endpoint(svc: Arc<dyn StringService>) -> CountEndpoint {
    CountEndpoint { svc }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
