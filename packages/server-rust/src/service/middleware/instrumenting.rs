//! Instrumenting middleware for the string service.
//!
//! Counts calls by method and outcome, observes latency, and for `count`
//! also observes the returned value. Recording happens in a drop guard so it
//! runs exactly once per call on every exit path.

use std::sync::Arc;
use std::time::Instant;

use stringsvc_core::{Method, ServiceError, StringService};
use tower::Layer;

use crate::service::metrics::ServiceMetrics;

// ---------------------------------------------------------------------------
// InstrumentingLayer
// ---------------------------------------------------------------------------

/// Layer that wraps a service in [`InstrumentingMiddleware`] recording into
/// the given aggregator.
#[derive(Debug, Clone)]
pub struct InstrumentingLayer {
    metrics: Arc<ServiceMetrics>,
}

impl InstrumentingLayer {
    #[must_use]
    pub fn new(metrics: Arc<ServiceMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for InstrumentingLayer {
    type Service = InstrumentingMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InstrumentingMiddleware {
            inner,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

// ---------------------------------------------------------------------------
// CallRecord
// ---------------------------------------------------------------------------

/// RAII guard that records one call into the aggregator when dropped.
///
/// Dropped on normal return and during unwinding alike, so a panicking inner
/// service is still counted (as a failure).
struct CallRecord<'a> {
    metrics: &'a ServiceMetrics,
    method: Method,
    start: Instant,
    failed: bool,
}

impl<'a> CallRecord<'a> {
    fn start(metrics: &'a ServiceMetrics, method: Method) -> Self {
        Self {
            metrics,
            method,
            start: Instant::now(),
            failed: true,
        }
    }
}

impl Drop for CallRecord<'_> {
    fn drop(&mut self) {
        self.metrics
            .record_call(self.method, self.failed, self.start.elapsed());
    }
}

// ---------------------------------------------------------------------------
// InstrumentingMiddleware
// ---------------------------------------------------------------------------

/// Service wrapper that records call metrics and returns the inner result untouched.
#[derive(Debug, Clone)]
pub struct InstrumentingMiddleware<S> {
    inner: S,
    metrics: Arc<ServiceMetrics>,
}

impl<S> InstrumentingMiddleware<S> {
    #[must_use]
    pub fn new(inner: S, metrics: Arc<ServiceMetrics>) -> Self {
        Self { inner, metrics }
    }
}

impl<S: StringService> StringService for InstrumentingMiddleware<S> {
    fn uppercase(&self, s: &str) -> Result<String, ServiceError> {
        let mut record = CallRecord::start(&self.metrics, Method::Uppercase);
        let result = self.inner.uppercase(s);
        record.failed = result.is_err();
        result
    }

    fn count(&self, s: &str) -> usize {
        let mut record = CallRecord::start(&self.metrics, Method::Count);
        let n = self.inner.count(s);
        record.failed = false;
        self.metrics.record_count_result(n);
        n
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
