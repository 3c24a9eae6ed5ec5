//! Pipeline composition: wraps the base service in the decorator chain.

use std::sync::Arc;

use stringsvc_core::StringService;
use tower::ServiceBuilder;

use super::instrumenting::InstrumentingLayer;
use super::logging::LoggingLayer;
use crate::service::metrics::ServiceMetrics;

/// Builds the decorated service shared by every endpoint.
///
/// Layer order (outermost to innermost):
/// 1. `InstrumentingLayer` -- counts and times the call, including logging cost
/// 2. `LoggingLayer` -- one log line per call
/// 3. `base` -- the business logic
#[must_use]
pub fn build_service_pipeline<S>(base: S, metrics: Arc<ServiceMetrics>) -> Arc<dyn StringService>
where
    S: StringService + 'static,
{
    let svc = ServiceBuilder::new()
        .layer(InstrumentingLayer::new(metrics))
        .layer(LoggingLayer)
        .service(base);
    Arc::new(svc)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use stringsvc_core::BasicStringService;

    use super::*;
    use crate::service::metrics::sample;

    #[test]
    fn pipeline_counts_every_call() {
        let metrics = Arc::new(ServiceMetrics::default());
        let svc = build_service_pipeline(BasicStringService, Arc::clone(&metrics));

        assert_eq!(svc.uppercase("hello").unwrap(), "HELLO");
        assert_eq!(svc.count("hello"), 5);

        let text = metrics.render();
        assert_eq!(
            sample(
                &text,
                "my_group_string_service_request_count",
                &[("method", "uppercase"), ("error", "false")]
            ),
            Some(1.0)
        );
        assert_eq!(
            sample(
                &text,
                "my_group_string_service_request_count",
                &[("method", "count"), ("error", "false")]
            ),
            Some(1.0)
        );
    }

    proptest! {
        #[test]
        fn decorated_service_is_observationally_equivalent(s in ".{0,32}") {
            let metrics = Arc::new(ServiceMetrics::default());
            let decorated = build_service_pipeline(BasicStringService, metrics);

            prop_assert_eq!(decorated.uppercase(&s), BasicStringService.uppercase(&s));
            prop_assert_eq!(decorated.count(&s), BasicStringService.count(&s));
        }
    }
}
