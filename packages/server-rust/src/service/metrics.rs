//! In-memory metrics aggregator for the service pipeline.
//!
//! Uses the `metrics` facade backed by a private Prometheus recorder. The
//! recorder is never installed globally: each [`ServiceMetrics`] owns its own
//! registry, is handed to the instrumenting middleware at construction, and
//! is rendered by the `/metrics` endpoint.

use std::time::Duration;

use metrics::{Counter, Histogram, Key, KeyName, Label, Level, Metadata, Recorder, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use stringsvc_core::Method;

use super::config::MetricsConfig;

static METADATA: Metadata<'static> =
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

/// Pre-registered handles for one operation.
#[derive(Clone)]
struct MethodMetrics {
    succeeded: Counter,
    failed: Counter,
    latency: Histogram,
}

/// Aggregates call counts, latencies, and `count` results.
///
/// Series (with the default [`MetricsConfig`]):
/// - `my_group_string_service_request_count{method, error}` -- calls, partitioned by outcome
/// - `my_group_string_service_request_latency_seconds{method}` -- call latency summary
/// - `my_group_string_service_count_result` -- summary of `count` results
///
/// Every handle is registered up front and updated atomically, so any number
/// of concurrent calls can record without external locking.
pub struct ServiceMetrics {
    handle: PrometheusHandle,
    uppercase: MethodMetrics,
    count: MethodMetrics,
    count_result: Histogram,
}

impl ServiceMetrics {
    /// Creates an aggregator with its own Prometheus registry.
    #[must_use]
    pub fn new(config: &MetricsConfig) -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();

        let request_count = config.series_name("request_count");
        let request_latency = config.series_name("request_latency_seconds");
        let count_result = config.series_name("count_result");

        recorder.describe_counter(
            KeyName::from(request_count.clone()),
            None,
            "Number of requests".into(),
        );
        recorder.describe_histogram(
            KeyName::from(request_latency.clone()),
            Some(Unit::Seconds),
            "Total duration of requests in seconds".into(),
        );
        recorder.describe_histogram(
            KeyName::from(count_result.clone()),
            None,
            "The result of each count method".into(),
        );

        let method_metrics = |method: Method| {
            let counter = |error: &'static str| {
                let key = Key::from_parts(
                    request_count.clone(),
                    vec![
                        Label::new("method", method.as_str()),
                        Label::new("error", error),
                    ],
                );
                recorder.register_counter(&key, &METADATA)
            };
            let latency_key = Key::from_parts(
                request_latency.clone(),
                vec![Label::new("method", method.as_str())],
            );
            MethodMetrics {
                succeeded: counter("false"),
                failed: counter("true"),
                latency: recorder.register_histogram(&latency_key, &METADATA),
            }
        };

        let uppercase = method_metrics(Method::Uppercase);
        let count = method_metrics(Method::Count);
        let count_result = recorder.register_histogram(&Key::from_name(count_result), &METADATA);

        Self {
            handle: recorder.handle(),
            uppercase,
            count,
            count_result,
        }
    }

    fn method(&self, method: Method) -> &MethodMetrics {
        match method {
            Method::Uppercase => &self.uppercase,
            Method::Count => &self.count,
        }
    }

    /// Records one completed call: bumps the outcome counter and observes latency.
    pub fn record_call(&self, method: Method, failed: bool, elapsed: Duration) {
        let m = self.method(method);
        if failed {
            m.failed.increment(1);
        } else {
            m.succeeded.increment(1);
        }
        m.latency.record(elapsed.as_secs_f64());
    }

    /// Observes one `count` result.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_count_result(&self, n: usize) {
        self.count_result.record(n as f64);
    }

    /// Renders every series in the Prometheus text exposition format.
    #[must_use]
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new(&MetricsConfig::default())
    }
}

impl std::fmt::Debug for ServiceMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceMetrics").finish_non_exhaustive()
    }
}

/// Reads one sample out of rendered exposition text.
///
/// Matches `name` (or `name_total`) and requires every `labels` pair to be
/// present on the series.
#[cfg(test)]
pub(crate) fn sample(rendered: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    let total = format!("{name}_total");
    rendered
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (series, value) = line.rsplit_once(' ')?;
            let (metric, rest) = series.split_once('{').unwrap_or((series, ""));
            if metric != name && metric != total {
                return None;
            }
            let matches = labels
                .iter()
                .all(|(k, v)| rest.contains(&format!("{k}=\"{v}\"")));
            if !matches {
                return None;
            }
            value.trim().parse().ok()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST_COUNT: &str = "my_group_string_service_request_count";

    #[test]
    fn counters_start_at_zero() {
        let metrics = ServiceMetrics::default();
        let text = metrics.render();
        for method in Method::ALL {
            for error in ["true", "false"] {
                assert_eq!(
                    sample(&text, REQUEST_COUNT, &[("method", method.as_str()), ("error", error)]),
                    Some(0.0),
                    "{method} error={error}"
                );
            }
        }
    }

    #[test]
    fn record_call_partitions_by_outcome() {
        let metrics = ServiceMetrics::default();
        metrics.record_call(Method::Uppercase, false, Duration::from_millis(1));
        metrics.record_call(Method::Uppercase, false, Duration::from_millis(1));
        metrics.record_call(Method::Uppercase, true, Duration::from_millis(1));

        let text = metrics.render();
        assert_eq!(
            sample(&text, REQUEST_COUNT, &[("method", "uppercase"), ("error", "false")]),
            Some(2.0)
        );
        assert_eq!(
            sample(&text, REQUEST_COUNT, &[("method", "uppercase"), ("error", "true")]),
            Some(1.0)
        );
        assert_eq!(
            sample(&text, REQUEST_COUNT, &[("method", "count"), ("error", "false")]),
            Some(0.0)
        );
        assert_eq!(
            sample(
                &text,
                "my_group_string_service_request_latency_seconds_count",
                &[("method", "uppercase")]
            ),
            Some(3.0)
        );
    }

    #[test]
    fn count_results_are_summarized() {
        let metrics = ServiceMetrics::default();
        metrics.record_count_result(5);
        metrics.record_count_result(3);

        let text = metrics.render();
        assert_eq!(
            sample(&text, "my_group_string_service_count_result_count", &[]),
            Some(2.0)
        );
        assert_eq!(
            sample(&text, "my_group_string_service_count_result_sum", &[]),
            Some(8.0)
        );
    }

    #[test]
    fn aggregators_are_independent() {
        let a = ServiceMetrics::default();
        let b = ServiceMetrics::default();
        a.record_call(Method::Count, false, Duration::ZERO);

        let labels = [("method", "count"), ("error", "false")];
        assert_eq!(sample(&a.render(), REQUEST_COUNT, &labels), Some(1.0));
        assert_eq!(sample(&b.render(), REQUEST_COUNT, &labels), Some(0.0));
    }

    #[test]
    fn custom_names_are_used() {
        let metrics = ServiceMetrics::new(&MetricsConfig {
            namespace: "acme".to_string(),
            subsystem: "strings".to_string(),
        });
        metrics.record_call(Method::Count, false, Duration::ZERO);
        assert_eq!(
            sample(
                &metrics.render(),
                "acme_strings_request_count",
                &[("method", "count"), ("error", "false")]
            ),
            Some(1.0)
        );
    }
}
