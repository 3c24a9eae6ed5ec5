//! Logging middleware for the string service.
//!
//! Emits one structured `tracing` event per call, after the wrapped call
//! returns, with the method, input, output or error, and elapsed time.

use std::time::Instant;

use stringsvc_core::{Method, ServiceError, StringService};
use tower::Layer;
use tracing::info;

// ---------------------------------------------------------------------------
// LoggingLayer
// ---------------------------------------------------------------------------

/// Layer that wraps a service in [`LoggingMiddleware`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer;

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddleware { inner }
    }
}

// ---------------------------------------------------------------------------
// LoggingMiddleware
// ---------------------------------------------------------------------------

/// Service wrapper that logs every call and returns the inner result untouched.
#[derive(Debug, Clone)]
pub struct LoggingMiddleware<S> {
    inner: S,
}

impl<S> LoggingMiddleware<S> {
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn micros_since(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}

impl<S: StringService> StringService for LoggingMiddleware<S> {
    fn uppercase(&self, s: &str) -> Result<String, ServiceError> {
        let start = Instant::now();
        let result = self.inner.uppercase(s);
        let took_us = micros_since(start);

        match &result {
            Ok(output) => info!(
                method = %Method::Uppercase,
                input = s,
                output = output.as_str(),
                took_us,
                "call complete"
            ),
            Err(err) => info!(
                method = %Method::Uppercase,
                input = s,
                err = %err,
                took_us,
                "call complete"
            ),
        }

        result
    }

    fn count(&self, s: &str) -> usize {
        let start = Instant::now();
        let n = self.inner.count(s);
        let took_us = micros_since(start);

        info!(
            method = %Method::Count,
            input = s,
            output = n,
            took_us,
            "call complete"
        );

        n
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use stringsvc_core::BasicStringService;

    use super::*;

    /// Writer that appends formatted log lines to a shared buffer.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf)
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    /// Runs `f` with a subscriber that writes into the returned buffer.
    fn capture(f: impl FnOnce()) -> Vec<String> {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.lines()
    }

    #[test]
    fn passes_through_results() {
        let svc = LoggingLayer.layer(BasicStringService);
        assert_eq!(svc.uppercase("hello").unwrap(), "HELLO");
        assert_eq!(svc.uppercase(""), Err(ServiceError::EmptyInput));
        assert_eq!(svc.count("hello"), 5);
    }

    #[test]
    fn logs_one_line_per_call() {
        let svc = LoggingMiddleware::new(BasicStringService);
        let lines = capture(|| {
            let _ = svc.uppercase("hello");
            let _ = svc.count("abc");
            let _ = svc.uppercase("");
        });

        assert_eq!(lines.len(), 3, "{lines:?}");
        assert!(lines[0].contains("method=uppercase"));
        assert!(lines[0].contains("HELLO"));
        assert!(lines[0].contains("took_us="));
        assert!(lines[1].contains("method=count"));
        assert!(lines[1].contains("output=3"));
        assert!(lines[2].contains("err=empty string"));
    }
}
