//! Network module with deferred startup lifecycle.
//!
//! `new()` wires the endpoints and bindings, `start()` binds the TCP
//! listener, and `serve()` accepts connections until shutdown. Binding
//! before serving lets callers learn the OS-assigned port first.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, post};
use axum::Router;
use stringsvc_core::StringService;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::NetworkConfig;
use super::handlers::{
    count_handler, health_handler, liveness_handler, metrics_handler, readiness_handler,
    uppercase_handler, AppState,
};
use super::middleware::apply_http_layers;
use super::shutdown::ShutdownController;
use super::transport::{count_binding, uppercase_binding};
use crate::service::{make_count_endpoint, make_uppercase_endpoint, ServiceMetrics};

/// Owns the HTTP server lifecycle for one decorated service.
///
/// 1. `new()` -- builds endpoints and bindings over the decorated service
/// 2. `start()` -- binds the TCP listener
/// 3. `serve()` -- serves until the shutdown future resolves, then drains
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    state: AppState,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    ///
    /// `service` is the outermost link of the decorator chain; `metrics` is
    /// the aggregator its instrumenting layer records into.
    #[must_use]
    pub fn new(
        config: NetworkConfig,
        service: Arc<dyn StringService>,
        metrics: Arc<ServiceMetrics>,
    ) -> Self {
        let state = AppState {
            uppercase: uppercase_binding(make_uppercase_endpoint(Arc::clone(&service))),
            count: count_binding(make_count_endpoint(service)),
            metrics,
            shutdown: Arc::new(ShutdownController::new()),
            start_time: Instant::now(),
        };
        Self {
            config,
            listener: None,
            state,
        }
    }

    /// Shared health/in-flight controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.state.shutdown)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `POST /uppercase` -- uppercase operation
    /// - `POST /count` -- count operation
    /// - `GET /metrics` -- Prometheus exposition
    /// - `GET /health` -- detailed health JSON
    /// - `GET /health/live` -- liveness probe
    /// - `GET /health/ready` -- readiness probe
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route("/uppercase", post(uppercase_handler))
            .route("/count", post(count_handler))
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler));

        apply_http_layers(router, &self.config).with_state(self.state.clone())
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the bound port, which differs from the configured one when
    /// port 0 is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves connections until `shutdown` resolves, then drains.
    ///
    /// On the signal the health state moves to Draining and the listener
    /// stops accepting; in-flight calls get up to `drain_timeout` to finish
    /// before the state moves to Stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server hits
    /// a fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let Some(listener) = self.listener.take() else {
            anyhow::bail!("start() must be called before serve()");
        };
        let router = self.build_router();
        let controller = self.shutdown_controller();

        controller.set_ready();
        info!("Serving HTTP on {}", listener.local_addr()?);

        let signal_controller = Arc::clone(&controller);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Shutdown signal received, draining");
                signal_controller.trigger_shutdown();
            })
            .await?;

        if controller.wait_for_drain(self.config.drain_timeout).await {
            info!("All in-flight calls drained");
        } else {
            warn!(
                in_flight = controller.in_flight_count(),
                "Drain timeout expired with calls still in flight"
            );
        }
        Ok(())
    }
}
