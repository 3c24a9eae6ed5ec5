//! `stringsvc`: serves the decorated string service over HTTP.

use std::sync::Arc;

use clap::Parser;
use stringsvc_core::BasicStringService;
use stringsvc_server::cli::{init_tracing, Cli};
use stringsvc_server::{build_service_pipeline, NetworkModule, ServiceMetrics};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let metrics = Arc::new(ServiceMetrics::new(&cli.metrics_config()));
    let service = build_service_pipeline(BasicStringService, Arc::clone(&metrics));

    let mut module = NetworkModule::new(cli.network_config(), service, metrics);
    let port = module.start().await?;
    info!(port, "stringsvc listening");

    module.serve(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
