//! Command-line options and logging setup for the `stringsvc` binary.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::network::NetworkConfig;
use crate::service::MetricsConfig;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "STRINGSVC_LOG";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable key=value lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// String service HTTP server.
#[derive(Debug, Parser)]
#[command(name = "stringsvc", version, about)]
pub struct Cli {
    /// Address to bind.
    #[arg(long, env = "STRINGSVC_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (0 = OS-assigned).
    #[arg(long, env = "STRINGSVC_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Allowed CORS origin; repeat for several. `*` allows any.
    #[arg(long = "cors-origin", env = "STRINGSVC_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "STRINGSVC_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Seconds to wait for in-flight calls on shutdown.
    #[arg(long, env = "STRINGSVC_DRAIN_TIMEOUT_SECS", default_value_t = 30)]
    pub drain_timeout_secs: u64,

    /// Metrics namespace prefix.
    #[arg(long, env = "STRINGSVC_METRICS_NAMESPACE", default_value = "my_group")]
    pub metrics_namespace: String,

    /// Metrics subsystem prefix.
    #[arg(long, env = "STRINGSVC_METRICS_SUBSYSTEM", default_value = "string_service")]
    pub metrics_subsystem: String,

    /// Log line format.
    #[arg(long, env = "STRINGSVC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    #[must_use]
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            drain_timeout: Duration::from_secs(self.drain_timeout_secs),
        }
    }

    #[must_use]
    pub fn metrics_config(&self) -> MetricsConfig {
        MetricsConfig {
            namespace: self.metrics_namespace.clone(),
            subsystem: self.metrics_subsystem.clone(),
        }
    }
}

/// Installs the global tracing subscriber writing to stderr.
///
/// The filter comes from `STRINGSVC_LOG` and defaults to `info`.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["stringsvc"]).unwrap();
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.log_format, LogFormat::Text);

        let network = cli.network_config();
        assert_eq!(network.bind_addr(), "0.0.0.0:8080");
        assert_eq!(network.cors_origins, vec!["*"]);
        assert_eq!(network.request_timeout, Duration::from_secs(30));

        let metrics = cli.metrics_config();
        assert_eq!(metrics.namespace, "my_group");
        assert_eq!(metrics.subsystem, "string_service");
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "stringsvc",
            "--port",
            "9000",
            "--cors-origin",
            "https://a.example,https://b.example",
            "--request-timeout-secs",
            "5",
            "--metrics-namespace",
            "acme",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.port, 9000);
        assert_eq!(cli.log_format, LogFormat::Json);
        let network = cli.network_config();
        assert_eq!(
            network.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(network.request_timeout, Duration::from_secs(5));
        assert_eq!(cli.metrics_config().namespace, "acme");
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["stringsvc", "--log-format", "xml"]).is_err());
    }
}
