//! OCSP GET-to-POST relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 OCSP RELAY                   │
//!                        │                                              │
//!  GET /ocsp/<b64>       │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │   POST application/
//!  ──────────────────────┼─▶│  http   │───▶│   ocsp   │───▶│upstream │──┼──▶ ocsp-request
//!                        │  │ server  │    │translator│    │ client  │  │   CA responder
//!                        │  └─────────┘    └────┬─────┘    └─────────┘  │
//!                        │                      │                       │
//!                        │                      ▼                       │
//!                        │               ┌─────────────┐                │
//!                        │               │ diagnostics │                │
//!                        │               │    sink     │                │
//!                        │               └─────────────┘                │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tokio::net::TcpListener;

use ocsp_relay::config::{self, ConfigError, RelayConfig};
use ocsp_relay::lifecycle::{signals, Shutdown};
use ocsp_relay::observability::{logging, metrics};
use ocsp_relay::HttpServer;

#[derive(Parser)]
#[command(name = "ocsp-relay")]
#[command(about = "Relays GET-style OCSP requests to a CA responder as binary POSTs", long_about = None)]
struct Cli {
    /// Port to listen on (all interfaces).
    port: Option<u16>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upstream responder URL, overriding the config file.
    #[arg(short, long)]
    upstream: Option<String>,
}

/// Parse arguments. `Ok(None)` means neither a port nor a config file was
/// given, which is answered with usage and a clean exit.
fn parse_cli<I, T>(args: I) -> Result<Option<Cli>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    if cli.port.is_none() && cli.config.is_none() {
        return Ok(None);
    }
    Ok(Some(cli))
}

/// Merge the config file (or defaults) with command line overrides.
fn build_config(cli: Cli) -> Result<RelayConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(port) = cli.port {
        config.set_port(port);
    }
    if let Some(url) = cli.upstream {
        config.upstream.url = url;
    }
    config::validated(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match parse_cli(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{}", Cli::command().render_usage());
            return Ok(());
        }
        Err(e) => e.exit(),
    };
    let config = build_config(cli)?;

    logging::init_logging(&config.observability);
    tracing::info!("ocsp-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        path_prefix = %config.ocsp.path_prefix,
        decode_failure = ?config.ocsp.decode_failure,
        relay_response = config.ocsp.relay_response,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_port_means_usage() {
        assert!(parse_cli(["ocsp-relay"]).unwrap().is_none());
        assert!(parse_cli(["ocsp-relay", "--upstream", "http://ca:81"]).unwrap().is_none());
    }

    #[test]
    fn port_or_config_starts_the_relay() {
        let cli = parse_cli(["ocsp-relay", "8080"]).unwrap().unwrap();
        assert_eq!(cli.port, Some(8080));

        let cli = parse_cli(["ocsp-relay", "--config", "relay.toml"]).unwrap().unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("relay.toml")));
    }

    #[test]
    fn non_numeric_port_is_an_error() {
        assert!(parse_cli(["ocsp-relay", "notaport"]).is_err());
        assert!(parse_cli(["ocsp-relay", "70000"]).is_err());
    }

    #[test]
    fn port_binds_all_interfaces() {
        let cli = parse_cli(["ocsp-relay", "8081", "-u", "http://127.0.0.1:2560"])
            .unwrap()
            .unwrap();
        let config = build_config(cli).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
        assert_eq!(config.upstream.url, "http://127.0.0.1:2560");
    }

    #[test]
    fn bad_upstream_override_fails_validation() {
        let cli = parse_cli(["ocsp-relay", "8081", "-u", "ftp://ca"]).unwrap().unwrap();
        assert!(matches!(build_config(cli), Err(ConfigError::Validation(_))));
    }
}
