//! # director-api — Binary Entry Point
//!
//! Loads configuration, builds the identity provider and gate, and serves
//! the director API until Ctrl-C.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use director_api::DirectorConfig;

/// Director control-plane API server.
#[derive(Parser, Debug)]
#[command(name = "director-api", version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "DIRECTOR_CONFIG", default_value = "director.yml")]
    config: PathBuf,

    /// Log more. Repeat for more verbosity (-v, -vv). Ignored when
    /// `RUST_LOG` is set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize structured tracing.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose)));
    if cli.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = DirectorConfig::load(&cli.config)
        .and_then(DirectorConfig::with_env_overrides)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    tracing::info!(?config, "configuration loaded");

    let port = config.port;
    let app = director_api::app(config);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("director API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("director API stopped");
    Ok(())
}

/// Log filter used when `RUST_LOG` is unset.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
