//! Main entry point for the Firedeck server.

use firedeck_server::{cli, config, server};

use anyhow::Context;
use clap::Parser;
use config::Config;
use server::AppState;
use std::net::{SocketAddr, TcpListener};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::ServerCli::parse();

    // If debug is on: show everything at DEBUG level with source locations.
    // Otherwise keep our own crates at INFO and quiet everything else.
    let log_filter = if cli.debug {
        "debug".to_owned()
    } else {
        "firedeck_server=info,warn".to_owned()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .with_file(cli.debug)
        .with_line_number(cli.debug)
        .init();

    // Load or create config file (creates the file if missing).
    let mut cfg = Config::load_or_create(&cli.config)
        .with_context(|| format!("loading or creating config '{}'", cli.config.display()))?;

    // Apply CLI overrides in-memory, persisting only if requested.
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    if cli.persist {
        cfg.save(&cli.config)
            .with_context(|| format!("saving updated config '{}'", cli.config.display()))?;
    }

    tracing::info!(config = %cli.config.display(), bind = %cfg.bind, port = cfg.port);

    let port = find_available_port(&cfg.bind, cfg.port)?;
    if port != cfg.port {
        tracing::warn!(port, "configured port was not available, using alternative port");
    }
    let addr: SocketAddr = format!("{}:{}", cfg.bind, port)
        .parse()
        .with_context(|| format!("invalid bind address '{}:{}'", cfg.bind, port))?;

    let state = AppState::new(cfg);
    server::run_server(addr, state).await
}

/// Find the first available port starting from the given port number.
fn find_available_port(bind: &str, start_port: u16) -> anyhow::Result<u16> {
    let end = start_port.saturating_add(100);
    for port in start_port..end {
        if TcpListener::bind((bind, port)).is_ok() {
            return Ok(port);
        }
    }
    anyhow::bail!("no available ports found in range {}..{}", start_port, end)
}
