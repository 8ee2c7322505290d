use clap::Parser;
use std::path::PathBuf;

/// Server CLI for firedeck-server
#[derive(Parser, Debug, Clone)]
#[command(name = "firedeck-server", version, about = "Firedeck card game server")]
pub struct ServerCli {
    /// Path to config file
    #[arg(long, default_value = "firedeck.toml")]
    pub config: PathBuf,

    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Persist CLI overrides back to the config file
    #[arg(long, default_value_t = false)]
    pub persist: bool,

    /// Verbose logging with source locations
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
