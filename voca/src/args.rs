use std::path::PathBuf;

use clap::Parser;

/// Voca API functions
#[derive(Debug, Parser)]
#[command(name = "voca", about = "Health check and speech transcription HTTP functions")]
pub struct Args {
    /// Path to a TOML configuration file; without it everything comes from the environment
    #[arg(short, long, env = "VOCA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "VOCA_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
