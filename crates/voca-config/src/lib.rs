#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod logging;
pub mod server;
pub mod transcription;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use logging::*;
pub use server::*;
pub use transcription::*;

/// Top-level Voca configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener and CORS settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Health check function
    #[serde(default)]
    pub health: HealthConfig,
    /// Transcription proxy function
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}
