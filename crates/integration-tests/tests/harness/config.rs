//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use voca_config::{Config, CorsConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Both functions enabled, no API key, loopback listener
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = SocketAddr::from(([127, 0, 0, 1], 0));

        Self { config }
    }

    /// Point transcription at a mock upstream with a test key
    pub fn with_whisper(mut self, base_url: &str) -> Self {
        self.config.transcription.base_url = base_url.to_owned();
        self.config.transcription.api_key = Some(SecretString::from("sk-test-key"));
        self
    }

    /// Point transcription at an upstream but leave the key unset
    pub fn with_whisper_without_key(mut self, base_url: &str) -> Self {
        self.config.transcription.base_url = base_url.to_owned();
        self.config.transcription.api_key = None;
        self
    }

    /// Set the reported service version
    pub fn with_version(mut self, version: &str) -> Self {
        self.config.health.version = version.to_owned();
        self
    }

    /// Cap request bodies
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.config.transcription.max_body_bytes = limit;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.config.server.cors = cors;
        self
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
