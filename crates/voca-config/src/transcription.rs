use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Upstream upload limit for a single audio file (25 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 << 20;

pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 120;

/// Transcription proxy function configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
    /// `OpenAI` API key. Requests fail with 500 while this is unset.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Largest request body read into memory
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Upper bound for one upstream call
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_path(),
            api_key: None,
            base_url: default_base_url(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
        }
    }
}

impl TranscriptionConfig {
    /// Get the upstream timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/transcribe".to_string()
}

fn default_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_SECONDS
}
