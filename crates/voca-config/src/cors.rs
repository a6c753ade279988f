use std::time::Duration;

use serde::Deserialize;

/// Cross-origin policy shared by every function
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins, `"*"` anywhere in the list allows every origin
    #[serde(default = "default_origins")]
    pub origins: Vec<String>,
    /// Request headers a browser may send
    #[serde(default = "default_headers")]
    pub headers: Vec<String>,
    /// How long a browser may cache a preflight answer, in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_origins(),
            headers: default_headers(),
            max_age: None,
        }
    }
}

impl CorsConfig {
    /// True when any origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.origins.iter().any(|origin| origin == "*")
    }

    /// Get max age as Duration
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_headers() -> Vec<String> {
    vec!["Content-Type".to_string()]
}
