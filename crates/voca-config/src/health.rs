use serde::Deserialize;

pub const DEFAULT_SERVICE_NAME: &str = "kkyori-voca-api";
pub const DEFAULT_SERVICE_VERSION: &str = "1.0.0";
pub const DEFAULT_REGION: &str = "asia-northeast3";

/// Health check function configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
    /// Name reported in the `service` field
    #[serde(default = "default_service")]
    pub service: String,
    /// Reported in the `version` field
    #[serde(default = "default_version")]
    pub version: String,
    /// Reported in the `region` field
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_path(),
            service: default_service(),
            version: default_version(),
            region: default_region(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/health".to_string()
}

fn default_service() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_version() -> String {
    DEFAULT_SERVICE_VERSION.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}
