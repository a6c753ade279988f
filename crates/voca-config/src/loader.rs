use std::net::SocketAddr;
use std::path::Path;

use secrecy::SecretString;

use crate::{Config, LogFormat, env::non_empty_var};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build configuration from the process environment alone
    ///
    /// This is how the functions run on a serverless platform: `PORT`,
    /// `GOOGLE_CLOUD_REGION`, `SERVICE_VERSION`, `OPENAI_API_KEY`,
    /// `OPENAI_BASE_URL`, `RUST_LOG` and `LOG_FORMAT` are read once, empty
    /// values count as unset, and everything else keeps its default.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `LOG_FORMAT` hold unparseable values,
    /// or validation fails
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(port) = non_empty_var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT value `{port}`: {e}"))?;
            config.server.listen_address = SocketAddr::from(([0, 0, 0, 0], port));
        }

        if let Some(region) = non_empty_var("GOOGLE_CLOUD_REGION") {
            config.health.region = region;
        }

        if let Some(version) = non_empty_var("SERVICE_VERSION") {
            config.health.version = version;
        }

        config.transcription.api_key = non_empty_var("OPENAI_API_KEY").map(SecretString::from);

        if let Some(base_url) = non_empty_var("OPENAI_BASE_URL") {
            config.transcription.base_url = base_url;
        }

        if let Some(filter) = non_empty_var("RUST_LOG") {
            config.logging.filter = filter;
        }

        if let Some(format) = non_empty_var("LOG_FORMAT") {
            config.logging.format = format.parse::<LogFormat>().map_err(|e| anyhow::anyhow!(e))?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no function is enabled, routes are malformed or
    /// clash, or transcription limits are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_has_functions()?;
        self.validate_paths()?;
        self.validate_transcription()?;
        Ok(())
    }

    fn validate_has_functions(&self) -> anyhow::Result<()> {
        if !self.health.enabled && !self.transcription.enabled {
            anyhow::bail!("at least one function must be enabled (health or transcription)");
        }

        Ok(())
    }

    fn validate_paths(&self) -> anyhow::Result<()> {
        let mut paths = Vec::new();

        if self.health.enabled {
            paths.push(("health", self.health.path.as_str()));
        }

        if self.transcription.enabled {
            paths.push(("transcription", self.transcription.path.as_str()));
        }

        for (name, path) in &paths {
            if !path.starts_with('/') {
                anyhow::bail!("{name}.path must start with '/', got `{path}`");
            }
        }

        if let [(_, first), (_, second)] = paths.as_slice()
            && first == second
        {
            anyhow::bail!("health.path and transcription.path must differ, both are `{first}`");
        }

        Ok(())
    }

    fn validate_transcription(&self) -> anyhow::Result<()> {
        let transcription = &self.transcription;

        if !transcription.enabled {
            return Ok(());
        }

        if transcription.max_body_bytes == 0 {
            anyhow::bail!("transcription.max_body_bytes must be greater than 0");
        }

        if transcription.timeout_seconds == 0 {
            anyhow::bail!("transcription.timeout_seconds must be greater than 0");
        }

        url::Url::parse(&transcription.base_url)
            .map_err(|e| anyhow::anyhow!("invalid transcription.base_url `{}`: {e}", transcription.base_url))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    const ENV_KEYS: [&str; 7] = [
        "PORT",
        "GOOGLE_CLOUD_REGION",
        "SERVICE_VERSION",
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "RUST_LOG",
        "LOG_FORMAT",
    ];

    fn with_clean_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
        let vars: Vec<(&str, Option<&str>)> = ENV_KEYS
            .iter()
            .map(|key| {
                let value = overrides.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
                (*key, value)
            })
            .collect();

        temp_env::with_vars(vars, f);
    }

    #[test]
    fn env_defaults() {
        with_clean_env(&[], || {
            let config = Config::from_env().unwrap();

            assert_eq!(config.server.listen_address, SocketAddr::from(([0, 0, 0, 0], 8080)));
            assert_eq!(config.health.version, "1.0.0");
            assert_eq!(config.health.region, "asia-northeast3");
            assert_eq!(config.health.service, "kkyori-voca-api");
            assert!(config.transcription.api_key.is_none());
            assert_eq!(config.transcription.base_url, "https://api.openai.com/v1");
            assert_eq!(config.logging.format, LogFormat::Text);
        });
    }

    #[test]
    fn env_overrides() {
        let overrides = [
            ("PORT", "9090"),
            ("GOOGLE_CLOUD_REGION", "us-central1"),
            ("SERVICE_VERSION", "2.3.1"),
            ("OPENAI_API_KEY", "sk-test"),
            ("LOG_FORMAT", "JSON"),
        ];

        with_clean_env(&overrides, || {
            let config = Config::from_env().unwrap();

            assert_eq!(config.server.listen_address.port(), 9090);
            assert_eq!(config.health.region, "us-central1");
            assert_eq!(config.health.version, "2.3.1");
            assert_eq!(
                config.transcription.api_key.as_ref().map(ExposeSecret::expose_secret),
                Some("sk-test")
            );
            assert_eq!(config.logging.format, LogFormat::Json);
        });
    }

    #[test]
    fn empty_env_values_fall_back_to_defaults() {
        with_clean_env(&[("SERVICE_VERSION", ""), ("OPENAI_API_KEY", "")], || {
            let config = Config::from_env().unwrap();

            assert_eq!(config.health.version, "1.0.0");
            assert!(config.transcription.api_key.is_none());
        });
    }

    #[test]
    fn invalid_port_is_rejected() {
        with_clean_env(&[("PORT", "eighty")], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("invalid PORT"));
        });
    }

    #[test]
    fn parse_toml_with_placeholders() {
        let raw = r#"
            [server]
            listen_address = "127.0.0.1:3000"

            [server.cors]
            origins = ["https://app.example.com"]
            max_age = 600

            [health]
            version = "{{ env.VOCA_TEST_VERSION | default("0.0.1") }}"

            [transcription]
            api_key = "{{ env.VOCA_TEST_KEY }}"
            max_body_bytes = 1024
        "#;

        let vars = [("VOCA_TEST_VERSION", None), ("VOCA_TEST_KEY", Some("sk-file"))];
        temp_env::with_vars(vars, || {
            let config = Config::parse(raw).unwrap();

            assert_eq!(config.server.listen_address.port(), 3000);
            assert!(!config.server.cors.allows_any_origin());
            assert_eq!(config.server.cors.headers, vec!["Content-Type".to_string()]);
            assert_eq!(config.health.version, "0.0.1");
            assert_eq!(config.health.path, "/health");
            assert_eq!(config.transcription.max_body_bytes, 1024);
            assert_eq!(config.transcription.path, "/transcribe");
            assert_eq!(
                config.transcription.api_key.as_ref().map(ExposeSecret::expose_secret),
                Some("sk-file")
            );
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::parse("[health]\nstatus = \"ok\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn all_functions_disabled_is_rejected() {
        let err = Config::parse("[health]\nenabled = false\n[transcription]\nenabled = false").unwrap_err();
        assert!(err.to_string().contains("at least one function"));
    }

    #[test]
    fn clashing_paths_are_rejected() {
        let err = Config::parse("[health]\npath = \"/fn\"\n[transcription]\npath = \"/fn\"").unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = Config::parse("[transcription]\npath = \"transcribe\"").unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn disabled_function_path_is_not_checked() {
        let config = Config::parse("[health]\nenabled = false\npath = \"/transcribe\"").unwrap();
        assert!(!config.health.enabled);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = Config::parse("[transcription]\nmax_body_bytes = 0").unwrap_err();
        assert!(err.to_string().contains("max_body_bytes"));

        let err = Config::parse("[transcription]\ntimeout_seconds = 0").unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Config::parse("[transcription]\nbase_url = \"not a url\"").unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[health]\nregion = \"europe-west1\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.health.region, "europe-west1");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/voca.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
