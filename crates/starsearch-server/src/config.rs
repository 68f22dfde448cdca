//! Server configuration
//!
//! Loaded from a YAML or TOML file, then overridden by environment variables,
//! then by command line flags.

use serde::{Deserialize, Serialize};
use starsearch_egress::{ApiCredential, client::HttpClientConfig, credential::API_KEY_ENV};
use starsearch_observability::LogFormat;
use starsearch_ui::UiConfig;
use std::{fmt, path::Path};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("{0}")]
    MissingCredential(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default)]
    pub http_client: HttpClientSettings,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("http_client", &self.http_client)
            .finish()
    }
}

/// Overrides for the upstream HTTP client; unset fields keep the client defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpClientSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_max_idle_per_host: Option<usize>,
}

impl HttpClientSettings {
    pub fn to_client_config(&self) -> HttpClientConfig {
        let mut config = HttpClientConfig {
            timeout_secs: self.timeout_secs,
            ..HttpClientConfig::default()
        };
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }
        if let Some(max) = self.pool_max_idle_per_host {
            config.pool_max_idle_per_host = max;
        }
        config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_false")]
    pub log_requests: bool,

    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_requests: false,
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) -> Result<(), ConfigError> {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Merge variables from any lookup, e.g. a map in tests
    pub fn merge_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Upstream settings (no STARSEARCH_ prefix for these)
        if let Some(api_key) = lookup(API_KEY_ENV) {
            self.upstream.api_key = Some(api_key);
        }

        if let Some(val) = lookup("TMDB_BASE_URL") {
            self.upstream.base_url = Some(val);
        }

        // Logging settings
        if let Some(val) = lookup("STARSEARCH_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Some(val) = lookup("STARSEARCH_LOG_REQUESTS") {
            self.logging.log_requests = parse_bool("STARSEARCH_LOG_REQUESTS", &val)?;
        }

        // Server settings
        if let Some(val) = lookup("STARSEARCH_PORT") {
            self.port = val.parse().map_err(|_| ConfigError::InvalidValue {
                name: "STARSEARCH_PORT",
                value: val.clone(),
            })?;
        }

        if let Some(val) = lookup("STARSEARCH_HOST") {
            self.host = val;
        }

        Ok(())
    }

    /// The upstream credential, or an error naming the missing variable
    pub fn credential(&self) -> Result<ApiCredential, ConfigError> {
        ApiCredential::new(self.upstream.api_key.clone().unwrap_or_default())
            .map_err(|e| ConfigError::MissingCredential(e.to_string()))
    }

    /// Base URL the search page uses to reach this server's API
    ///
    /// `bound_port` is the port actually bound, which differs from `port` when it is 0.
    pub fn ui_api_base_url(&self, bound_port: u16) -> String {
        if let Some(url) = &self.ui.api_base_url {
            return url.clone();
        }
        let host = match self.host.as_str() {
            "0.0.0.0" | "" => "127.0.0.1",
            "::" | "[::]" => "[::1]",
            host => host,
        };
        format!("http://{}:{}", host, bound_port)
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::{collections::HashMap, io::Write};

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.log_requests);
        assert!(config.ui.enabled);
        assert!(config.metrics.enabled);
        assert!(config.upstream.api_key.is_none());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "port: 8080\n\
             upstream:\n  api_key: token\n  http_client:\n    timeout_secs: 30\n\
             metrics:\n  enabled: false\n"
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.upstream.api_key.as_deref(), Some("token"));
        assert_eq!(config.upstream.http_client.timeout_secs, Some(30));
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "host = \"0.0.0.0\"\n\n\
             [logging]\nlevel = \"debug\"\nformat = \"json\"\n\n\
             [ui]\nenabled = false\n"
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.ui.enabled);
    }

    #[test]
    fn test_from_missing_file() {
        let result = ServerConfig::from_file("/nonexistent/starsearch.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "port: [not a port").unwrap();

        let result = ServerConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = ServerConfig {
            port: 8080,
            ..ServerConfig::default()
        };
        let env = vars(&[
            ("TMDB_API_KEY", "from-env"),
            ("TMDB_BASE_URL", "http://localhost:9999/3"),
            ("STARSEARCH_PORT", "4000"),
            ("STARSEARCH_HOST", "0.0.0.0"),
            ("STARSEARCH_LOG_LEVEL", "debug"),
            ("STARSEARCH_LOG_REQUESTS", "true"),
        ]);

        config.merge_vars(|name| env.get(name).cloned()).unwrap();

        assert_eq!(config.upstream.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.upstream.base_url.as_deref(), Some("http://localhost:9999/3"));
        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.log_requests);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = ServerConfig::default();
        let env = vars(&[("STARSEARCH_PORT", "not-a-port")]);

        let err = config.merge_vars(|name| env.get(name).cloned()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for STARSEARCH_PORT: 'not-a-port'");
    }

    #[test]
    fn test_missing_credential() {
        let config = ServerConfig::default();
        let err = config.credential().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
        assert!(err.to_string().contains("TMDB_API_KEY"));
    }

    #[test]
    fn test_blank_credential() {
        let mut config = ServerConfig::default();
        config.upstream.api_key = Some("   ".to_string());
        assert!(config.credential().is_err());

        config.upstream.api_key = Some("token".to_string());
        assert_eq!(config.credential().unwrap().expose(), "token");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = ServerConfig::default();
        config.upstream.api_key = Some("super-secret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_http_client_settings() {
        let settings = HttpClientSettings {
            timeout_secs: Some(5),
            connect_timeout_secs: None,
            pool_max_idle_per_host: Some(2),
        };
        let client = settings.to_client_config();
        assert_eq!(client.timeout_secs, Some(5));
        assert_eq!(client.connect_timeout_secs, HttpClientConfig::default().connect_timeout_secs);
        assert_eq!(client.pool_max_idle_per_host, 2);

        assert_eq!(HttpClientSettings::default().to_client_config().timeout_secs, None);
    }

    #[test]
    fn test_ui_api_base_url() {
        let mut config = ServerConfig::default();
        assert_eq!(config.ui_api_base_url(3000), "http://127.0.0.1:3000");

        config.host = "0.0.0.0".to_string();
        assert_eq!(config.ui_api_base_url(4123), "http://127.0.0.1:4123");

        config.ui.api_base_url = Some("https://stars.example.com".to_string());
        assert_eq!(config.ui_api_base_url(4123), "https://stars.example.com");
    }

    #[test]
    #[serial]
    fn test_merge_process_env() {
        unsafe {
            std::env::set_var("STARSEARCH_LOG_LEVEL", "trace");
        }

        let mut config = ServerConfig::default();
        config.merge_env().unwrap();
        assert_eq!(config.logging.level, "trace");

        unsafe {
            std::env::remove_var("STARSEARCH_LOG_LEVEL");
        }
    }
}
