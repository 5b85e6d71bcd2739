//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub list: ListConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Portfolio REST API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Third-party media host used by upload widgets
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Unsigned upload endpoint
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Preset sent as `upload_preset` with every upload
    #[serde(default)]
    pub upload_preset: String,

    #[serde(default = "default_upload_timeout")]
    pub request_timeout_secs: u64,
}

fn default_upload_url() -> String {
    "https://api.cloudinary.com/v1_1/demo/auto/upload".to_string()
}

fn default_upload_timeout() -> u64 {
    120
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_url: default_upload_url(),
            upload_preset: String::new(),
            request_timeout_secs: default_upload_timeout(),
        }
    }
}

/// Where the authenticated session is kept between CLI runs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Session file (default: `<config dir>/folio/session.json`)
    pub path: Option<String>,
}

impl SessionConfig {
    /// Resolved session file path
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => PathBuf::from(path),
            None => dirs::config_dir()
                .map(|p| p.join("folio").join("session.json"))
                .unwrap_or_else(|| PathBuf::from("./.folio_session.json")),
        }
    }
}

/// List page defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Delay after the last keystroke before a search is sent
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,
}

fn default_page_size() -> u32 {
    10
}

fn default_search_debounce() -> u64 {
    300
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            search_debounce_ms: default_search_debounce(),
        }
    }
}

/// Public portfolio site server
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8084
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("folio").join("config.toml")),
            Some(PathBuf::from("/etc/folio/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first of `paths` that exists; an unreadable file is an error
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::debug!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::debug!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment in production)
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("FOLIO_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("FOLIO_API_TIMEOUT_SECS").and_then(|t| t.parse().ok()) {
            self.api.request_timeout_secs = timeout;
        }

        // Media overrides
        if let Some(url) = var("FOLIO_MEDIA_UPLOAD_URL") {
            self.media.upload_url = url;
        }
        if let Some(preset) = var("FOLIO_MEDIA_UPLOAD_PRESET") {
            self.media.upload_preset = preset;
        }

        // Session overrides
        if let Some(path) = var("FOLIO_SESSION_PATH") {
            self.session.path = Some(path);
        }

        // Site overrides
        if let Some(host) = var("FOLIO_SITE_HOST") {
            self.site.host = host;
        }
        if let Some(port) = var("FOLIO_SITE_PORT").and_then(|p| p.parse().ok()) {
            self.site.port = port;
        }

        // Logging overrides
        if let Some(level) = var("FOLIO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("FOLIO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Folio Configuration
#
# Environment variables override these settings:
# - FOLIO_API_URL
# - FOLIO_API_TIMEOUT_SECS
# - FOLIO_MEDIA_UPLOAD_URL
# - FOLIO_MEDIA_UPLOAD_PRESET
# - FOLIO_SESSION_PATH
# - FOLIO_SITE_HOST
# - FOLIO_SITE_PORT
# - FOLIO_LOG_LEVEL
# - FOLIO_LOG_FORMAT

[api]
# Portfolio REST API base URL
base_url = "http://localhost:8080/api/v1"

# Request timeout in seconds
request_timeout_secs = 30

[media]
# Unsigned upload endpoint of the media host
upload_url = "https://api.cloudinary.com/v1_1/demo/auto/upload"

# Upload preset configured on the media host
upload_preset = ""

# Upload timeout in seconds
request_timeout_secs = 120

[session]
# Session file (default: <config dir>/folio/session.json)
# path = "/home/me/.config/folio/session.json"

[list]
# Rows per page when the URL does not say otherwise
default_page_size = 10

# Delay after the last keystroke before a search is sent (ms)
search_debounce_ms = 300

[site]
# Public portfolio site host
host = "0.0.0.0"

# Public portfolio site port
port = 8084

# Allowed CORS origins (empty = any)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_file_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.list.default_page_size, 10);
        assert_eq!(config.list.search_debounce_ms, 300);
        assert_eq!(config.site.port, 8084);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[api]\nbase_url = \"https://api.example.com\"\n").unwrap();

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.media.request_timeout_secs, 120);
        assert!(config.session.path.is_none());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FOLIO_API_URL", "https://api.example.com"),
            ("FOLIO_SITE_PORT", "9000"),
            ("FOLIO_MEDIA_UPLOAD_PRESET", "portfolio"),
            ("FOLIO_API_TIMEOUT_SECS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.site.port, 9000);
        assert_eq!(config.media.upload_preset, "portfolio");
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/folio.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_broken_default_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "[api\nbase_url = 1").unwrap();
        let missing = dir.path().join("missing.toml");

        let err = Config::load_first(&[missing.clone(), broken]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let config = Config::load_first(&[missing]).unwrap();
        assert_eq!(config.list.default_page_size, 10);
    }

    #[test]
    fn test_session_path_override() {
        let session = SessionConfig {
            path: Some("/tmp/session.json".to_string()),
        };
        assert_eq!(session.resolved_path(), PathBuf::from("/tmp/session.json"));
    }
}
