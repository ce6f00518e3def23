//! Client configuration management.
//!
//! Handles loading, saving, and accessing the API credentials, base URL and
//! logging preferences. Configuration is persisted as TOML on disk and may be
//! overridden from the environment.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::{self, paths};
use crate::error::{AirshipError, AirshipResult};
use crate::platform::Platform;

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root (e.g. "https://go.urbanairship.com/api"). Point this at a mock
    /// server in tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Application key.
    #[serde(default)]
    pub key: String,

    /// Application master secret.
    #[serde(default)]
    pub secret: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub timeout_ms: u64,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_base_url() -> String {
    constants::DEFAULT_BASE_URL.to_string()
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_user_agent() -> String {
    format!("ua-rust/{}", constants::APP_VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: String::new(),
            secret: String::new(),
            timeout_ms: default_api_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ApiConfig {
    /// Build a config for the given credential pair against the production API.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Replace the API root, e.g. with a mock server address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fail with `MissingConfig` unless both halves of the credential pair are set.
    pub fn validate(&self) -> AirshipResult<()> {
        if self.key.is_empty() {
            return Err(AirshipError::MissingConfig("api.key".into()));
        }
        if self.secret.is_empty() {
            return Err(AirshipError::MissingConfig("api.secret".into()));
        }
        if AppConfig::sanitize_base_url(&self.base_url).is_empty() {
            return Err(AirshipError::MissingConfig("api.base_url".into()));
        }
        Ok(())
    }

    /// Resolve every endpoint URL from the base URL.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.base_url)
    }
}

/// Endpoint URLs, resolved once from the API root at client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base: String,
    pub device_tokens: String,
    pub push: String,
    pub broadcast: String,
    pub feedback: String,
    pub rich_push: String,
    pub user: String,
}

impl Endpoints {
    /// Resolve the endpoint table for an API root.
    pub fn new(base_url: &str) -> Self {
        let base = AppConfig::sanitize_base_url(base_url);
        let join = |path: &str| format!("{base}/{path}");
        Self {
            device_tokens: join(paths::DEVICE_TOKENS),
            push: join(paths::PUSH),
            broadcast: join(paths::BROADCAST),
            feedback: join(paths::FEEDBACK),
            rich_push: join(paths::RICH_PUSH),
            user: join(paths::USER),
            base,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(constants::DEFAULT_BASE_URL)
    }
}

impl AppConfig {
    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> AirshipResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the file at `path`, or defaults when it does not exist yet.
    /// Environment overrides are not applied.
    pub fn load_or_default(path: &Path) -> AirshipResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> AirshipResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AirshipError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> AirshipResult<PathBuf> {
        let config_dir = Platform::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> AirshipResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let data_dir = Platform::data_dir()?;
            Ok(data_dir.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Check whether the credential pair is configured.
    pub fn is_configured(&self) -> bool {
        !self.api.key.is_empty() && !self.api.secret.is_empty()
    }

    /// Apply `AIRSHIP_KEY`, `AIRSHIP_SECRET` and `AIRSHIP_BASE_URL` on top of
    /// the loaded values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`, keyed by the `AIRSHIP_*` variable names.
    /// Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty(constants::env::KEY) {
            self.api.key = key;
        }
        if let Some(secret) = non_empty(constants::env::SECRET) {
            self.api.secret = secret;
        }
        if let Some(base_url) = non_empty(constants::env::BASE_URL) {
            self.api.base_url = base_url;
        }
    }

    /// Sanitize and normalize an API root.
    ///
    /// Trims whitespace and quotes, strips trailing slashes, and defaults the
    /// scheme to https.
    pub fn sanitize_base_url(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}
