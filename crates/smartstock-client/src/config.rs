//! # Client Configuration
//!
//! Where the backend is and who is operating the register.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SMARTSTOCK_API_URL=http://192.168.1.20:5000/api                    │
//! │     SMARTSTOCK_TIMEOUT_SECS=10                                         │
//! │     SMARTSTOCK_USER_ID=3                                               │
//! │     SMARTSTOCK_OPERATOR_NAME="Caja 2"                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/smartstock/smartstock.toml (Linux)                       │
//! │     ~/Library/Application Support/com.smartstock.smartstock/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:5000/api, 30s timeout, user 1                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # smartstock.toml
//! [api]
//! base_url = "http://localhost:5000/api"
//! timeout_secs = 30
//!
//! [operator]
//! user_id = 1
//! name = "Caja 1"
//!
//! [pos]
//! open_ticket_urls = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ConfigError;

pub const ENV_API_URL: &str = "SMARTSTOCK_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "SMARTSTOCK_TIMEOUT_SECS";
pub const ENV_USER_ID: &str = "SMARTSTOCK_USER_ID";
pub const ENV_OPERATOR_NAME: &str = "SMARTSTOCK_OPERATOR_NAME";

// =============================================================================
// Sections
// =============================================================================

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Root of the REST API; endpoint paths are joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Who is operating this register. The user id is sent when closing the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorSettings {
    #[serde(default = "default_user_id")]
    pub user_id: i64,

    #[serde(default = "default_operator_name")]
    pub name: String,
}

fn default_user_id() -> i64 {
    1
}

fn default_operator_name() -> String {
    "Caja 1".to_string()
}

impl Default for OperatorSettings {
    fn default() -> Self {
        OperatorSettings {
            user_id: default_user_id(),
            name: default_operator_name(),
        }
    }
}

/// Checkout behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosSettings {
    /// Show the ticket URL returned by a registered sale.
    #[serde(default)]
    pub open_ticket_urls: bool,
}

// =============================================================================
// Client Config
// =============================================================================

/// Complete configuration, one section per concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub operator: OperatorSettings,

    #[serde(default)]
    pub pos: PosSettings,
}

impl ClientConfig {
    /// Config pointing at `base_url` with every other value defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ClientConfig {
            api: ApiSettings {
                base_url: base_url.into(),
                ..ApiSettings::default()
            },
            ..ClientConfig::default()
        }
    }

    /// Loads configuration: defaults, then the file, then the environment.
    ///
    /// `config_path` falls back to the platform config directory. A missing
    /// file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML, creating the directory if needed.
    pub fn save(&self, config_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("no config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Invalid(format!("base_url '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.operator.user_id <= 0 {
            return Err(ConfigError::Invalid(
                "operator.user_id must be a positive id".into(),
            ));
        }

        Ok(())
    }

    /// Applies `SMARTSTOCK_*` overrides read through `lookup`.
    ///
    /// Unparseable numbers are ignored with a warning.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        if let Some(user_id) = lookup(ENV_USER_ID) {
            match user_id.parse::<i64>() {
                Ok(id) => {
                    debug!(user_id = id, "Overriding operator from environment");
                    self.operator.user_id = id;
                }
                Err(_) => warn!(value = %user_id, "Ignoring invalid {}", ENV_USER_ID),
            }
        }

        if let Some(name) = lookup(ENV_OPERATOR_NAME) {
            self.operator.name = name;
        }
    }

    /// Platform config file location.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "smartstock", "smartstock")
            .map(|dirs| dirs.config_dir().join("smartstock.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn user_id(&self) -> i64 {
        self.operator.user_id
    }
}
