//! Configuration management for Attrangi
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::controller::{ControllerOptions, DEFAULT_RESET_GREETING};
use crate::error::{AttrangiError, Result};
use crate::session::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Attrangi
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Assistant service connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Session identifier persistence
    #[serde(default)]
    pub session: SessionConfig,
    /// Chat behavior
    #[serde(default)]
    pub chat: ChatConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Assistant service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/chat`, `/summary` and `/reset` endpoints hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional request timeout (seconds); requests never time out when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_agent() -> String {
    format!("attrangi/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Session identifier persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Database file holding the session id; platform data dir when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Key the session id is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            storage_key: default_storage_key(),
        }
    }
}

/// Chat behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Assistant message shown after a reset
    #[serde(default = "default_reset_greeting")]
    pub reset_greeting: String,

    /// Print the mood badge after each reply
    #[serde(default = "default_show_mood")]
    pub show_mood: bool,
}

fn default_reset_greeting() -> String {
    DEFAULT_RESET_GREETING.to_string()
}

fn default_show_mood() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reset_greeting: default_reset_greeting(),
            show_mood: default_show_mood(),
        }
    }
}

impl ChatConfig {
    /// Controller options derived from this configuration
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            reset_greeting: self.reset_greeting.clone(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,

    /// Also append logs to this file
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "attrangi=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AttrangiError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| AttrangiError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("ATTRANGI_API_URL") {
            tracing::debug!(base_url = %base_url, "Env override: ATTRANGI_API_URL");
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("ATTRANGI_API_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(v) => {
                    self.api.timeout_seconds = Some(v);
                    tracing::debug!(timeout_seconds = v, "Env override: ATTRANGI_API_TIMEOUT_SECONDS");
                }
                Err(_) => {
                    tracing::warn!("Invalid value for ATTRANGI_API_TIMEOUT_SECONDS: {}", timeout);
                }
            }
        }

        if let Ok(db_path) = std::env::var("ATTRANGI_SESSION_DB") {
            tracing::debug!(db_path = %db_path, "Env override: ATTRANGI_SESSION_DB");
            self.session.store_path = Some(PathBuf::from(db_path));
        }

        if let Ok(key) = std::env::var("ATTRANGI_SESSION_KEY") {
            self.session.storage_key = key;
        }

        if let Ok(level) = std::env::var("ATTRANGI_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }

        if let Some(db_path) = &cli.session_db {
            self.session.store_path = Some(db_path.clone());
        }

        if cli.verbose {
            self.logging.level = "attrangi=debug".to_string();
        }

        if cli.json_logs {
            self.logging.json_format = true;
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            AttrangiError::Config(format!("Invalid api.base_url {}: {}", self.api.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AttrangiError::Config(format!(
                "api.base_url must use http or https, got: {}",
                url.scheme()
            ))
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(AttrangiError::Config(format!(
                "api.base_url must not carry a query or fragment: {}",
                self.api.base_url
            ))
            .into());
        }

        if self.api.timeout_seconds == Some(0) {
            return Err(AttrangiError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.storage_key.trim().is_empty() {
            return Err(
                AttrangiError::Config("session.storage_key cannot be empty".to_string()).into(),
            );
        }

        if self.chat.reset_greeting.trim().is_empty() {
            return Err(
                AttrangiError::Config("chat.reset_greeting cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
