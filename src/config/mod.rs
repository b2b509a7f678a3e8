//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::calculate::{
    symmetric_range, HandicapError, DEFAULT_HANDICAP_PER_SIDE, DEFAULT_HANDICAP_START,
    DEFAULT_HANDICAP_STEP,
};
use crate::models::HandicapRange;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid handicap range: {0}")]
    HandicapError(#[from] HandicapError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Handicap sweep parameters.
///
/// The range is `±(start + step * i)` for `i in 0..per_side`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandicapConfig {
    #[serde(default = "default_handicap_start")]
    pub start: f64,

    #[serde(default = "default_handicap_step")]
    pub step: f64,

    #[serde(default = "default_handicap_per_side")]
    pub per_side: usize,
}

fn default_handicap_start() -> f64 {
    DEFAULT_HANDICAP_START
}

fn default_handicap_step() -> f64 {
    DEFAULT_HANDICAP_STEP
}

fn default_handicap_per_side() -> usize {
    DEFAULT_HANDICAP_PER_SIDE
}

impl Default for HandicapConfig {
    fn default() -> Self {
        Self {
            start: default_handicap_start(),
            step: default_handicap_step(),
            per_side: default_handicap_per_side(),
        }
    }
}

impl HandicapConfig {
    /// Build the range once; callers share the result.
    pub fn build_range(&self) -> Result<HandicapRange, HandicapError> {
        symmetric_range(self.start, self.step, self.per_side)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Requests still computing after this are abandoned
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub handicap: HandicapConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            handicap: HandicapConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        self.handicap.build_range()?;
        Ok(())
    }
}
