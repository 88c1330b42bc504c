//! Configuration management for ezpay
//!
//! This module handles loading, validation, and management of
//! ezpay configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow cross-origin requests from browser front-ends
    #[serde(default = "default_true")]
    pub cors_enable: bool,
    /// Artificial delay added to every registry call, in milliseconds
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enable: true,
            simulated_latency_ms: 0,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

/// Transaction registry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Probability that processing a pending transaction succeeds
    #[serde(default = "default_success_probability")]
    pub success_probability: f64,
    /// Seed for the outcome generator; entropy is used when absent
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Reject status updates that leave SUCCESS or FAILED
    #[serde(default)]
    pub enforce_terminal_status: bool,
    /// Default number of records returned by the recent endpoint
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Load the demo history on startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            success_probability: default_success_probability(),
            rng_seed: None,
            enforce_terminal_status: false,
            recent_limit: default_recent_limit(),
            seed_demo_data: false,
        }
    }
}

fn default_success_probability() -> f64 {
    0.8
}

fn default_recent_limit() -> usize {
    5
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Registry settings
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let p = self.registry.success_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidValue {
                field: "registry.success_probability".to_string(),
                reason: "Probability must be between 0.0 and 1.0".to_string(),
            });
        }

        if self.registry.recent_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "registry.recent_limit".to_string(),
                reason: "Recent limit must be at least 1".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolve the config path, falling back to defaults when the file is absent
    pub fn load_or_default(path: PathBuf) -> Result<(Self, bool), ConfigError> {
        match Self::load(&path) {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::FileNotFound { .. }) => Ok((Self::default(), false)),
            Err(e) => Err(e),
        }
    }
}

// ==================== Tests ====================
