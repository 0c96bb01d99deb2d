//! TOML configuration for the data sources, discount amounts and logging.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [sources]
//! vehicles = "data/vehiculos.txt"
//! brackets = "data/impuestos.properties"
//!
//! [discounts]
//! early_payment_percent = 10
//! public_service_amount = 50000
//! account_transfer_percent = 5
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use car_tax_core::DiscountPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default location of the vehicle catalog.
pub const DEFAULT_VEHICLES_PATH: &str = "data/vehiculos.txt";

/// Default location of the bracket table.
pub const DEFAULT_BRACKETS_PATH: &str = "data/impuestos.properties";

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Discount amounts; omitted fields keep the statutory defaults.
    #[serde(default)]
    pub discounts: DiscountPolicy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the vehicle catalog and the bracket table are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_vehicles_path")]
    pub vehicles: PathBuf,

    #[serde(default = "default_brackets_path")]
    pub brackets: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            vehicles: default_vehicles_path(),
            brackets: default_brackets_path(),
        }
    }
}

fn default_vehicles_path() -> PathBuf {
    PathBuf::from(DEFAULT_VEHICLES_PATH)
}

fn default_brackets_path() -> PathBuf {
    PathBuf::from(DEFAULT_BRACKETS_PATH)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset (e.g. "info", "car_tax_core=debug").
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

impl AppConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.vehicles.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sources.vehicles must not be empty".to_string(),
            ));
        }
        if self.sources.brackets.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sources.brackets must not be empty".to_string(),
            ));
        }
        self.discounts
            .validate()
            .map_err(|e| ConfigError::Validation(format!("discounts: {e}")))?;
        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::Validation(format!(
                "logging.level {:?} is not a valid filter: {e}",
                self.logging.level
            ))
        })?;
        Ok(())
    }
}
