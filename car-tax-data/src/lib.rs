//! File-backed data sources for the registration tax calculator.
//!
//! - [`VehicleFileLoader`] reads the vehicle catalog text file.
//! - [`BracketFileLoader`] reads the tax bracket properties file.
//! - [`AppConfig`] holds the TOML configuration used by `car-tax-check`.

pub mod bracket_loader;
pub mod config;
pub mod decimal;
pub mod logging;
pub mod properties;
pub mod vehicle_loader;

use std::io;
use std::path::Path;

use car_tax_core::LoadError;

pub use bracket_loader::BracketFileLoader;
pub use config::{AppConfig, ConfigError};
pub use properties::Properties;
pub use vehicle_loader::VehicleFileLoader;

pub(crate) fn read_error(
    path: &Path,
    err: &io::Error,
) -> LoadError {
    LoadError::Io(format!("{}: {err}", path.display()))
}
