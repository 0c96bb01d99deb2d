use thiserror::Error;

use crate::calculations::DiscountPolicyError;
use crate::models::{TaxBracket, Vehicle};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("cannot read data source: {0}")]
    Io(String),

    /// The record count header is missing or not a number.
    #[error("invalid record count '{0}'")]
    InvalidCount(String),

    /// Fewer records than announced by the count header.
    #[error("expected {expected} records but found {found}")]
    MissingRecords { expected: usize, found: usize },

    /// A vehicle record could not be parsed or violates the vehicle invariants.
    /// `record` is 1-based.
    #[error("malformed vehicle record {record}: {reason}")]
    MalformedRecord { record: usize, reason: String },

    /// A required key is absent from a key-value source.
    #[error("missing key '{0}'")]
    MissingKey(String),

    /// A bracket definition could not be parsed or violates the bracket invariants.
    #[error("invalid bracket definition '{key}': {reason}")]
    InvalidBracket { key: String, reason: String },

    /// The discount policy handed to the calculator failed validation.
    #[error("invalid discount policy: {0}")]
    InvalidDiscounts(#[from] DiscountPolicyError),

    /// The vehicle source produced no vehicles.
    #[error("the vehicle source contains no vehicles")]
    EmptyCatalog,
}

pub trait VehicleLoader {
    /// Vehicles in source order.
    fn load_vehicles(&self) -> Result<Vec<Vehicle>, LoadError>;
}

pub trait BracketLoader {
    /// Brackets in source order.
    fn load_brackets(&self) -> Result<Vec<TaxBracket>, LoadError>;
}
