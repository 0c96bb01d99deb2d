use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors raised when a vehicle record violates its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VehicleError {
    #[error("vehicle price must be positive, got {0}")]
    InvalidPrice(Decimal),

    #[error("vehicle year '{0}' is not a number")]
    InvalidYear(String),
}

/// A catalog entry. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    make: String,
    line: String,
    year: String,
    #[serde(skip)]
    model_year: i32,
    price: Decimal,
    image_ref: String,
}

impl Vehicle {
    /// Builds a vehicle, rejecting non-positive prices and non-numeric years.
    pub fn new(
        make: impl Into<String>,
        line: impl Into<String>,
        year: impl Into<String>,
        price: Decimal,
        image_ref: impl Into<String>,
    ) -> Result<Self, VehicleError> {
        let year = year.into();
        let model_year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| VehicleError::InvalidYear(year.clone()))?;

        if price <= Decimal::ZERO {
            return Err(VehicleError::InvalidPrice(price));
        }

        Ok(Self {
            make: make.into(),
            line: line.into(),
            year,
            model_year,
            price,
            image_ref: image_ref.into(),
        })
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    /// The model line within the make (e.g. "Mazda 3").
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The model year as it appeared in the source data.
    pub fn year(&self) -> &str {
        &self.year
    }

    /// The model year parsed as a number.
    pub fn model_year(&self) -> i32 {
        self.model_year
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Opaque reference to the vehicle's picture, kept for presentation layers.
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }
}
