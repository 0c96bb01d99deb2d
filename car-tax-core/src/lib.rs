pub mod calculations;
pub mod catalog;
pub mod error;
pub mod models;
pub mod source;

pub use calculations::{DiscountPolicy, DiscountSelection, TaxCalculator};
pub use catalog::VehicleCatalog;
pub use error::{CatalogError, NavigationError, PreconditionError};
pub use models::*;
pub use source::{BracketLoader, LoadError, VehicleLoader};
