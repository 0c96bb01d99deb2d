pub mod loader;

pub use loader::{BracketLoader, LoadError, VehicleLoader};
