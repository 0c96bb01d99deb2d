mod tax_bracket;
mod vehicle;

pub use tax_bracket::{TaxBracket, TaxBracketError};
pub use vehicle::{Vehicle, VehicleError};
