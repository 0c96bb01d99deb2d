//! Error taxonomy shared by the catalog and the calculator.
//!
//! | Error                | Meaning                                          | Recoverable |
//! |----------------------|--------------------------------------------------|-------------|
//! | [`NavigationError`]  | The cursor is already at a catalog boundary      | yes         |
//! | [`PreconditionError`]| Catalog or bracket table cannot serve the call   | no (fix data) |
//! | [`CatalogError`]     | Either of the above, returned by navigation      | depends     |
//!
//! Searches that find nothing return `None` rather than an error.
//! Load failures live in [`crate::source::LoadError`].

use rust_decimal::Decimal;
use thiserror::Error;

/// The cursor cannot move further in the requested direction.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("already at the first vehicle")]
    AtFirst,

    #[error("already at the last vehicle")]
    AtLast,
}

/// An operation was invoked on data that cannot satisfy it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("the vehicle catalog is empty")]
    EmptyCatalog,

    #[error("no tax bracket contains price {price}")]
    NoMatchingBracket { price: Decimal },

    /// An intermediate amount does not fit in a `Decimal`.
    #[error("arithmetic overflow while computing {0}")]
    ArithmeticOverflow(&'static str),
}

/// Failure of a cursor navigation call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}
