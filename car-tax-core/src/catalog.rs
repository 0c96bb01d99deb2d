//! Cursor-based browsing over a fixed list of vehicles.
//!
//! The catalog keeps vehicles in load order and a single cursor pointing at
//! the "current" vehicle. Only the four navigation methods move the cursor;
//! every search is read-only.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use car_tax_core::{CatalogError, NavigationError, Vehicle, VehicleCatalog};
//!
//! let mut catalog = VehicleCatalog::new(vec![
//!     Vehicle::new("Mazda", "Allegro", "2008", dec!(28000000), "allegro.jpg").unwrap(),
//!     Vehicle::new("Kia", "Picanto", "2011", dec!(21000000), "picanto.jpg").unwrap(),
//! ]);
//!
//! assert_eq!(catalog.next().unwrap().make(), "Kia");
//! assert_eq!(
//!     catalog.next().unwrap_err(),
//!     CatalogError::Navigation(NavigationError::AtLast)
//! );
//! assert_eq!(catalog.find_by_make("mazda").unwrap().line(), "Allegro");
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CatalogError, NavigationError, PreconditionError};
use crate::models::Vehicle;

/// Ordered vehicles plus a cursor into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleCatalog {
    vehicles: Vec<Vehicle>,
    cursor: usize,
}

impl VehicleCatalog {
    /// Creates a catalog positioned on the first vehicle.
    ///
    /// An empty vector is accepted; operations that need a vehicle then fail
    /// with [`PreconditionError::EmptyCatalog`].
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Index of the current vehicle.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Vehicles in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn current(&self) -> Result<&Vehicle, PreconditionError> {
        self.vehicles
            .get(self.cursor)
            .ok_or(PreconditionError::EmptyCatalog)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn first(&mut self) -> Result<&Vehicle, CatalogError> {
        if self.cursor == 0 {
            return Err(CatalogError::Navigation(NavigationError::AtFirst));
        }
        self.move_to(0)
    }

    pub fn previous(&mut self) -> Result<&Vehicle, CatalogError> {
        if self.cursor == 0 {
            return Err(CatalogError::Navigation(NavigationError::AtFirst));
        }
        self.move_to(self.cursor - 1)
    }

    pub fn next(&mut self) -> Result<&Vehicle, CatalogError> {
        if self.cursor == self.last_index()? {
            return Err(CatalogError::Navigation(NavigationError::AtLast));
        }
        self.move_to(self.cursor + 1)
    }

    pub fn last(&mut self) -> Result<&Vehicle, CatalogError> {
        let last = self.last_index()?;
        if self.cursor == last {
            return Err(CatalogError::Navigation(NavigationError::AtLast));
        }
        self.move_to(last)
    }

    fn last_index(&self) -> Result<usize, PreconditionError> {
        self.vehicles
            .len()
            .checked_sub(1)
            .ok_or(PreconditionError::EmptyCatalog)
    }

    fn move_to(
        &mut self,
        index: usize,
    ) -> Result<&Vehicle, CatalogError> {
        debug!(from = self.cursor, to = index, "moving catalog cursor");
        self.cursor = index;
        Ok(self.current()?)
    }

    // -------------------------------------------------------------------------
    // Searches
    // -------------------------------------------------------------------------

    /// Vehicle with the strictly greatest price; the earliest one wins ties.
    ///
    /// The cursor is left where it is. Returns `None` for an empty catalog.
    pub fn find_most_expensive(&self) -> Option<&Vehicle> {
        let mut most_expensive = None;
        let mut highest_price = Decimal::ZERO;

        for vehicle in &self.vehicles {
            if vehicle.price() > highest_price {
                highest_price = vehicle.price();
                most_expensive = Some(vehicle);
            }
        }

        most_expensive
    }

    /// Case-insensitive search on make. When several vehicles match, the one
    /// loaded last is returned.
    pub fn find_by_make(
        &self,
        make: &str,
    ) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .rfind(|vehicle| eq_ignore_case(vehicle.make(), make))
    }

    /// Case-insensitive search on model line, last match wins.
    pub fn find_by_line(
        &self,
        line: &str,
    ) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .rfind(|vehicle| eq_ignore_case(vehicle.line(), line))
    }

    /// Vehicle with the smallest model year; the earliest one wins ties.
    pub fn find_oldest(&self) -> Result<&Vehicle, PreconditionError> {
        let (first, rest) = self
            .vehicles
            .split_first()
            .ok_or(PreconditionError::EmptyCatalog)?;

        Ok(rest.iter().fold(first, |oldest, vehicle| {
            if vehicle.model_year() < oldest.model_year() {
                vehicle
            } else {
                oldest
            }
        }))
    }

    /// Arithmetic mean of every price in the catalog.
    pub fn average_price(&self) -> Result<Decimal, PreconditionError> {
        if self.vehicles.is_empty() {
            return Err(PreconditionError::EmptyCatalog);
        }

        let total = self
            .vehicles
            .iter()
            .try_fold(Decimal::ZERO, |total, vehicle| total.checked_add(vehicle.price()))
            .ok_or(PreconditionError::ArithmeticOverflow("total price"))?;
        Ok(total / Decimal::from(self.vehicles.len()))
    }
}

fn eq_ignore_case(
    a: &str,
    b: &str,
) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
