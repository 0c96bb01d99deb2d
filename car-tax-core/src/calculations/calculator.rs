//! Registration tax calculation for the catalog's current vehicle.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Price of the current vehicle |
//! | 2    | Bracket containing the price (last match in load order wins) |
//! | 3    | Base payment: price × bracket rate ÷ 100 |
//! | 4    | Early-payment discount (percentage of the running total) |
//! | 5    | Public-service discount (flat amount) |
//! | 6    | Account-transfer discount (percentage of the running total) |
//!
//! No rounding is applied and the payment may end up negative when the flat
//! public-service discount exceeds the base payment.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use car_tax_core::calculations::{DiscountSelection, TaxCalculator};
//! use car_tax_core::{TaxBracket, Vehicle, VehicleCatalog};
//!
//! let catalog = VehicleCatalog::new(vec![
//!     Vehicle::new("Mazda", "Allegro", "2008", dec!(1000000), "allegro.jpg").unwrap(),
//! ]);
//! let brackets = vec![TaxBracket::new(dec!(0), dec!(30000000), dec!(5)).unwrap()];
//!
//! let calculator = TaxCalculator::new(catalog, brackets);
//!
//! let selection = DiscountSelection {
//!     early_payment: true,
//!     ..DiscountSelection::none()
//! };
//! assert_eq!(calculator.compute_payment(selection).unwrap(), dec!(45000));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::calculations::discounts::{
    DiscountPolicy, DiscountPolicyError, DiscountSelection, percentage_of,
};
use crate::catalog::VehicleCatalog;
use crate::error::{CatalogError, PreconditionError};
use crate::models::{TaxBracket, Vehicle};
use crate::source::{BracketLoader, LoadError, VehicleLoader};

/// Every intermediate amount of a payment calculation.
///
/// Discount fields hold the amount actually subtracted, zero when the
/// discount was not selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentBreakdown {
    /// Price of the vehicle the payment was computed for.
    pub price: Decimal,

    /// The bracket that supplied the rate.
    pub bracket: TaxBracket,

    /// Payment before any discount.
    pub base_payment: Decimal,

    pub early_payment_discount: Decimal,

    pub public_service_discount: Decimal,

    pub account_transfer_discount: Decimal,

    /// Final amount due.
    pub payment: Decimal,
}

/// Owns the vehicle catalog and the bracket table and computes payments.
#[derive(Debug, Clone)]
pub struct TaxCalculator {
    catalog: VehicleCatalog,
    brackets: Vec<TaxBracket>,
    discounts: DiscountPolicy,
}

impl TaxCalculator {
    /// Creates a calculator using the default discount policy.
    pub fn new(
        catalog: VehicleCatalog,
        brackets: Vec<TaxBracket>,
    ) -> Self {
        Self::assemble(catalog, brackets, DiscountPolicy::default())
    }

    /// Creates a calculator with a custom discount policy.
    ///
    /// # Errors
    ///
    /// The [`DiscountPolicyError`] reported by [`DiscountPolicy::validate`].
    pub fn with_discounts(
        catalog: VehicleCatalog,
        brackets: Vec<TaxBracket>,
        discounts: DiscountPolicy,
    ) -> Result<Self, DiscountPolicyError> {
        discounts.validate()?;
        Ok(Self::assemble(catalog, brackets, discounts))
    }

    fn assemble(
        catalog: VehicleCatalog,
        brackets: Vec<TaxBracket>,
        discounts: DiscountPolicy,
    ) -> Self {
        if brackets.is_empty() {
            warn!("tax calculator created without any tax brackets");
        }
        Self {
            catalog,
            brackets,
            discounts,
        }
    }

    /// Builds a calculator from the two data sources.
    ///
    /// # Errors
    ///
    /// [`LoadError::InvalidDiscounts`] for a policy that fails validation,
    /// any [`LoadError`] reported by the loaders, or
    /// [`LoadError::EmptyCatalog`] when no vehicle was loaded.
    pub fn load(
        vehicles: &dyn VehicleLoader,
        brackets: &dyn BracketLoader,
        discounts: DiscountPolicy,
    ) -> Result<Self, LoadError> {
        discounts.validate()?;

        let vehicles = vehicles.load_vehicles()?;
        if vehicles.is_empty() {
            return Err(LoadError::EmptyCatalog);
        }
        let brackets = brackets.load_brackets()?;

        debug!(
            vehicles = vehicles.len(),
            brackets = brackets.len(),
            "tax calculator data loaded"
        );

        Ok(Self::assemble(
            VehicleCatalog::new(vehicles),
            brackets,
            discounts,
        ))
    }

    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    /// Brackets in load order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn discounts(&self) -> &DiscountPolicy {
        &self.discounts
    }

    /// Bracket containing `price`. When brackets overlap, the one loaded
    /// last wins.
    pub fn find_bracket(
        &self,
        price: Decimal,
    ) -> Option<&TaxBracket> {
        let mut matching = self.brackets.iter().filter(|b| b.contains(price));
        let first = matching.next()?;

        match matching.last() {
            Some(last) => {
                warn!(
                    price = %price,
                    rate = %last.rate_percent(),
                    "price falls in overlapping tax brackets; using the last one loaded"
                );
                Some(last)
            }
            None => Some(first),
        }
    }

    /// Payment due for the current vehicle with the selected discounts.
    ///
    /// # Errors
    ///
    /// * [`PreconditionError::EmptyCatalog`] if there is no current vehicle.
    /// * [`PreconditionError::NoMatchingBracket`] if no bracket contains the price.
    /// * [`PreconditionError::ArithmeticOverflow`] if an amount exceeds the `Decimal` range.
    pub fn compute_payment(
        &self,
        selection: DiscountSelection,
    ) -> Result<Decimal, PreconditionError> {
        Ok(self.calculate(selection)?.payment)
    }

    /// Same as [`compute_payment`](Self::compute_payment) but keeps every
    /// intermediate amount.
    pub fn calculate(
        &self,
        selection: DiscountSelection,
    ) -> Result<PaymentBreakdown, PreconditionError> {
        let price = self.catalog.current()?.price();

        let bracket = self
            .find_bracket(price)
            .ok_or(PreconditionError::NoMatchingBracket { price })?;

        let base_payment =
            percentage_of(price, bracket.rate_percent()).ok_or(overflow("base payment"))?;
        let mut payment = base_payment;

        let early_payment_discount = if selection.early_payment {
            self.discounts
                .early_payment_discount(payment)
                .ok_or(overflow("early payment discount"))?
        } else {
            Decimal::ZERO
        };
        payment = subtract(payment, early_payment_discount)?;

        let public_service_discount = if selection.public_service {
            self.discounts.public_service_discount()
        } else {
            Decimal::ZERO
        };
        payment = subtract(payment, public_service_discount)?;

        let account_transfer_discount = if selection.account_transfer {
            self.discounts
                .account_transfer_discount(payment)
                .ok_or(overflow("account transfer discount"))?
        } else {
            Decimal::ZERO
        };
        payment = subtract(payment, account_transfer_discount)?;

        debug!(
            price = %price,
            rate = %bracket.rate_percent(),
            base_payment = %base_payment,
            payment = %payment,
            "registration tax computed"
        );
        if payment < Decimal::ZERO {
            warn!(
                payment = %payment,
                "discounts exceed the base payment; payment is negative"
            );
        }

        Ok(PaymentBreakdown {
            price,
            bracket: bracket.clone(),
            base_payment,
            early_payment_discount,
            public_service_discount,
            account_transfer_discount,
            payment,
        })
    }

    // -------------------------------------------------------------------------
    // Catalog delegation
    // -------------------------------------------------------------------------

    pub fn current(&self) -> Result<&Vehicle, PreconditionError> {
        self.catalog.current()
    }

    pub fn first(&mut self) -> Result<&Vehicle, CatalogError> {
        self.catalog.first()
    }

    pub fn previous(&mut self) -> Result<&Vehicle, CatalogError> {
        self.catalog.previous()
    }

    pub fn next(&mut self) -> Result<&Vehicle, CatalogError> {
        self.catalog.next()
    }

    pub fn last(&mut self) -> Result<&Vehicle, CatalogError> {
        self.catalog.last()
    }

    pub fn find_most_expensive(&self) -> Option<&Vehicle> {
        self.catalog.find_most_expensive()
    }

    pub fn find_by_make(
        &self,
        make: &str,
    ) -> Option<&Vehicle> {
        self.catalog.find_by_make(make)
    }

    pub fn find_by_line(
        &self,
        line: &str,
    ) -> Option<&Vehicle> {
        self.catalog.find_by_line(line)
    }

    pub fn find_oldest(&self) -> Result<&Vehicle, PreconditionError> {
        self.catalog.find_oldest()
    }

    pub fn average_price(&self) -> Result<Decimal, PreconditionError> {
        self.catalog.average_price()
    }
}

fn overflow(step: &'static str) -> PreconditionError {
    PreconditionError::ArithmeticOverflow(step)
}

fn subtract(
    payment: Decimal,
    discount: Decimal,
) -> Result<Decimal, PreconditionError> {
    payment
        .checked_sub(discount)
        .ok_or(overflow("discounted payment"))
}
