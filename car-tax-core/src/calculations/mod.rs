//! Registration tax calculation.
//!
//! [`TaxCalculator`] looks up the bracket for the current catalog vehicle and
//! applies the discounts described by a [`DiscountPolicy`].

pub mod calculator;
pub mod discounts;

pub use calculator::{PaymentBreakdown, TaxCalculator};
pub use discounts::{
    ACCOUNT_TRANSFER_DISCOUNT_PERCENT, DiscountPolicy, DiscountPolicyError, DiscountSelection,
    EARLY_PAYMENT_DISCOUNT_PERCENT, PUBLIC_SERVICE_DISCOUNT_AMOUNT,
};
