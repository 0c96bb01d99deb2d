//! Discount rules applied to the base registration tax.
//!
//! Three discounts exist and, when selected, are applied in this fixed order,
//! each one against the running total left by the previous step:
//!
//! | Step | Discount         | Kind                     | Default |
//! |------|------------------|--------------------------|---------|
//! | 1    | Early payment    | percentage of the total  | 10%     |
//! | 2    | Public service   | flat amount subtracted   | 50,000  |
//! | 3    | Account transfer | percentage of the total  | 5%      |
//!
//! Swapping steps changes the result, so the order is part of the contract.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Percentage discount for paying before the deadline.
pub const EARLY_PAYMENT_DISCOUNT_PERCENT: Decimal = dec!(10.0);

/// Flat amount discounted for public-service vehicles.
pub const PUBLIC_SERVICE_DISCOUNT_AMOUNT: Decimal = dec!(50000.0);

/// Percentage discount for transferring the vehicle's account.
pub const ACCOUNT_TRANSFER_DISCOUNT_PERCENT: Decimal = dec!(5.0);

/// Errors raised by [`DiscountPolicy::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscountPolicyError {
    #[error("early payment discount must be between 0 and 100 percent, got {0}")]
    InvalidEarlyPaymentPercent(Decimal),

    #[error("public service discount must be non-negative, got {0}")]
    InvalidPublicServiceAmount(Decimal),

    #[error("account transfer discount must be between 0 and 100 percent, got {0}")]
    InvalidAccountTransferPercent(Decimal),
}

/// The amounts behind each discount.
///
/// Missing fields deserialize to the statutory defaults, so a configuration
/// file only needs to name the values it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountPolicy {
    /// Percentage taken off for early payment.
    pub early_payment_percent: Decimal,

    /// Flat amount taken off for public-service vehicles.
    pub public_service_amount: Decimal,

    /// Percentage taken off for an account transfer.
    pub account_transfer_percent: Decimal,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            early_payment_percent: EARLY_PAYMENT_DISCOUNT_PERCENT,
            public_service_amount: PUBLIC_SERVICE_DISCOUNT_AMOUNT,
            account_transfer_percent: ACCOUNT_TRANSFER_DISCOUNT_PERCENT,
        }
    }
}

impl DiscountPolicy {
    /// Checks that percentages lie in `[0, 100]` and the flat amount is not negative.
    pub fn validate(&self) -> Result<(), DiscountPolicyError> {
        if !is_percentage(self.early_payment_percent) {
            return Err(DiscountPolicyError::InvalidEarlyPaymentPercent(
                self.early_payment_percent,
            ));
        }
        if self.public_service_amount < Decimal::ZERO {
            return Err(DiscountPolicyError::InvalidPublicServiceAmount(
                self.public_service_amount,
            ));
        }
        if !is_percentage(self.account_transfer_percent) {
            return Err(DiscountPolicyError::InvalidAccountTransferPercent(
                self.account_transfer_percent,
            ));
        }
        Ok(())
    }

    /// `None` when the amount overflows.
    pub(crate) fn early_payment_discount(
        &self,
        payment: Decimal,
    ) -> Option<Decimal> {
        percentage_of(payment, self.early_payment_percent)
    }

    pub(crate) fn public_service_discount(&self) -> Decimal {
        self.public_service_amount
    }

    pub(crate) fn account_transfer_discount(
        &self,
        payment: Decimal,
    ) -> Option<Decimal> {
        percentage_of(payment, self.account_transfer_percent)
    }
}

/// `amount * percent / 100`, or `None` on overflow.
pub(crate) fn percentage_of(
    amount: Decimal,
    percent: Decimal,
) -> Option<Decimal> {
    amount
        .checked_mul(percent)?
        .checked_div(Decimal::ONE_HUNDRED)
}

fn is_percentage(value: Decimal) -> bool {
    (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&value)
}

/// Which discounts the owner qualifies for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSelection {
    pub early_payment: bool,
    pub public_service: bool,
    pub account_transfer: bool,
}

impl DiscountSelection {
    /// No discounts at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every discount.
    pub fn all() -> Self {
        Self {
            early_payment: true,
            public_service: true,
            account_transfer: true,
        }
    }
}
