use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors raised when a bracket definition violates its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxBracketError {
    /// The lower bound must be strictly below the upper bound.
    #[error("lower bound {lower} must be below upper bound {upper}")]
    InvalidBounds { lower: Decimal, upper: Decimal },

    /// The rate must be a positive percentage.
    #[error("tax rate must be positive, got {0}")]
    InvalidRate(Decimal),
}

/// A half-open price interval `[lower_bound, upper_bound)` and the tax rate
/// (in percent) that applies to prices inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBracket {
    lower_bound: Decimal,
    upper_bound: Decimal,
    rate_percent: Decimal,
}

impl TaxBracket {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Decimal,
        rate_percent: Decimal,
    ) -> Result<Self, TaxBracketError> {
        if lower_bound >= upper_bound {
            return Err(TaxBracketError::InvalidBounds {
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        if rate_percent <= Decimal::ZERO {
            return Err(TaxBracketError::InvalidRate(rate_percent));
        }

        Ok(Self {
            lower_bound,
            upper_bound,
            rate_percent,
        })
    }

    pub fn lower_bound(&self) -> Decimal {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> Decimal {
        self.upper_bound
    }

    pub fn rate_percent(&self) -> Decimal {
        self.rate_percent
    }

    /// Returns `true` when `lower_bound <= price < upper_bound`.
    pub fn contains(
        &self,
        price: Decimal,
    ) -> bool {
        price >= self.lower_bound && price < self.upper_bound
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(
        lower: Decimal,
        upper: Decimal,
    ) -> TaxBracket {
        TaxBracket::new(lower, upper, dec!(1.5)).expect("valid bracket")
    }

    // =========================================================================
    // constructor tests
    // =========================================================================

    #[test]
    fn new_accepts_valid_bracket() {
        let result = TaxBracket::new(dec!(0), dec!(30000000), dec!(1.5));

        let bracket = result.expect("valid bracket");
        assert_eq!(bracket.lower_bound(), dec!(0));
        assert_eq!(bracket.upper_bound(), dec!(30000000));
        assert_eq!(bracket.rate_percent(), dec!(1.5));
    }

    #[test]
    fn new_rejects_equal_bounds() {
        let result = TaxBracket::new(dec!(100), dec!(100), dec!(2));

        assert_eq!(
            result,
            Err(TaxBracketError::InvalidBounds {
                lower: dec!(100),
                upper: dec!(100),
            })
        );
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        let result = TaxBracket::new(dec!(500), dec!(100), dec!(2));

        assert!(matches!(result, Err(TaxBracketError::InvalidBounds { .. })));
    }

    #[test]
    fn new_rejects_zero_rate() {
        let result = TaxBracket::new(dec!(0), dec!(100), dec!(0));

        assert_eq!(result, Err(TaxBracketError::InvalidRate(dec!(0))));
    }

    #[test]
    fn new_rejects_negative_rate() {
        let result = TaxBracket::new(dec!(0), dec!(100), dec!(-3));

        assert_eq!(result, Err(TaxBracketError::InvalidRate(dec!(-3))));
    }

    // =========================================================================
    // contains tests
    // =========================================================================

    #[test]
    fn contains_includes_lower_bound() {
        let b = bracket(dec!(30000000), dec!(70000000));

        assert!(b.contains(b.lower_bound()));
    }

    #[test]
    fn contains_excludes_upper_bound() {
        let b = bracket(dec!(30000000), dec!(70000000));

        assert!(!b.contains(b.upper_bound()));
    }

    #[test]
    fn contains_accepts_interior_price() {
        let b = bracket(dec!(30000000), dec!(70000000));

        assert!(b.contains(dec!(45000000.50)));
    }

    #[test]
    fn contains_rejects_price_just_below_lower_bound() {
        let b = bracket(dec!(30000000), dec!(70000000));

        assert!(!b.contains(dec!(29999999.99)));
    }

    #[test]
    fn contains_handles_zero_and_negative_prices() {
        let b = bracket(dec!(0), dec!(100));

        assert!(b.contains(dec!(0)));
        assert!(!b.contains(dec!(-1)));
    }

    #[test]
    fn contains_holds_bound_semantics_for_many_brackets() {
        let brackets = [
            bracket(dec!(0), dec!(1)),
            bracket(dec!(-50), dec!(50)),
            bracket(dec!(0.01), dec!(0.02)),
            bracket(dec!(70000000), dec!(200000000)),
        ];

        for b in &brackets {
            assert!(b.contains(b.lower_bound()), "lower bound of {b:?}");
            assert!(!b.contains(b.upper_bound()), "upper bound of {b:?}");
        }
    }
}
