use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a number as written in the data files.
///
/// Accepts plain notation (`28000000`, `1.5`) and scientific notation
/// (`2.8E7`). Surrounding whitespace is ignored.
pub fn parse_decimal(input: &str) -> Result<Decimal, String> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| format!("'{input}' is not a number ({e})"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_plain_integer() {
        assert_eq!(parse_decimal("28000000"), Ok(dec!(28000000)));
    }

    #[test]
    fn parse_decimal_fraction() {
        assert_eq!(parse_decimal("1.5"), Ok(dec!(1.5)));
    }

    #[test]
    fn parse_decimal_scientific_notation() {
        assert_eq!(parse_decimal("2.8E7"), Ok(dec!(28000000)));
        assert_eq!(parse_decimal("5e-1"), Ok(dec!(0.5)));
    }

    #[test]
    fn parse_decimal_trims_whitespace() {
        assert_eq!(parse_decimal("  42 "), Ok(dec!(42)));
    }

    #[test]
    fn parse_decimal_rejects_text() {
        let err = parse_decimal("abc").expect_err("should fail");

        assert!(err.contains("'abc'"), "unexpected message: {err}");
    }

    #[test]
    fn parse_decimal_rejects_empty_input() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("   ").is_err());
    }
}
