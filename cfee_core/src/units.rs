//! # Unit Types
//!
//! Every quantity in the calculator is either an amount of the base
//! currency (SOL by default) or a percentage. Amounts stay plain `f64` so
//! JSON output is just numbers; percentages get a thin newtype so the
//! "divide by 100" step lives in exactly one place.
//!
//! ## Example
//!
//! ```rust
//! use cfee_core::units::{format_amount, Percent};
//!
//! let tax = Percent(0.75);
//! assert_eq!(tax.of(200.0), 1.5);
//! assert_eq!(format_amount(0.0087, 6), "0.008700");
//! ```

use serde::{Deserialize, Serialize};

/// Default number of fractional digits shown for results.
pub const DEFAULT_PRECISION: usize = 6;

/// Default base currency symbol.
pub const DEFAULT_CURRENCY: &str = "SOL";

/// Unit attached to an input field or a result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Amount of the base currency
    Currency,
    /// Percentage, 0-100
    Percent,
}

impl Unit {
    /// Symbol shown after a value. `currency` is the configured symbol
    /// for [`Unit::Currency`].
    pub fn symbol<'a>(&self, currency: &'a str) -> &'a str {
        match self {
            Unit::Currency => currency,
            Unit::Percent => "%",
        }
    }
}

/// A percentage expressed on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// The percentage as a fraction (0.75% -> 0.0075)
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Apply this percentage to an amount
    pub fn of(self, amount: f64) -> f64 {
        amount * self.fraction()
    }
}

/// Format a value with a fixed number of fractional digits.
///
/// Rounding happens here only; stored and derived values keep full
/// precision.
pub fn format_amount(value: f64, precision: usize) -> String {
    // Avoid printing "-0.000000" for tiny negative rounding noise
    let formatted = format!("{:.*}", precision, value);
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Format a value followed by its unit symbol, e.g. `"1.008700 SOL"`.
pub fn format_with_unit(value: f64, unit: Unit, precision: usize, currency: &str) -> String {
    format!("{} {}", format_amount(value, precision), unit.symbol(currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_fraction() {
        assert_eq!(Percent(100.0).fraction(), 1.0);
        assert_eq!(Percent(0.0).of(5.0), 0.0);
        assert_eq!(Percent(50.0).of(3.0), 1.5);
    }

    #[test]
    fn test_format_amount_fixed_digits() {
        assert_eq!(format_amount(1.0087, 6), "1.008700");
        assert_eq!(format_amount(1.546525, 2), "1.55");
        assert_eq!(format_amount(0.0, 6), "0.000000");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-0.0015, 4), "-0.0015");
        // rounds to zero, sign dropped
        assert_eq!(format_amount(-0.0000001, 6), "0.000000");
    }

    #[test]
    fn test_format_with_unit() {
        assert_eq!(format_with_unit(0.5, Unit::Currency, 3, "SOL"), "0.500 SOL");
        assert_eq!(format_with_unit(1.5, Unit::Percent, 1, "SOL"), "1.5 %");
    }

    #[test]
    fn test_unit_serialization() {
        let json = serde_json::to_string(&Unit::Percent).unwrap();
        assert_eq!(json, "\"Percent\"");
    }
}
