//! Money type with fixed 2-decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal`, normalized to scale 2 at every
//! construction, so equality and sums behave exactly at cent precision.

use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of fractional digits every monetary amount carries.
pub const MONEY_SCALE: u32 = 2;

/// Errors from constructing a [`Money`] value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The input could not be parsed as a decimal amount.
    #[error("Invalid monetary amount: '{0}'")]
    InvalidAmount(String),
}

/// A monetary amount at fixed 2-decimal precision.
///
/// All engine arithmetic goes through this type; conversion to/from the raw
/// `Decimal` happens only at the persistence boundary via
/// [`Money::into_inner`] and [`Money::from_decimal`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a `Money` from a raw decimal, rounding to 2 decimal places
    /// with Banker's Rounding (`MidpointNearestEven`).
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Self {
        Self(amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven))
    }

    /// Parses a `Money` from a string.
    ///
    /// Empty or whitespace-only input is treated as zero; anything else must
    /// parse as a decimal number.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidAmount`] on unparsable input.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        Decimal::from_str(trimmed)
            .map(Self::from_decimal)
            .map_err(|_| MoneyError::InvalidAmount(input.to_string()))
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the inner decimal for the persistence boundary.
    #[must_use]
    pub const fn into_inner(self) -> Decimal {
        self.0
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        // Both operands are already at scale 2, so the sum is exact.
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_amount() {
        let money = Money::parse("100.00").unwrap();
        assert_eq!(money.into_inner(), dec!(100.00));
    }

    #[test]
    fn test_parse_empty_is_zero() {
        assert_eq!(Money::parse("").unwrap(), Money::ZERO);
        assert_eq!(Money::parse("   ").unwrap(), Money::ZERO);
    }

    #[rstest]
    #[case("abc")]
    #[case("12,5")]
    #[case("10.0.0")]
    #[case("Rp100")]
    fn test_parse_invalid_input(#[case] input: &str) {
        assert!(matches!(
            Money::parse(input),
            Err(MoneyError::InvalidAmount(_))
        ));
    }

    #[rstest]
    #[case(dec!(2.005), dec!(2.00))] // banker's: midpoint to even
    #[case(dec!(2.015), dec!(2.02))]
    #[case(dec!(2.025), dec!(2.02))]
    #[case(dec!(1.999), dec!(2.00))]
    #[case(dec!(-2.005), dec!(-2.00))]
    fn test_from_decimal_bankers_rounding(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(Money::from_decimal(input).into_inner(), expected);
    }

    #[test]
    fn test_equality_across_scales() {
        // 100.0 and 100.00 normalize to the same amount.
        assert_eq!(Money::parse("100.0").unwrap(), Money::parse("100.00").unwrap());
    }

    #[test]
    fn test_add_sub_round_trip() {
        let a = Money::parse("10.25").unwrap();
        let b = Money::parse("0.75").unwrap();
        assert_eq!((a + b).to_string(), "11.00");
        assert_eq!(a + b - b, a);
    }

    #[test]
    fn test_sum_over_iterator() {
        let total: Money = ["1.10", "2.20", "3.30"]
            .iter()
            .map(|s| Money::parse(s).unwrap())
            .sum();
        assert_eq!(total, Money::parse("6.60").unwrap());
    }

    #[test]
    fn test_sign_predicates() {
        assert!(Money::parse("0.01").unwrap().is_positive());
        assert!(Money::parse("-0.01").unwrap().is_negative());
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn test_display_always_two_decimals() {
        assert_eq!(Money::parse("5").unwrap().to_string(), "5.00");
        assert_eq!(Money::parse("-0.5").unwrap().to_string(), "-0.50");
    }

    #[test]
    fn test_neg_and_abs() {
        let m = Money::parse("12.34").unwrap();
        assert_eq!((-m).abs(), m);
    }
}
