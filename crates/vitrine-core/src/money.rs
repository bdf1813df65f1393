//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Percentages make it worse:                                             │
//! │    $19.99 × (1 - 15/100) has no exact binary representation             │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal, rounded only for display                │
//! │    19.99 × 0.85 = 16.9915 (exact)                                      │
//! │    round_to(2)  = 16.99   (presentation layer decides)                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//!
//! let doubled = price * 2;
//! let total = price + Money::from_cents(500);
//! assert_eq!(total, Money::from_cents(1599));
//! assert_eq!(doubled.to_string(), "$21.98");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major currency units, held as an exact decimal.
///
/// ## Design Decisions
/// - **Signed**: the engine does not validate its inputs, so a negative
///   price or coupon flows through arithmetic unchanged
/// - **No implicit rounding**: every operation is exact; call
///   [`Money::round_to`] when presenting a value
/// - **Serialized as a string** so JSON never goes through `f64`
///
/// ## Where Money is Used
/// ```text
/// CartLine.unit_price ──► line total ──► subtotal ──► discount ──► total
///                                                        ▲            ▲
///                                          Coupon ───────┘  shipping ─┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal amount expressed in major units.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from minor units (cents).
    ///
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from a whole number of major units.
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the exact underlying amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// let line_total = Money::from_cents(299).multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_cents(897));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Returns `percent`% of this amount, where `percent` is on a 0-100 scale.
    ///
    /// ```rust
    /// use vitrine_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_major(200);
    /// assert_eq!(subtotal.percentage_of(Decimal::TEN), Money::from_major(20));
    /// ```
    pub fn percentage_of(&self, percent: Decimal) -> Money {
        Money(self.0 * percent / Decimal::ONE_HUNDRED)
    }

    /// Returns this amount reduced by `percent`% (0-100 scale).
    ///
    /// Computed as `amount × (1 - percent/100)`, exactly.
    pub fn apply_percentage_discount(&self, percent: Decimal) -> Money {
        Money(self.0 * (Decimal::ONE - percent / Decimal::ONE_HUNDRED))
    }

    /// Rounds to `decimals` places, half away from zero.
    ///
    /// This is the only rounding in the crate and belongs to presentation.
    pub fn round_to(&self, decimals: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Formats the amount for display with a currency symbol.
    ///
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with("S/ ", 2), "-S/ 5.50");
    /// assert_eq!(Money::from_major(1200).format_with("$", 0), "$1200");
    /// ```
    pub fn format_with(&self, symbol: &str, decimals: u32) -> String {
        let rounded = self.round_to(decimals).0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{}{}{:.prec$}",
            sign,
            symbol,
            rounded.abs(),
            prec = decimals as usize
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display with two decimals. Front-ends use
/// [`Money::format_with`] with the configured currency instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$", 2))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
    }

    #[test]
    fn test_equality_ignores_scale() {
        // 90 and 90.00 are the same amount
        assert_eq!(Money::new(dec!(90)), Money::new(dec!(90.00)));
        assert_eq!(Money::from_major(25), Money::from_cents(2500));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(a * 3, Money::from_cents(3000));
        assert_eq!(-a, Money::from_cents(-1000));
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_major(100), Money::from_major(50)];
        let total: Money = prices.iter().sum();
        assert_eq!(total, Money::from_major(150));

        let empty: Vec<Money> = vec![];
        assert_eq!(empty.into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_percentage_is_exact() {
        let price = Money::new(dec!(19.99));
        let discounted = price.apply_percentage_discount(dec!(15));
        assert_eq!(discounted.amount(), dec!(16.9915));
        assert_eq!(discounted.round_to(2).amount(), dec!(16.99));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(Money::new(dec!(0.825)).round_to(2).amount(), dec!(0.83));
        assert_eq!(Money::new(dec!(-0.825)).round_to(2).amount(), dec!(-0.83));
        assert_eq!(Money::new(dec!(2.5)).round_to(0).amount(), dec!(3));
    }

    #[test]
    fn test_format_rounding_to_negative_zero() {
        assert_eq!(Money::new(dec!(-0.001)).format_with("$", 2), "$0.00");
    }

    #[test]
    fn test_parse() {
        let money: Money = " 12.50 ".parse().unwrap();
        assert_eq!(money, Money::from_cents(1250));
        assert!("twelve".parse::<Money>().is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "\"12.50\"");

        let back: Money = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(back, Money::from_cents(1250));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert!(!negative.is_positive());
    }
}
