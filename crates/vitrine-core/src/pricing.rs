//! # Cart Pricing
//!
//! Subtotal, coupon discount and grand total for a storefront cart.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  lines ──► calculate_subtotal ──► subtotal                              │
//! │                                      │                                  │
//! │  coupon ─────────────────────► calculate_discount                       │
//! │                                      │  min(candidate, subtotal)        │
//! │                                      ▼                                  │
//! │                                   discount                              │
//! │                                      │                                  │
//! │  shipping ───────────────────► calculate_total                          │
//! │                                      │  max(0, subtotal - discount      │
//! │                                      ▼              + shipping)         │
//! │                                    total                                │
//! │                                                                         │
//! │  Shipping is added AFTER the discount: coupons only ever reduce the     │
//! │  merchandise value, never the delivery fee.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use vitrine_core::money::Money;
//! use vitrine_core::pricing::{calculate_discount, calculate_subtotal, calculate_total};
//! use vitrine_core::types::{CartLine, Coupon};
//! use rust_decimal::Decimal;
//!
//! let lines = [
//!     CartLine::new(Money::from_major(100), 2),
//!     CartLine::new(Money::from_major(50), 1),
//! ];
//! let subtotal = calculate_subtotal(&lines);
//! let coupon = Coupon::fixed("HELLO50", Decimal::from(50));
//! let discount = calculate_discount(subtotal, Some(&coupon));
//! let total = calculate_total(subtotal, discount, Money::from_major(10));
//!
//! assert_eq!(total, Money::from_major(210));
//! ```
//!
//! Inputs are not validated here. Negative prices or quantities are summed
//! as given; see [`crate::validation`] for the boundary checks.

use std::cmp::{max, min};

use crate::money::Money;
use crate::types::{CartLine, CartTotals, Coupon, CouponKind};

/// Sums `unit_price × quantity` over all lines. Empty input is zero.
pub fn calculate_subtotal(lines: &[CartLine]) -> Money {
    lines.iter().map(CartLine::line_total).sum()
}

/// Discount a coupon grants against `subtotal`.
///
/// - no coupon: zero
/// - [`CouponKind::Fixed`]: the coupon's value
/// - [`CouponKind::Percentage`]: `subtotal × value / 100`
///
/// The result never exceeds `subtotal`. It is not floored at zero: a
/// negative coupon value passes through (the boundary rejects those).
pub fn calculate_discount(subtotal: Money, coupon: Option<&Coupon>) -> Money {
    let Some(coupon) = coupon else {
        return Money::zero();
    };

    let candidate = match coupon.kind {
        CouponKind::Fixed => Money::new(coupon.discount_value),
        CouponKind::Percentage => subtotal.percentage_of(coupon.discount_value),
    };

    min(candidate, subtotal)
}

/// `max(0, subtotal - discount + shipping)`.
pub fn calculate_total(subtotal: Money, discount: Money, shipping: Money) -> Money {
    max(Money::zero(), subtotal - discount + shipping)
}

/// [`calculate_total`] with no shipping.
pub fn calculate_total_without_shipping(subtotal: Money, discount: Money) -> Money {
    calculate_total(subtotal, discount, Money::zero())
}

/// Prices a whole cart: subtotal, then discount, then total with shipping.
pub fn quote_cart(lines: &[CartLine], coupon: Option<&Coupon>, shipping: Money) -> CartTotals {
    let subtotal = calculate_subtotal(lines);
    let discount = calculate_discount(subtotal, coupon);
    let total = calculate_total(subtotal, discount, shipping);

    CartTotals {
        subtotal,
        discount,
        shipping,
        total,
        coupon_code: coupon.map(|c| c.code.clone()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn arb_line() -> impl Strategy<Value = CartLine> {
        (0i64..1_000_000, 1i64..1_000)
            .prop_map(|(cents, qty)| CartLine::new(Money::from_cents(cents), qty))
    }

    fn arb_coupon() -> impl Strategy<Value = Coupon> {
        prop_oneof![
            (0i64..2_000_000).prop_map(|c| Coupon::fixed("F", Decimal::new(c, 2))),
            (0i64..=10_000).prop_map(|bps| Coupon::percentage("P", Decimal::new(bps, 2))),
        ]
    }

    proptest! {
        #[test]
        fn subtotal_is_sum_of_line_totals(lines in prop::collection::vec(arb_line(), 0..20)) {
            let expected = lines
                .iter()
                .fold(Decimal::ZERO, |acc, l| acc + l.unit_price.amount() * Decimal::from(l.quantity));
            prop_assert_eq!(calculate_subtotal(&lines).amount(), expected);
        }

        #[test]
        fn discount_never_exceeds_subtotal(
            lines in prop::collection::vec(arb_line(), 0..10),
            coupon in arb_coupon(),
        ) {
            let subtotal = calculate_subtotal(&lines);
            let discount = calculate_discount(subtotal, Some(&coupon));
            prop_assert!(discount <= subtotal);
            prop_assert!(!discount.is_negative());
        }

        #[test]
        fn percentage_discount_matches_formula(
            cents in 0i64..10_000_000,
            bps in 0i64..=10_000,
        ) {
            let subtotal = Money::from_cents(cents);
            let percent = Decimal::new(bps, 2);
            let coupon = Coupon::percentage("P", percent);
            let expected = subtotal.amount() * percent / Decimal::ONE_HUNDRED;
            prop_assert_eq!(calculate_discount(subtotal, Some(&coupon)).amount(), expected);
        }

        #[test]
        fn total_matches_formula(
            subtotal in -1_000_000i64..1_000_000,
            discount in -1_000_000i64..1_000_000,
            shipping in 0i64..100_000,
        ) {
            let total = calculate_total(
                Money::from_cents(subtotal),
                Money::from_cents(discount),
                Money::from_cents(shipping),
            );
            let expected = (subtotal - discount + shipping).max(0);
            prop_assert_eq!(total, Money::from_cents(expected));
        }

        #[test]
        fn subtotal_and_discount_are_idempotent(
            lines in prop::collection::vec(arb_line(), 0..10),
            coupon in prop::option::of(arb_coupon()),
        ) {
            let subtotal = calculate_subtotal(&lines);
            prop_assert_eq!(subtotal, calculate_subtotal(&lines));
            prop_assert_eq!(
                calculate_discount(subtotal, coupon.as_ref()),
                calculate_discount(subtotal, coupon.as_ref())
            );
        }

        #[test]
        fn quoting_is_idempotent(
            lines in prop::collection::vec(arb_line(), 0..10),
            coupon in prop::option::of(arb_coupon()),
            shipping in 0i64..100_000,
        ) {
            let shipping = Money::from_cents(shipping);
            let first = quote_cart(&lines, coupon.as_ref(), shipping);
            let second = quote_cart(&lines, coupon.as_ref(), shipping);
            prop_assert_eq!(first, second);
        }
    }
}
