//! # Point-of-Sale Pricing
//!
//! Resolves the single unit price charged for a POS line and totals a ticket.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. price = unit_price                                   (Base)         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. discount_percentage > 0 ?                                           │
//! │         └── yes ─► price = unit_price × (1 - pct/100)    (Discounted)   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. wholesale offered                                                   │
//! │     AND quantity ≥ wholesale_min_quantity                               │
//! │     AND wholesale_unit_price < price ?                                  │
//! │         └── yes ─► price = wholesale_unit_price          (Wholesale)    │
//! │                                                                         │
//! │  The customer pays ONE price. Wholesale replaces the discounted price   │
//! │  when it is lower; it is never applied on top of it.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! POS tickets have no coupons and no shipping.

use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::{ActivePrice, PosLineQuote, PosTotals, PriceSource, PricedLine};

/// Resolves the active unit price of a line and where it came from.
///
/// ```rust
/// use vitrine_core::money::Money;
/// use vitrine_core::pos::resolve_active_price;
/// use vitrine_core::types::{PriceSource, PricedLine};
/// use rust_decimal::Decimal;
///
/// let line = PricedLine::new(Money::from_major(100), 15)
///     .with_discount(Decimal::TEN)
///     .with_wholesale(Money::from_major(80), 10);
///
/// let active = resolve_active_price(&line);
/// assert_eq!(active.unit_price, Money::from_major(80));
/// assert_eq!(active.source, PriceSource::Wholesale);
/// ```
pub fn resolve_active_price(line: &PricedLine) -> ActivePrice {
    let mut active = ActivePrice {
        unit_price: line.unit_price,
        source: PriceSource::Base,
    };

    if line.discount_percentage > Decimal::ZERO {
        active = ActivePrice {
            unit_price: line
                .unit_price
                .apply_percentage_discount(line.discount_percentage),
            source: PriceSource::Discounted,
        };
    }

    if line.offers_wholesale()
        && line.quantity >= line.wholesale_min_quantity
        && line.wholesale_unit_price < active.unit_price
    {
        active = ActivePrice {
            unit_price: line.wholesale_unit_price,
            source: PriceSource::Wholesale,
        };
    }

    active
}

/// The unit price actually charged for `line`.
#[inline]
pub fn active_unit_price(line: &PricedLine) -> Money {
    resolve_active_price(line).unit_price
}

/// `active_unit_price(line) × quantity`.
#[inline]
pub fn pos_line_total(line: &PricedLine) -> Money {
    active_unit_price(line).multiply_quantity(line.quantity)
}

/// Σ `active_unit_price(line) × quantity` over the ticket.
pub fn pos_total(lines: &[PricedLine]) -> Money {
    lines.iter().map(pos_line_total).sum()
}

/// Prices every line of a ticket and aggregates them.
pub fn quote_pos(lines: &[PricedLine]) -> PosTotals {
    let quotes: Vec<PosLineQuote> = lines
        .iter()
        .map(|line| {
            let active = resolve_active_price(line);
            PosLineQuote {
                active,
                quantity: line.quantity,
                line_total: active.unit_price.multiply_quantity(line.quantity),
            }
        })
        .collect();

    PosTotals {
        total_quantity: quotes.iter().map(|q| q.quantity).sum(),
        total: quotes.iter().map(|q| q.line_total).sum(),
        lines: quotes,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog_line(qty: i64) -> PricedLine {
        PricedLine::new(Money::from_major(100), qty)
            .with_discount(dec!(10))
            .with_wholesale(Money::from_major(80), 10)
    }

    #[test]
    fn test_wholesale_beats_discount() {
        // Scenario E
        let line = catalog_line(15);
        let active = resolve_active_price(&line);
        assert_eq!(active.unit_price, Money::from_major(80));
        assert_eq!(active.source, PriceSource::Wholesale);
        assert_eq!(pos_line_total(&line), Money::from_major(1200));
    }

    #[test]
    fn test_below_wholesale_minimum_keeps_discount() {
        // Scenario F
        let line = catalog_line(5);
        let active = resolve_active_price(&line);
        assert_eq!(active.unit_price, Money::from_major(90));
        assert_eq!(active.source, PriceSource::Discounted);
        assert_eq!(pos_line_total(&line), Money::from_major(450));
    }

    #[test]
    fn test_minimum_quantity_is_inclusive() {
        assert_eq!(active_unit_price(&catalog_line(10)), Money::from_major(80));
        assert_eq!(active_unit_price(&catalog_line(9)), Money::from_major(90));
    }

    #[test]
    fn test_base_price_when_nothing_applies() {
        let line = PricedLine::new(Money::from_major(100), 3);
        let active = resolve_active_price(&line);
        assert_eq!(active.unit_price, Money::from_major(100));
        assert_eq!(active.source, PriceSource::Base);
    }

    #[test]
    fn test_wholesale_not_taken_when_discount_is_lower() {
        let line = PricedLine::new(Money::from_major(100), 20)
            .with_discount(dec!(30))
            .with_wholesale(Money::from_major(80), 10);
        let active = resolve_active_price(&line);
        assert_eq!(active.unit_price, Money::from_major(70));
        assert_eq!(active.source, PriceSource::Discounted);
    }

    #[test]
    fn test_wholesale_equal_to_current_price_is_not_taken() {
        let line = PricedLine::new(Money::from_major(100), 20)
            .with_discount(dec!(20))
            .with_wholesale(Money::from_major(80), 10);
        assert_eq!(resolve_active_price(&line).source, PriceSource::Discounted);
    }

    #[test]
    fn test_wholesale_without_discount() {
        let line = PricedLine::new(Money::from_major(100), 12)
            .with_wholesale(Money::from_major(85), 12);
        let active = resolve_active_price(&line);
        assert_eq!(active.unit_price, Money::from_major(85));
        assert_eq!(active.source, PriceSource::Wholesale);
    }

    #[test]
    fn test_zero_wholesale_means_not_offered() {
        let line = PricedLine::new(Money::from_major(100), 50).with_wholesale(Money::zero(), 1);
        assert_eq!(active_unit_price(&line), Money::from_major(100));
    }

    #[test]
    fn test_ticket_total() {
        let lines = [catalog_line(15), catalog_line(5)];
        assert_eq!(pos_total(&lines), Money::from_major(1650));

        let quote = quote_pos(&lines);
        assert_eq!(quote.line_count(), 2);
        assert_eq!(quote.total_quantity, 20);
        assert_eq!(quote.total, Money::from_major(1650));
        assert_eq!(quote.lines[1].active.source, PriceSource::Discounted);
    }

    #[test]
    fn test_empty_ticket() {
        assert_eq!(pos_total(&[]), Money::zero());
        let quote = quote_pos(&[]);
        assert_eq!(quote.total, Money::zero());
        assert_eq!(quote.total_quantity, 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_priced_line() -> impl Strategy<Value = PricedLine> {
        (
            1i64..1_000_000,
            1i64..500,
            0i64..=10_000,
            0i64..1_000_000,
            1i64..100,
        )
            .prop_map(|(cents, qty, bps, wholesale, min_qty)| {
                PricedLine::new(Money::from_cents(cents), qty)
                    .with_discount(Decimal::new(bps, 2))
                    .with_wholesale(Money::from_cents(wholesale), min_qty)
            })
    }

    proptest! {
        #[test]
        fn active_price_is_one_of_the_candidates(line in arb_priced_line()) {
            let active = active_unit_price(&line);
            let discounted = line.unit_price.apply_percentage_discount(line.discount_percentage);
            prop_assert!(
                active == line.unit_price
                    || active == discounted
                    || active == line.wholesale_unit_price
            );
        }

        #[test]
        fn active_price_never_exceeds_base(line in arb_priced_line()) {
            prop_assert!(active_unit_price(&line) <= line.unit_price);
        }

        #[test]
        fn ticket_total_is_sum_of_lines(lines in prop::collection::vec(arb_priced_line(), 0..10)) {
            let quote = quote_pos(&lines);
            let expected: Money = lines.iter().map(pos_line_total).sum();
            prop_assert_eq!(quote.total, expected);
            prop_assert_eq!(pos_total(&lines), expected);
        }

        #[test]
        fn resolution_is_idempotent(lines in prop::collection::vec(arb_priced_line(), 0..10)) {
            for line in &lines {
                prop_assert_eq!(resolve_active_price(line), resolve_active_price(line));
                prop_assert_eq!(active_unit_price(line), active_unit_price(line));
            }
            prop_assert_eq!(pos_total(&lines), pos_total(&lines));
            prop_assert_eq!(quote_pos(&lines), quote_pos(&lines));
        }
    }
}
