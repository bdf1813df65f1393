//! # Domain Types
//!
//! Plain values the pricing engine consumes and produces.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing Types                                   │
//! │                                                                         │
//! │  Storefront                         Point of Sale                       │
//! │  ┌─────────────────┐                ┌──────────────────────────┐       │
//! │  │    CartLine     │                │       PricedLine         │       │
//! │  │  unit_price     │                │  unit_price, quantity    │       │
//! │  │  quantity       │                │  discount_percentage     │       │
//! │  └────────┬────────┘                │  wholesale_unit_price    │       │
//! │           │      ┌──────────┐       │  wholesale_min_quantity  │       │
//! │           │      │  Coupon  │       └────────────┬─────────────┘       │
//! │           │      │ Fixed/%  │                    │                     │
//! │           ▼      └────┬─────┘                    ▼                     │
//! │  ┌─────────────────┐  │             ┌──────────────────────────┐       │
//! │  │   CartTotals    │◄─┘             │ ActivePrice + PosTotals  │       │
//! │  └─────────────────┘                └──────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these carry identity: they are built for one calculation and
//! dropped afterwards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Cart Line
// =============================================================================

/// One storefront cart line: a unit price and how many units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub unit_price: Money,
    pub quantity: i64,
}

impl CartLine {
    #[inline]
    pub fn new(unit_price: Money, quantity: i64) -> Self {
        CartLine {
            unit_price,
            quantity,
        }
    }

    /// `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CouponKind {
    /// A currency amount taken off the subtotal.
    Fixed,
    /// A share of the subtotal, 0-100.
    Percentage,
}

/// A redeemable discount rule, already checked for existence and expiry.
///
/// The engine only reads its numeric effect. See [`crate::coupon`] for how
/// a stored coupon becomes one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    pub code: String,
    #[ts(type = "string")]
    pub discount_value: Decimal,
    pub kind: CouponKind,
}

impl Coupon {
    pub fn fixed(code: impl Into<String>, amount: Decimal) -> Self {
        Coupon {
            code: code.into(),
            discount_value: amount,
            kind: CouponKind::Fixed,
        }
    }

    pub fn percentage(code: impl Into<String>, percent: Decimal) -> Self {
        Coupon {
            code: code.into(),
            discount_value: percent,
            kind: CouponKind::Percentage,
        }
    }
}

// =============================================================================
// Priced Line (POS)
// =============================================================================

fn default_wholesale_min_quantity() -> i64 {
    1
}

/// A point-of-sale line with three candidate unit prices.
///
/// ## Optional Fields
/// | Field                    | Default | Meaning of default       |
/// |--------------------------|---------|--------------------------|
/// | `discount_percentage`    | `0`     | no percentage discount   |
/// | `wholesale_unit_price`   | `0`     | wholesale not offered    |
/// | `wholesale_min_quantity` | `1`     | any quantity qualifies   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedLine {
    pub unit_price: Money,
    pub quantity: i64,
    #[serde(default)]
    #[ts(type = "string")]
    pub discount_percentage: Decimal,
    #[serde(default)]
    pub wholesale_unit_price: Money,
    #[serde(default = "default_wholesale_min_quantity")]
    pub wholesale_min_quantity: i64,
}

impl PricedLine {
    /// A line at its base price, with no discount and no wholesale tier.
    pub fn new(unit_price: Money, quantity: i64) -> Self {
        PricedLine {
            unit_price,
            quantity,
            discount_percentage: Decimal::ZERO,
            wholesale_unit_price: Money::zero(),
            wholesale_min_quantity: default_wholesale_min_quantity(),
        }
    }

    pub fn with_discount(mut self, percent: Decimal) -> Self {
        self.discount_percentage = percent;
        self
    }

    pub fn with_wholesale(mut self, unit_price: Money, min_quantity: i64) -> Self {
        self.wholesale_unit_price = unit_price;
        self.wholesale_min_quantity = min_quantity;
        self
    }

    /// Whether a wholesale price is on offer at all.
    #[inline]
    pub fn offers_wholesale(&self) -> bool {
        self.wholesale_unit_price.is_positive()
    }

    /// The same line seen as a storefront line at its base price.
    pub fn as_cart_line(&self) -> CartLine {
        CartLine::new(self.unit_price, self.quantity)
    }
}

// =============================================================================
// Active Price
// =============================================================================

/// Which candidate became the price actually charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PriceSource {
    Base,
    Discounted,
    Wholesale,
}

/// Resolved unit price for a POS line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ActivePrice {
    pub unit_price: Money,
    pub source: PriceSource,
}

// =============================================================================
// Delivery
// =============================================================================

/// Delivery option picked at checkout. The fee itself is configuration;
/// the engine only ever sees the resulting shipping amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DeliveryMethod {
    /// Customer collects in store. Never charged.
    #[default]
    Pickup,
    /// Courier delivery at the configured fee.
    Delivery,
}

/// Shipping fee per delivery method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFees {
    #[serde(default)]
    pub delivery: Money,
}

impl DeliveryFees {
    pub fn new(delivery: Money) -> Self {
        DeliveryFees { delivery }
    }

    /// Shipping amount for the chosen method.
    pub fn shipping_for(&self, method: DeliveryMethod) -> Money {
        match method {
            DeliveryMethod::Pickup => Money::zero(),
            DeliveryMethod::Delivery => self.delivery,
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// A fully priced storefront cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub shipping: Money,
    pub total: Money,
    /// Code of the coupon that produced `discount`, if any.
    pub coupon_code: Option<String>,
}

/// One priced POS line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PosLineQuote {
    pub active: ActivePrice,
    pub quantity: i64,
    pub line_total: Money,
}

/// A fully priced POS ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PosTotals {
    pub lines: Vec<PosLineQuote>,
    pub total_quantity: i64,
    pub total: Money,
}

impl PosTotals {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
