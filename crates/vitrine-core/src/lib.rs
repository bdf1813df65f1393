//! # vitrine-core: Pure Pricing for the Storefront and POS
//!
//! Cart and point-of-sale pricing as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Architecture                             │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │   Storefront cart UI     │        │      POS ticket UI       │      │
//! │  │ subtotal/discount/total  │        │  active price per line   │      │
//! │  └────────────┬─────────────┘        └────────────┬─────────────┘      │
//! │               │                                   │                     │
//! │  ┌────────────▼───────────────────────────────────▼─────────────┐      │
//! │  │               vitrine-session (session carts)                │      │
//! │  └────────────────────────────┬─────────────────────────────────┘      │
//! │                               │                                         │
//! │  ┌────────────────────────────▼─────────────────────────────────┐      │
//! │  │               ★ vitrine-core (THIS CRATE) ★                  │      │
//! │  │                                                              │      │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────┐ ┌─────────┐ ┌────────────┐  │      │
//! │  │  │  money  │ │ pricing │ │ pos │ │ coupon  │ │ validation │  │      │
//! │  │  └─────────┘ └─────────┘ └─────┘ └─────────┘ └────────────┘  │      │
//! │  │                                                              │      │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Money`
//! - [`types`] - Cart lines, coupons, POS lines, totals
//! - [`pricing`] - Subtotal, discount, total
//! - [`pos`] - Active unit price and ticket totals
//! - [`coupon`] - Coupon lookup contract and redemption checks
//! - [`validation`] - Boundary validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, no hidden state
//! 2. **No Validation Inside the Engine**: guarding happens at the boundary
//! 3. **Exact Money**: decimals, rounded only when presented
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrine_core::{quote_cart, CartLine, Coupon, Money};
//! use rust_decimal::Decimal;
//!
//! let lines = [
//!     CartLine::new(Money::from_major(100), 2),
//!     CartLine::new(Money::from_major(50), 1),
//! ];
//! let coupon = Coupon::percentage("TEN", Decimal::TEN);
//!
//! let totals = quote_cart(&lines, Some(&coupon), Money::from_major(10));
//! assert_eq!(totals.subtotal, Money::from_major(250));
//! assert_eq!(totals.discount, Money::from_major(25));
//! assert_eq!(totals.total, Money::from_major(235));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod error;
pub mod money;
pub mod pos;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coupon::{resolve_coupon, CouponLookup, CouponRecord, InMemoryCoupons};
pub use error::{CoreError, CouponError, CouponResult, ValidationError};
pub use money::Money;
pub use pos::{active_unit_price, pos_total, quote_pos, resolve_active_price};
pub use pricing::{calculate_discount, calculate_subtotal, calculate_total, quote_cart};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// Higher than a typical retail cap because wholesale buyers order by the box.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;

/// Maximum unit price, fee or fixed coupon value, in major currency units.
///
/// `MAX_UNIT_PRICE × MAX_ITEM_QUANTITY × MAX_CART_LINES` stays around 1e21,
/// well inside `Decimal`'s range, so validated input cannot overflow the
/// engine's arithmetic.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;

/// Maximum length of a coupon code.
pub const MAX_COUPON_CODE_LEN: usize = 32;
