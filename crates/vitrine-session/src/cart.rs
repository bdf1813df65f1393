//! # Session Cart
//!
//! One visitor's cart: the lines, the coupon they typed and the delivery
//! method they picked.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Cart Operations                              │
//! │                                                                         │
//! │  Storefront Action        Method                  State Change          │
//! │  ─────────────────        ──────                  ────────────          │
//! │                                                                         │
//! │  Add to cart ───────────► add_item() ───────────► push / merge qty      │
//! │  Change quantity ───────► update_quantity() ────► items[i].qty = n      │
//! │  Remove ────────────────► remove_item() ────────► items.remove(i)       │
//! │  Enter coupon ──────────► apply_coupon() ───────► coupon_code = CODE    │
//! │  Pick delivery ─────────► set_delivery() ───────► delivery = method     │
//! │  View totals ───────────► quote() ──────────────► (read only)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are frozen when an item is added: if the catalog price changes
//! later, the cart keeps the price the customer saw.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;
use vitrine_core::coupon::{normalize_coupon_code, resolve_coupon, CouponLookup};
use vitrine_core::validation::{
    validate_cart_size, validate_coupon_code, validate_quantity, validate_unit_price,
};
use vitrine_core::{
    quote_cart, CartLine, CartTotals, Coupon, DeliveryFees, DeliveryMethod, Money, ValidationError,
    MAX_ITEM_QUANTITY,
};

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Session ID
// =============================================================================

/// Opaque key identifying a visitor session (cookie value, chat id, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// A fresh random session ID (UUID v4).
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        SessionId(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId(id.to_string())
    }
}

// =============================================================================
// Session Item
// =============================================================================

/// A product in the cart, with its price frozen at the time it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl SessionItem {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        SessionItem {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn line(&self) -> CartLine {
        CartLine::new(self.unit_price, self.quantity)
    }

    pub fn line_total(&self) -> Money {
        self.line().line_total()
    }
}

// =============================================================================
// Session Cart
// =============================================================================

/// The cart owned by one session.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding again increases quantity)
/// - Every quantity passed validation (1..=MAX_ITEM_QUANTITY)
/// - `coupon_code` is stored normalized
///
/// Carts read back with [`from_json`](Self::from_json) are checked again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCart {
    pub session_id: SessionId,

    #[serde(default)]
    pub items: Vec<SessionItem>,

    #[serde(default)]
    pub coupon_code: Option<String>,

    #[serde(default)]
    pub delivery: DeliveryMethod,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl SessionCart {
    /// Creates an empty cart for `session_id`.
    pub fn new(session_id: SessionId) -> Self {
        let now = Utc::now();
        SessionCart {
            session_id,
            items: Vec::new(),
            coupon_code: None,
            delivery: DeliveryMethod::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Adds an item, or increases the quantity if the product is present.
    pub fn add_item(&mut self, item: SessionItem) -> SessionResult<()> {
        validate_quantity(item.quantity)?;
        validate_unit_price(item.unit_price)?;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            let new_qty = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: "1".to_string(),
                    max: MAX_ITEM_QUANTITY.to_string(),
                })?;
            validate_quantity(new_qty)?;
            existing.quantity = new_qty;
            debug!(
                session = %self.session_id,
                product_id = %item.product_id,
                quantity = new_qty,
                "Merged cart item"
            );
        } else {
            validate_cart_size(self.items.len())?;
            debug!(
                session = %self.session_id,
                product_id = %item.product_id,
                quantity = item.quantity,
                "Added cart item"
            );
            self.items.push(item);
        }

        self.touch();
        Ok(())
    }

    /// Sets the quantity of a product. Zero removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> SessionResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or_else(|| SessionError::ItemNotInCart(product_id.to_string()))?;
        item.quantity = quantity;

        self.touch();
        Ok(())
    }

    /// Removes a product from the cart.
    pub fn remove_item(&mut self, product_id: &str) -> SessionResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            return Err(SessionError::ItemNotInCart(product_id.to_string()));
        }

        self.touch();
        Ok(())
    }

    /// Empties the cart and forgets the coupon. Delivery choice is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon_code = None;
        self.touch();
    }

    /// Checks a coupon against `coupons` and remembers it on success.
    ///
    /// A rejected coupon leaves any previously applied one in place.
    pub fn apply_coupon<L>(
        &mut self,
        coupons: &L,
        raw_code: &str,
        now: DateTime<Utc>,
    ) -> SessionResult<Coupon>
    where
        L: CouponLookup + ?Sized,
    {
        let coupon = resolve_coupon(coupons, raw_code, now).map_err(|err| {
            warn!(session = %self.session_id, code = raw_code, error = %err, "Coupon rejected");
            err
        })?;

        self.coupon_code = Some(coupon.code.clone());
        self.touch();
        Ok(coupon)
    }

    /// Stores a coupon code without looking it up.
    ///
    /// Used when restoring a cart; the code is checked again at [`quote`](Self::quote).
    pub fn set_coupon_code(&mut self, raw_code: &str) -> SessionResult<()> {
        let code = normalize_coupon_code(raw_code);
        validate_coupon_code(&code)?;
        self.coupon_code = Some(code);
        self.touch();
        Ok(())
    }

    pub fn remove_coupon(&mut self) {
        self.coupon_code = None;
        self.touch();
    }

    pub fn set_delivery(&mut self, method: DeliveryMethod) {
        self.delivery = method;
        self.touch();
    }

    /// The cart as engine input.
    pub fn lines(&self) -> Vec<CartLine> {
        self.items.iter().map(SessionItem::line).collect()
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all products.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Prices the cart.
    ///
    /// The stored coupon is redeemed again at `now`, so a coupon that
    /// expired while sitting in the cart is reported instead of silently
    /// dropped.
    pub fn quote<L>(
        &self,
        coupons: &L,
        fees: &DeliveryFees,
        now: DateTime<Utc>,
    ) -> SessionResult<CartTotals>
    where
        L: CouponLookup + ?Sized,
    {
        let coupon = match &self.coupon_code {
            Some(code) => Some(resolve_coupon(coupons, code, now)?),
            None => None,
        };

        let shipping = fees.shipping_for(self.delivery);
        let totals = quote_cart(&self.lines(), coupon.as_ref(), shipping);

        info!(
            session = %self.session_id,
            items = self.item_count(),
            subtotal = %totals.subtotal,
            discount = %totals.discount,
            shipping = %totals.shipping,
            total = %totals.total,
            "Quoted cart"
        );

        Ok(totals)
    }

    // =========================================================================
    // Serialization Boundary
    // =========================================================================

    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a stored cart and checks its invariants.
    pub fn from_json(json: &str) -> SessionResult<Self> {
        let cart: SessionCart = serde_json::from_str(json)?;
        cart.validate()?;
        Ok(cart)
    }

    /// Re-checks the invariants for a cart that did not come through the
    /// mutation methods.
    pub fn validate(&self) -> SessionResult<()> {
        let mut seen = HashSet::new();

        for (index, item) in self.items.iter().enumerate() {
            validate_cart_size(index)?;
            validate_unit_price(item.unit_price)?;
            validate_quantity(item.quantity)?;

            if !seen.insert(item.product_id.as_str()) {
                return Err(ValidationError::InvalidFormat {
                    field: "items".to_string(),
                    reason: format!("product {} is listed twice", item.product_id),
                }
                .into());
            }
        }

        if let Some(code) = &self.coupon_code {
            validate_coupon_code(code)?;
            if *code != normalize_coupon_code(code) {
                return Err(ValidationError::InvalidFormat {
                    field: "coupon code".to_string(),
                    reason: "must be uppercase without surrounding spaces".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
