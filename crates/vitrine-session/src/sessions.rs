//! # Cart Sessions
//!
//! Request-level façade: load a session's cart, change it, store it back.
//!
//! ```text
//! handler ──► CartSessions::mutate(id, |cart| cart.add_item(..))
//!                  │
//!                  ├── store.load(id)  (or a new empty cart)
//!                  ├── f(&mut cart)    (validation errors abort here)
//!                  └── store.save(cart)
//! ```
//!
//! Two concurrent mutations of the same session are last-writer-wins; each
//! session is expected to be driven by one visitor at a time.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use vitrine_core::{CartTotals, CouponLookup, DeliveryFees};

use crate::cart::{SessionCart, SessionId};
use crate::error::{SessionError, SessionResult};
use crate::store::SessionStore;

/// Session-scoped cart access over any [`SessionStore`].
#[derive(Debug)]
pub struct CartSessions<S> {
    store: S,
}

impl<S: SessionStore> CartSessions<S> {
    pub fn new(store: S) -> Self {
        CartSessions { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Starts a new session with an empty, stored cart.
    pub async fn start(&self) -> SessionResult<SessionCart> {
        let cart = SessionCart::new(SessionId::generate());
        self.store.save(&cart).await?;
        info!(session = %cart.session_id, "Started cart session");
        Ok(cart)
    }

    /// The session's cart, or a new empty one if nothing is stored yet.
    ///
    /// An empty cart is not persisted until it is first mutated.
    pub async fn open(&self, id: &SessionId) -> SessionResult<SessionCart> {
        match self.store.load(id).await? {
            Some(cart) => Ok(cart),
            None => {
                debug!(session = %id, "No stored cart, opening empty one");
                Ok(SessionCart::new(id.clone()))
            }
        }
    }

    /// The stored cart, failing if the session has none.
    pub async fn get(&self, id: &SessionId) -> SessionResult<SessionCart> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    /// Applies `f` to the session's cart and saves the result.
    ///
    /// Nothing is saved when `f` fails.
    pub async fn mutate<F, R>(&self, id: &SessionId, f: F) -> SessionResult<R>
    where
        F: FnOnce(&mut SessionCart) -> SessionResult<R>,
    {
        let mut cart = self.open(id).await?;
        let result = f(&mut cart)?;
        self.store.save(&cart).await?;
        Ok(result)
    }

    /// Prices the session's cart for checkout.
    pub async fn checkout_quote<L>(
        &self,
        id: &SessionId,
        coupons: &L,
        fees: &DeliveryFees,
        now: DateTime<Utc>,
    ) -> SessionResult<CartTotals>
    where
        L: CouponLookup + ?Sized,
    {
        self.get(id).await?.quote(coupons, fees, now)
    }

    /// Drops the session's cart (after handoff or logout).
    pub async fn end(&self, id: &SessionId) -> SessionResult<bool> {
        let removed = self.store.remove(id).await?;
        if removed {
            info!(session = %id, "Ended cart session");
        }
        Ok(removed)
    }
}
