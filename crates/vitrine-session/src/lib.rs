//! # vitrine-session: Session-Scoped Carts
//!
//! Cart state for one visitor session, persisted through an explicit
//! serialization boundary. There is no global cart: every operation takes
//! the session ID (or the cart) it works on.
//!
//! ## Module Organization
//! ```text
//! vitrine_session/
//! ├── cart.rs      ◄─── SessionCart, SessionItem, SessionId
//! ├── store.rs     ◄─── SessionStore trait + in-memory store
//! ├── sessions.rs  ◄─── CartSessions façade (load → mutate → save)
//! └── error.rs     ◄─── SessionError
//! ```
//!
//! ## Example
//! ```rust
//! use vitrine_core::{DeliveryFees, InMemoryCoupons, Money};
//! use vitrine_session::{CartSessions, InMemorySessionStore, SessionItem};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), vitrine_session::SessionError> {
//! let sessions = CartSessions::new(InMemorySessionStore::new());
//! let cart = sessions.start().await?;
//!
//! sessions
//!     .mutate(&cart.session_id, |cart| {
//!         cart.add_item(SessionItem::new("sku-1", "Mug", Money::from_major(12), 2))
//!     })
//!     .await?;
//!
//! let totals = sessions
//!     .checkout_quote(
//!         &cart.session_id,
//!         &InMemoryCoupons::new(),
//!         &DeliveryFees::default(),
//!         chrono::Utc::now(),
//!     )
//!     .await?;
//! assert_eq!(totals.total, Money::from_major(24));
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod error;
pub mod sessions;
pub mod store;

pub use cart::{SessionCart, SessionId, SessionItem};
pub use error::{SessionError, SessionResult};
pub use sessions::CartSessions;
pub use store::{InMemorySessionStore, SessionStore};
