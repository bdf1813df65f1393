//! # Session Store
//!
//! Key-value persistence for carts, keyed by [`SessionId`].
//!
//! ## Serialization Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   SessionCart ──to_json──► String ──► SessionStore (Redis, SQL, map)   │
//! │        ▲                                   │                            │
//! │        └─────────────from_json─────────────┘                            │
//! │                                                                         │
//! │   Stores only ever hold the serialized form. A cart read back is a     │
//! │   fresh value, never a shared reference into the store.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cart::{SessionCart, SessionId};
use crate::error::SessionResult;

/// Persistence for session carts.
///
/// Implementations decide where bytes live; they must hand back exactly
/// what was saved.
pub trait SessionStore: Send + Sync {
    /// Loads the cart for `id`, or `None` if the session has none.
    fn load(&self, id: &SessionId) -> impl Future<Output = SessionResult<Option<SessionCart>>> + Send;

    /// Saves (creates or replaces) a cart under its own session ID.
    fn save(&self, cart: &SessionCart) -> impl Future<Output = SessionResult<()>> + Send;

    /// Deletes the cart for `id`. Returns whether one existed.
    fn remove(&self, id: &SessionId) -> impl Future<Output = SessionResult<bool>> + Send;
}

/// Process-local store. Suitable for tests and single-instance deployments.
///
/// ## Thread Safety
/// A `tokio::sync::RwLock` guards the map: loads share the lock, saves and
/// removals take it exclusively. The lock is never held across encoding.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<SessionId, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> SessionResult<Option<SessionCart>> {
        let payload = self.entries.read().await.get(id).cloned();
        payload
            .map(|json| SessionCart::from_json(&json))
            .transpose()
    }

    async fn save(&self, cart: &SessionCart) -> SessionResult<()> {
        let json = cart.to_json()?;
        debug!(session = %cart.session_id, bytes = json.len(), "Saving session cart");
        self.entries
            .write()
            .await
            .insert(cart.session_id.clone(), json);
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> SessionResult<bool> {
        Ok(self.entries.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::SessionItem;
    use crate::error::SessionError;
    use vitrine_core::Money;

    #[tokio::test]
    async fn test_save_then_load() {
        let store = InMemorySessionStore::new();
        let mut cart = SessionCart::new(SessionId::from("s1"));
        cart.add_item(SessionItem::new("p1", "Mug", Money::from_cents(1250), 2))
            .unwrap();

        store.save(&cart).await.unwrap();
        assert_eq!(store.len().await, 1);

        let loaded = store.load(&SessionId::from("s1")).await.unwrap();
        assert_eq!(loaded, Some(cart));
    }

    #[tokio::test]
    async fn test_load_missing() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.load(&SessionId::from("nobody")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_loaded_cart_is_a_copy() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("s1");
        store.save(&SessionCart::new(id.clone())).await.unwrap();

        let mut copy = store.load(&id).await.unwrap().unwrap();
        copy.add_item(SessionItem::new("p1", "Mug", Money::from_major(5), 1))
            .unwrap();

        let stored = store.load(&id).await.unwrap().unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("s1");
        store.save(&SessionCart::new(id.clone())).await.unwrap();

        assert!(store.remove(&id).await.unwrap());
        assert!(!store.remove(&id).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_reported() {
        let store = InMemorySessionStore::new();
        let id = SessionId::from("s1");
        store
            .entries
            .write()
            .await
            .insert(id.clone(), "{\"sessionId\":".to_string());

        assert!(matches!(
            store.load(&id).await,
            Err(SessionError::Serialization(_))
        ));
    }
}
