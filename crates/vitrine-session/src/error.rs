//! # Session Error Types
//!
//! ## Error Flow
//! ```text
//! ValidationError / CouponError
//!        │
//!        ▼
//!    CoreError ──────────┐
//!                        ▼
//!  serde_json::Error ─► SessionError ─► caller (CLI / request handler)
//! ```

use thiserror::Error;
use vitrine_core::{CoreError, CouponError, ValidationError};

use crate::cart::SessionId;

/// Errors from cart mutations and the session store.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A pricing-boundary rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The product is not in this cart.
    #[error("Product {0} not in cart")]
    ItemNotInCart(String),

    /// No stored cart for this session.
    #[error("Session {0} not found")]
    NotFound(SessionId),

    /// Stored payload could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - A cart written by an incompatible version
    /// - Truncated or hand-edited JSON
    #[error("Session payload is invalid: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Core(err.into())
    }
}

impl From<CouponError> for SessionError {
    fn from(err: CouponError) -> Self {
        SessionError::Core(err.into())
    }
}

/// Convenience type alias for Results with SessionError.
pub type SessionResult<T> = Result<T, SessionError>;
