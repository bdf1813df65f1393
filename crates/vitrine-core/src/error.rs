//! # Error Types
//!
//! Domain-specific error types for vitrine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrine-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Boundary input validation failures             │
//! │  └── CouponError      - Coupon lookup / redemption failures            │
//! │                                                                         │
//! │  vitrine-session errors (separate crate)                               │
//! │  └── SessionError     - Cart state and store failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CouponError → CoreError → SessionError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing functions themselves never return these. Errors only come
//! from the boundary: validation and coupon redemption.

use chrono::{DateTime, Utc};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised at the edge of the engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Coupon could not be redeemed.
    #[error("Coupon rejected: {0}")]
    Coupon(#[from] CouponError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Coupon Error
// =============================================================================

/// Why a coupon code did not produce a usable [`crate::Coupon`].
///
/// ## Redemption Order
/// ```text
/// code ──► empty? ──► lookup ──► active? ──► expired? ──► exhausted? ──► valid value?
///           │           │          │            │              │              │
///       EmptyCode   NotFound   Inactive     Expired       Exhausted      Invalid
/// ```
#[derive(Debug, Error)]
pub enum CouponError {
    #[error("coupon code is empty")]
    EmptyCode,

    #[error("coupon {0} does not exist")]
    NotFound(String),

    #[error("coupon {0} is disabled")]
    Inactive(String),

    #[error("coupon {code} expired at {expired_at}")]
    Expired {
        code: String,
        expired_at: DateTime<Utc>,
    },

    #[error("coupon {code} reached its usage limit of {limit}")]
    Exhausted { code: String, limit: u32 },

    #[error("coupon {code} is misconfigured: {source}")]
    Invalid {
        code: String,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] when data enters the system, before any
/// pricing runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of a coupon lookup or redemption.
pub type CouponResult<T> = Result<T, CouponError>;

// =============================================================================
// Unit Tests
// =============================================================================
