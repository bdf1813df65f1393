//! # Validation Module
//!
//! Boundary validation for data entering the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront / POS form schema                                 │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session / coupon boundary (Rust)                             │
//! │  └── THIS MODULE: prices, quantities, coupon values and codes          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── NO validation. Arithmetic only, two defensive clamps.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::validation::{validate_coupon_code, validate_quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_coupon_code("SPRING-10").is_ok());
//! assert!(validate_coupon_code("no spaces").is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartLine, CouponKind, PricedLine};
use crate::{MAX_CART_LINES, MAX_COUPON_CODE_LEN, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_ITEM_QUANTITY`
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed `MAX_UNIT_PRICE`
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    bounded_amount("price", price.amount())
}

/// Validates a percentage on the 0-100 scale.
pub fn validate_percentage(field: &str, percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

fn bounded_amount(field: &str, value: Decimal) -> ValidationResult<()> {
    non_negative(field, value)?;

    if value > Decimal::from(MAX_UNIT_PRICE) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: MAX_UNIT_PRICE.to_string(),
        });
    }

    Ok(())
}

fn non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Line Validators
// =============================================================================

/// Validates a storefront line.
pub fn validate_cart_line(line: &CartLine) -> ValidationResult<()> {
    validate_unit_price(line.unit_price)?;
    validate_quantity(line.quantity)
}

/// Validates a POS line, including its optional pricing tiers.
///
/// ## Rules
/// - Base price and quantity as in [`validate_cart_line`]
/// - Discount percentage within 0-100
/// - Wholesale price not negative (zero means "not offered")
/// - Wholesale minimum quantity at least 1
pub fn validate_priced_line(line: &PricedLine) -> ValidationResult<()> {
    validate_cart_line(&line.as_cart_line())?;
    validate_percentage("discount percentage", line.discount_percentage)?;
    bounded_amount("wholesale price", line.wholesale_unit_price.amount())?;

    if line.wholesale_min_quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "wholesale minimum quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Coupon Validators
// =============================================================================

/// Validates a coupon's numeric value for its kind.
///
/// Negative values are rejected here because the engine only clamps the
/// discount from above.
pub fn validate_coupon_value(kind: CouponKind, value: Decimal) -> ValidationResult<()> {
    match kind {
        CouponKind::Fixed => bounded_amount("discount value", value),
        CouponKind::Percentage => validate_percentage("discount value", value),
    }
}

/// Validates a coupon code as typed by a customer (after normalization).
///
/// ## Rules
/// - Not empty
/// - At most `MAX_COUPON_CODE_LEN` characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.chars().count() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits in a cart holding `current_lines`.
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: "0".to_string(),
            max: MAX_CART_LINES.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
