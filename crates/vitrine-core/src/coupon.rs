//! # Coupon Boundary
//!
//! Turns a code typed at checkout into the immutable [`Coupon`] the pricing
//! functions consume.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "  welcome10 " ──► normalize ──► "WELCOME10"                           │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                           CouponLookup::find_by_code                    │
//! │                     (database, config file, in-memory map)              │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                            CouponRecord::redeem(now)                    │
//! │                    active? ─► expiry ─► usage limit ─► value            │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                                     Coupon ──► calculate_discount       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here touches storage: "now" is passed in and lookups go through
//! the [`CouponLookup`] trait, so callers decide where coupons live.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CouponError, CouponResult};
use crate::types::{Coupon, CouponKind};
use crate::validation::{validate_coupon_code, validate_coupon_value};

fn default_active() -> bool {
    true
}

/// A coupon as the issuing back-office stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRecord {
    pub code: String,
    pub discount_value: Decimal,
    pub kind: CouponKind,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Last instant the coupon can be redeemed. `None` never expires.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Maximum number of redemptions. `None` is unlimited.
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
}

impl CouponRecord {
    /// An active, unlimited, non-expiring coupon.
    pub fn new(code: impl Into<String>, kind: CouponKind, discount_value: Decimal) -> Self {
        CouponRecord {
            code: normalize_coupon_code(&code.into()),
            discount_value,
            kind,
            is_active: true,
            expires_at: None,
            usage_limit: None,
            used_count: 0,
        }
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn limited_to(mut self, limit: u32, used: u32) -> Self {
        self.usage_limit = Some(limit);
        self.used_count = used;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Checks the record can be used at `now` and returns its engine value.
    ///
    /// ## Checks, in order
    /// 1. Active flag
    /// 2. Expiry: redeemable up to and including `expires_at`
    /// 3. Usage limit: `used_count < usage_limit`
    /// 4. Value: non-negative, percentages within 0-100
    pub fn redeem(&self, now: DateTime<Utc>) -> CouponResult<Coupon> {
        if !self.is_active {
            return Err(CouponError::Inactive(self.code.clone()));
        }

        if let Some(expired_at) = self.expires_at {
            if now > expired_at {
                return Err(CouponError::Expired {
                    code: self.code.clone(),
                    expired_at,
                });
            }
        }

        if let Some(limit) = self.usage_limit {
            if self.used_count >= limit {
                return Err(CouponError::Exhausted {
                    code: self.code.clone(),
                    limit,
                });
            }
        }

        validate_coupon_value(self.kind, self.discount_value).map_err(|source| {
            CouponError::Invalid {
                code: self.code.clone(),
                source,
            }
        })?;

        Ok(Coupon {
            code: self.code.clone(),
            discount_value: self.discount_value,
            kind: self.kind,
        })
    }
}

// =============================================================================
// Lookup Contract
// =============================================================================

/// Where coupon records come from.
///
/// Implementations receive codes already normalized by
/// [`normalize_coupon_code`].
pub trait CouponLookup {
    fn find_by_code(&self, code: &str) -> Option<CouponRecord>;
}

/// Canonical form of a coupon code: trimmed, upper-case.
pub fn normalize_coupon_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Looks up `raw_code` and redeems it at `now`.
///
/// ```rust
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use vitrine_core::coupon::{resolve_coupon, CouponRecord, InMemoryCoupons};
/// use vitrine_core::types::CouponKind;
///
/// let coupons: InMemoryCoupons =
///     [CouponRecord::new("WELCOME10", CouponKind::Percentage, Decimal::TEN)]
///         .into_iter()
///         .collect();
///
/// let coupon = resolve_coupon(&coupons, " welcome10 ", Utc::now()).unwrap();
/// assert_eq!(coupon.code, "WELCOME10");
/// ```
pub fn resolve_coupon<L>(lookup: &L, raw_code: &str, now: DateTime<Utc>) -> CouponResult<Coupon>
where
    L: CouponLookup + ?Sized,
{
    let code = normalize_coupon_code(raw_code);
    if code.is_empty() {
        return Err(CouponError::EmptyCode);
    }

    // A malformed code cannot have been issued.
    if validate_coupon_code(&code).is_err() {
        return Err(CouponError::NotFound(code));
    }

    let record = lookup
        .find_by_code(&code)
        .ok_or_else(|| CouponError::NotFound(code.clone()))?;

    record.redeem(now)
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// A coupon catalog held in memory, keyed by normalized code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCoupons {
    records: HashMap<String, CouponRecord>,
}

impl InMemoryCoupons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a record.
    pub fn insert(&mut self, mut record: CouponRecord) {
        record.code = normalize_coupon_code(&record.code);
        self.records.insert(record.code.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<CouponRecord> for InMemoryCoupons {
    fn from_iter<I: IntoIterator<Item = CouponRecord>>(iter: I) -> Self {
        let mut coupons = InMemoryCoupons::new();
        for record in iter {
            coupons.insert(record);
        }
        coupons
    }
}

impl CouponLookup for InMemoryCoupons {
    fn find_by_code(&self, code: &str) -> Option<CouponRecord> {
        self.records.get(code).cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 29, 12, 0, 0).unwrap()
    }

    fn catalog() -> InMemoryCoupons {
        [
            CouponRecord::new("welcome10", CouponKind::Percentage, dec!(10)),
            CouponRecord::new("FIFTY", CouponKind::Fixed, dec!(50)),
            CouponRecord::new("OLD", CouponKind::Fixed, dec!(5))
                .expiring_at(now() - Duration::days(1)),
            CouponRecord::new("LAUNCH", CouponKind::Fixed, dec!(5)).limited_to(100, 100),
            CouponRecord::new("PAUSED", CouponKind::Fixed, dec!(5)).disabled(),
            CouponRecord::new("BROKEN", CouponKind::Fixed, dec!(-50)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_coupon_code("  spring-10 "), "SPRING-10");
    }

    #[test]
    fn test_resolve_valid_coupon() {
        let coupon = resolve_coupon(&catalog(), "Welcome10", now()).unwrap();
        assert_eq!(coupon, Coupon::percentage("WELCOME10", dec!(10)));

        let coupon = resolve_coupon(&catalog(), "fifty", now()).unwrap();
        assert_eq!(coupon.kind, CouponKind::Fixed);
    }

    #[test]
    fn test_empty_and_unknown_codes() {
        assert!(matches!(
            resolve_coupon(&catalog(), "   ", now()),
            Err(CouponError::EmptyCode)
        ));
        assert!(matches!(
            resolve_coupon(&catalog(), "NOPE", now()),
            Err(CouponError::NotFound(code)) if code == "NOPE"
        ));
        assert!(matches!(
            resolve_coupon(&catalog(), "bad code", now()),
            Err(CouponError::NotFound(_))
        ));
    }

    #[test]
    fn test_expired() {
        assert!(matches!(
            resolve_coupon(&catalog(), "OLD", now()),
            Err(CouponError::Expired { .. })
        ));
    }

    #[test]
    fn test_expiry_instant_is_still_redeemable() {
        let record =
            CouponRecord::new("EDGE", CouponKind::Fixed, dec!(5)).expiring_at(now());
        assert!(record.redeem(now()).is_ok());
        assert!(record.redeem(now() + Duration::seconds(1)).is_err());
    }

    #[test]
    fn test_usage_limit() {
        assert!(matches!(
            resolve_coupon(&catalog(), "LAUNCH", now()),
            Err(CouponError::Exhausted { limit: 100, .. })
        ));

        let record = CouponRecord::new("LAUNCH", CouponKind::Fixed, dec!(5)).limited_to(100, 99);
        assert!(record.redeem(now()).is_ok());
    }

    #[test]
    fn test_inactive_checked_before_expiry() {
        let record = CouponRecord::new("X", CouponKind::Fixed, dec!(5))
            .disabled()
            .expiring_at(now() - Duration::days(30));
        assert!(matches!(record.redeem(now()), Err(CouponError::Inactive(_))));
    }

    #[test]
    fn test_negative_value_rejected_at_boundary() {
        assert!(matches!(
            resolve_coupon(&catalog(), "BROKEN", now()),
            Err(CouponError::Invalid { .. })
        ));
    }

    #[test]
    fn test_record_defaults_from_json() {
        let record: CouponRecord = serde_json::from_str(
            r#"{"code":"VIP","discountValue":"15","kind":"percentage"}"#,
        )
        .unwrap();
        assert!(record.is_active);
        assert_eq!(record.expires_at, None);
        assert_eq!(record.usage_limit, None);
        assert_eq!(record.used_count, 0);
    }

    #[test]
    fn test_catalog_normalizes_on_insert() {
        let mut coupons = InMemoryCoupons::new();
        assert!(coupons.is_empty());
        coupons.insert(CouponRecord {
            code: " lower ".to_string(),
            ..CouponRecord::new("x", CouponKind::Fixed, dec!(1))
        });
        assert_eq!(coupons.len(), 1);
        assert!(coupons.find_by_code("LOWER").is_some());
    }
}
