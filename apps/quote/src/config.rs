//! Quote tool configuration.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VITRINE_*`, e.g. `VITRINE_DELIVERY_FEE=10`)
//! 2. Config file (`vitrine.toml`, path override with `VITRINE_CONFIG`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Casa Norte"
//! whatsapp_number = "5491122334455"
//! currency_symbol = "$"
//! currency_decimals = 2
//! delivery_fee = "10"
//!
//! [[coupons]]
//! code = "WELCOME10"
//! kind = "percentage"
//! value = "10"
//! expires_at = "2025-01-31T23:59:59Z"
//! usage_limit = 500
//! used_count = 12
//! ```

use std::env;

use chrono::{DateTime, Utc};
use config::builder::{ConfigBuilder, DefaultState};
use rust_decimal::Decimal;
use serde::Deserialize;
use vitrine_core::validation::{validate_coupon_code, validate_coupon_value, validate_unit_price};
use vitrine_core::{CouponKind, CouponRecord, DeliveryFees, InMemoryCoupons, Money};

/// Environment variable holding the config file path (without extension).
pub const CONFIG_PATH_VAR: &str = "VITRINE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "vitrine";

/// Largest number of decimals a currency may be displayed with.
const MAX_CURRENCY_DECIMALS: u32 = 6;

/// Settings for the quote tool.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    /// Store name shown in the handoff message.
    pub store_name: String,

    /// WhatsApp number the handoff message is addressed to.
    #[serde(default)]
    pub whatsapp_number: Option<String>,

    pub currency_symbol: String,

    /// Decimals used when presenting amounts.
    pub currency_decimals: u32,

    /// Shipping charged for [`vitrine_core::DeliveryMethod::Delivery`].
    pub delivery_fee: Decimal,

    /// Coupons the store currently issues.
    #[serde(default)]
    pub coupons: Vec<CouponEntry>,
}

/// One coupon in the config file.
///
/// Kept separate from [`CouponRecord`] so file keys stay snake_case.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponEntry {
    pub code: String,
    pub kind: CouponKind,
    pub value: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
}

fn default_active() -> bool {
    true
}

impl From<&CouponEntry> for CouponRecord {
    fn from(entry: &CouponEntry) -> Self {
        let mut record = CouponRecord::new(&entry.code, entry.kind, entry.value);
        record.is_active = entry.active;
        record.expires_at = entry.expires_at;
        record.usage_limit = entry.usage_limit;
        record.used_count = entry.used_count;
        record
    }
}

impl QuoteConfig {
    /// Load configuration from `VITRINE_CONFIG` (or `./vitrine.toml`) and
    /// the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from a specific file (which may be absent).
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("VITRINE").try_parsing(true));
        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(config::Config::builder()
            .set_default("store_name", "Vitrine")?
            .set_default("currency_symbol", "$")?
            .set_default("currency_decimals", 2)?
            .set_default("delivery_fee", "0")?)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: QuoteConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the deserializer cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::InvalidValue("currency_decimals".to_string()));
        }

        validate_unit_price(Money::new(self.delivery_fee))
            .map_err(|_| ConfigError::InvalidValue("delivery_fee".to_string()))?;

        for entry in &self.coupons {
            validate_coupon_code(&entry.code)
                .and_then(|_| validate_coupon_value(entry.kind, entry.value))
                .map_err(|err| ConfigError::InvalidCoupon {
                    code: entry.code.clone(),
                    reason: err.to_string(),
                })?;
        }

        Ok(())
    }

    pub fn delivery_fees(&self) -> DeliveryFees {
        DeliveryFees::new(Money::new(self.delivery_fee))
    }

    pub fn coupon_catalog(&self) -> InMemoryCoupons {
        self.coupons.iter().map(CouponRecord::from).collect()
    }

    /// Formats an amount with the configured currency.
    pub fn format(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol, self.currency_decimals)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid coupon {code}: {reason}")]
    InvalidCoupon { code: String, reason: String },
}
