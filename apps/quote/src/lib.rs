//! # vitrine-quote
//!
//! Command-line front-end over the pricing engine.
//!
//! ## Commands
//! ```text
//! vitrine-quote cart <session.json>   price a saved storefront cart and
//!                                     print the WhatsApp handoff message
//! vitrine-quote pos  <ticket.json>    price a POS ticket line by line
//! ```

pub mod config;
pub mod handoff;
pub mod ticket;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use tracing::{info, warn};
use vitrine_core::quote_pos;
use vitrine_core::validation::validate_cart_line;
use vitrine_session::SessionCart;

use crate::config::QuoteConfig;
use crate::handoff::handoff_message;
use crate::ticket::{ticket_report, PosTicket};

/// What the tool was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Cart(String),
    Pos(String),
}

pub const USAGE: &str = "usage: vitrine-quote <cart|pos> <file.json>";

impl Command {
    /// Parses arguments (without the program name).
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let (Some(kind), Some(path), None) = (args.next(), args.next(), args.next()) else {
            bail!(USAGE);
        };

        match kind.as_str() {
            "cart" => Ok(Command::Cart(path)),
            "pos" => Ok(Command::Pos(path)),
            other => bail!("unknown command '{}'\n{}", other, USAGE),
        }
    }
}

/// Prices a serialized session cart and returns the handoff message.
pub fn run_cart(config: &QuoteConfig, json: &str) -> Result<String> {
    let cart = SessionCart::from_json(json).context("reading cart")?;

    for (index, item) in cart.items.iter().enumerate() {
        validate_cart_line(&item.line())
            .with_context(|| format!("cart item {} ({})", index + 1, item.product_id))?;
    }

    let totals = cart
        .quote(&config.coupon_catalog(), &config.delivery_fees(), Utc::now())
        .map_err(|err| {
            warn!(session = %cart.session_id, error = %err, "Cart could not be quoted");
            anyhow!(err)
        })?;

    let mut message = handoff_message(config, &cart, &totals);
    if let Some(number) = &config.whatsapp_number {
        message = format!("To WhatsApp +{}\n\n{}", number, message);
    }
    Ok(message)
}

/// Prices a POS ticket and returns the report.
pub fn run_pos(config: &QuoteConfig, json: &str) -> Result<String> {
    let ticket: PosTicket = serde_json::from_str(json).context("reading ticket")?;
    ticket
        .validate()
        .map_err(|(line, err)| anyhow!("ticket line {}: {}", line, err))?;

    let totals = quote_pos(&ticket.priced_lines());
    info!(
        lines = totals.line_count(),
        units = totals.total_quantity,
        total = %totals.total,
        "Quoted POS ticket"
    );

    Ok(ticket_report(config, &ticket, &totals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> QuoteConfig {
        QuoteConfig {
            store_name: "Casa Norte".to_string(),
            whatsapp_number: Some("5491122334455".to_string()),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            delivery_fee: dec!(10),
            coupons: vec![],
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse(args(&["cart", "c.json"])).unwrap(),
            Command::Cart("c.json".to_string())
        );
        assert_eq!(
            Command::parse(args(&["pos", "t.json"])).unwrap(),
            Command::Pos("t.json".to_string())
        );
        assert!(Command::parse(args(&["cart"])).is_err());
        assert!(Command::parse(args(&["refund", "x.json"])).is_err());
        assert!(Command::parse(args(&["pos", "a", "b"])).is_err());
    }

    #[test]
    fn test_run_cart() {
        let json = r#"{
            "sessionId": "s1",
            "items": [{"productId": "p1", "name": "Tote", "unitPrice": "100", "quantity": 2}],
            "delivery": "delivery",
            "createdAt": "2024-06-01T10:00:00Z",
            "updatedAt": "2024-06-01T10:00:00Z"
        }"#;
        let message = run_cart(&config(), json).unwrap();
        assert!(message.starts_with("To WhatsApp +5491122334455"));
        assert!(message.ends_with("Total: $210.00"));
    }

    #[test]
    fn test_run_cart_rejects_bad_items() {
        let json = r#"{
            "sessionId": "s1",
            "items": [{"productId": "p1", "name": "Tote", "unitPrice": "-1", "quantity": 2}],
            "createdAt": "2024-06-01T10:00:00Z",
            "updatedAt": "2024-06-01T10:00:00Z"
        }"#;
        assert!(run_cart(&config(), json).is_err());
    }

    #[test]
    fn test_run_cart_unknown_coupon() {
        let json = r#"{
            "sessionId": "s1",
            "items": [],
            "couponCode": "GHOST",
            "createdAt": "2024-06-01T10:00:00Z",
            "updatedAt": "2024-06-01T10:00:00Z"
        }"#;
        let err = run_cart(&config(), json).unwrap_err();
        assert!(err.to_string().contains("GHOST"));
    }

    #[test]
    fn test_prices_beyond_limit_are_errors() {
        let huge = "79228162514264337593543950335";

        let ticket = format!(r#"{{"lines": [{{"unitPrice": "{}", "quantity": 2}}]}}"#, huge);
        let err = run_pos(&config(), &ticket).unwrap_err();
        assert!(err.to_string().starts_with("ticket line 1"));

        let cart = format!(
            r#"{{
                "sessionId": "s1",
                "items": [{{"productId": "p1", "name": "Gold", "unitPrice": "{}", "quantity": 2}}],
                "createdAt": "2024-06-01T10:00:00Z",
                "updatedAt": "2024-06-01T10:00:00Z"
            }}"#,
            huge
        );
        assert!(run_cart(&config(), &cart).is_err());
    }

    #[test]
    fn test_largest_allowed_ticket_is_priced() {
        use vitrine_core::{MAX_CART_LINES, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

        let line = format!(
            r#"{{"unitPrice": "{}", "quantity": {}}}"#,
            MAX_UNIT_PRICE, MAX_ITEM_QUANTITY
        );
        let lines = vec![line; MAX_CART_LINES].join(",");
        let report = run_pos(&config(), &format!(r#"{{"lines": [{}]}}"#, lines)).unwrap();
        assert!(report.contains(&format!("Units: {}", MAX_ITEM_QUANTITY * MAX_CART_LINES as i64)));
    }

    #[test]
    fn test_run_pos() {
        let json = r#"{"lines": [{"name": "Rice", "unitPrice": "100", "quantity": 5,
            "discountPercentage": "10", "wholesaleUnitPrice": "80", "wholesaleMinQuantity": 10}]}"#;
        let report = run_pos(&config(), json).unwrap();
        assert!(report.ends_with("Total: $450.00"));

        let bad = r#"{"lines": [{"unitPrice": "100", "quantity": -2}]}"#;
        let err = run_pos(&config(), bad).unwrap_err();
        assert!(err.to_string().starts_with("ticket line 1"));
    }
}
