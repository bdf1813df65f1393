//! WhatsApp handoff message.
//!
//! Checkout ends by sending the priced cart to the store as plain text.
//! This module only renders that text; sending it is the customer's phone's
//! job.

use vitrine_core::{CartTotals, DeliveryMethod};
use vitrine_session::SessionCart;

use crate::config::QuoteConfig;

/// Renders the order message for a priced cart.
///
/// ```text
/// Hello Casa Norte! I'd like to order:
/// • 2 × Tote @ $100.00 = $200.00
/// • 1 × Cap @ $50.00 = $50.00
///
/// Subtotal: $250.00
/// Discount (FIFTY): -$50.00
/// Delivery: $10.00
/// Total: $210.00
/// ```
pub fn handoff_message(config: &QuoteConfig, cart: &SessionCart, totals: &CartTotals) -> String {
    let mut lines = vec![format!("Hello {}! I'd like to order:", config.store_name)];

    lines.extend(cart.items.iter().map(|item| {
        format!(
            "• {} × {} @ {} = {}",
            item.quantity,
            item.name,
            config.format(item.unit_price),
            config.format(item.line_total()),
        )
    }));

    lines.push(String::new());
    lines.push(format!("Subtotal: {}", config.format(totals.subtotal)));

    if let Some(code) = &totals.coupon_code {
        lines.push(format!("Discount ({}): {}", code, config.format(-totals.discount)));
    }

    lines.push(match cart.delivery {
        DeliveryMethod::Pickup => "Pickup in store".to_string(),
        DeliveryMethod::Delivery => format!("Delivery: {}", config.format(totals.shipping)),
    });

    lines.push(format!("Total: {}", config.format(totals.total)));
    lines.join("\n")
}
