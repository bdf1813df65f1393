//! Point-of-sale tickets: input file format and printed report.

use serde::Deserialize;
use vitrine_core::validation::validate_priced_line;
use vitrine_core::{PosTotals, PriceSource, PricedLine, ValidationError};

use crate::config::QuoteConfig;

/// A POS ticket as saved by the register.
///
/// ```json
/// { "lines": [
///     { "name": "Rice 1kg", "unitPrice": "100", "quantity": 15,
///       "discountPercentage": "10", "wholesaleUnitPrice": "80",
///       "wholesaleMinQuantity": 10 }
/// ] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PosTicket {
    pub lines: Vec<TicketLine>,
}

/// One ticket line: a display name plus the pricing fields.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketLine {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub pricing: PricedLine,
}

impl PosTicket {
    /// Rejects lines the engine should never see.
    ///
    /// Reports the 1-based position of the first bad line.
    pub fn validate(&self) -> Result<(), (usize, ValidationError)> {
        for (index, line) in self.lines.iter().enumerate() {
            validate_priced_line(&line.pricing).map_err(|err| (index + 1, err))?;
        }
        Ok(())
    }

    pub fn priced_lines(&self) -> Vec<PricedLine> {
        self.lines.iter().map(|l| l.pricing).collect()
    }
}

fn source_label(source: PriceSource) -> &'static str {
    match source {
        PriceSource::Base => "base",
        PriceSource::Discounted => "discount",
        PriceSource::Wholesale => "wholesale",
    }
}

/// Renders one row per line and the ticket total.
pub fn ticket_report(config: &QuoteConfig, ticket: &PosTicket, totals: &PosTotals) -> String {
    let mut rows: Vec<String> = ticket
        .lines
        .iter()
        .zip(&totals.lines)
        .map(|(line, quote)| {
            format!(
                "{:<24} {:>5} × {:>12} [{:<9}] = {:>12}",
                line.name,
                quote.quantity,
                config.format(quote.active.unit_price),
                source_label(quote.active.source),
                config.format(quote.line_total),
            )
        })
        .collect();

    rows.push(format!(
        "Items: {}  Units: {}  Total: {}",
        totals.line_count(),
        totals.total_quantity,
        config.format(totals.total)
    ));
    rows.join("\n")
}
