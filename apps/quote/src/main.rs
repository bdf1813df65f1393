//! # Vitrine Quote
//!
//! Prices a saved cart or POS ticket from the command line.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► Command ──► read file ──► run_cart / run_pos ──► stdout       │
//! │                                           ▲                             │
//! │                     QuoteConfig::load() ──┘        logs ──► stderr      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitrine_quote::config::QuoteConfig;
use vitrine_quote::{run_cart, run_pos, Command};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let command = Command::parse(std::env::args().skip(1))?;

    let config = QuoteConfig::load().context("loading configuration")?;
    info!(
        store = %config.store_name,
        coupons = config.coupons.len(),
        delivery_fee = %config.delivery_fee,
        "Configuration loaded"
    );

    let output = match &command {
        Command::Cart(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            run_cart(&config, &json)?
        }
        Command::Pos(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            run_pos(&config, &json)?
        }
    };

    println!("{}", output);
    Ok(())
}
