//! Simulation service owning the operator-set resale price.

use crate::simulator::simulate_all;
use braitsure_core::{
    join_quotes, validate_amount, validate_resale_price, ExchangeDetails, ExchangeQuote,
    InvalidInput, SimulationResult,
};
use braitsure_feeds::PriceAggregator;
use std::sync::RwLock;
use tracing::info;

/// Boot-time resale price, until an operator overrides it.
pub const DEFAULT_RESALE_PRICE: f64 = 5.25;

/// Orchestrates aggregation and simulation for every presentation surface.
///
/// The resale price is the only shared mutable value in the process.
/// Writes are whole-value replacements with last-write-wins semantics;
/// no ordering guarantee is needed across concurrent writers since the
/// value is operator-set, not contended. It resets on restart.
pub struct SimulationService {
    aggregator: PriceAggregator,
    details: Vec<ExchangeDetails>,
    resale_price: RwLock<f64>,
}

impl SimulationService {
    pub fn new(aggregator: PriceAggregator) -> Self {
        Self {
            aggregator,
            details: ExchangeDetails::defaults(),
            resale_price: RwLock::new(DEFAULT_RESALE_PRICE),
        }
    }

    /// Override the boot-time resale price.
    pub fn with_resale_price(self, price: f64) -> Result<Self, InvalidInput> {
        self.set_resale_price(price)?;
        Ok(self)
    }

    /// Current resale price.
    pub fn resale_price(&self) -> f64 {
        self.resale_price
            .read()
            .map(|price| *price)
            .unwrap_or(DEFAULT_RESALE_PRICE)
    }

    /// Overwrite the resale price. Rejected values never mutate state.
    pub fn set_resale_price(&self, price: f64) -> Result<(), InvalidInput> {
        let price = validate_resale_price(price)?;
        if let Ok(mut current) = self.resale_price.write() {
            *current = price;
        }
        info!(price, "resale price updated");
        Ok(())
    }

    /// Fetch the current quote list, one entry per supported exchange.
    pub async fn quotes(&self) -> Vec<ExchangeQuote> {
        self.aggregator.fetch_quotes().await
    }

    /// Simulate with the stored resale price.
    pub async fn simulate(&self, amount: f64) -> Result<Vec<SimulationResult>, InvalidInput> {
        self.simulate_with_price(amount, self.resale_price()).await
    }

    /// Simulate with an explicit resale price.
    ///
    /// Both inputs are validated before any fetch, so a rejected call
    /// performs no network traffic and returns no partial results.
    pub async fn simulate_with_price(
        &self,
        amount: f64,
        resale_price: f64,
    ) -> Result<Vec<SimulationResult>, InvalidInput> {
        let amount = validate_amount(amount)?;
        let resale_price = validate_resale_price(resale_price)?;

        let quotes = self.aggregator.fetch_quotes().await;
        let rates = join_quotes(&quotes, &self.details);
        Ok(simulate_all(amount, &rates, resale_price))
    }
}
