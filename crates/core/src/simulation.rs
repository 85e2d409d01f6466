//! Simulation result rows.

use crate::Exchange;
use serde::{Deserialize, Serialize};

/// Outcome of simulating one buy-and-resell cycle on a single exchange.
///
/// Purely derived, one row per exchange per simulation call. When the
/// exchange had no usable buy price, every derived field is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(rename = "exchangeName")]
    pub exchange: Exchange,
    #[serde(rename = "initialAmount")]
    pub initial_amount: f64,
    #[serde(rename = "buyPrice")]
    pub buy_price: Option<f64>,
    /// USDT held after the buy-side fee.
    #[serde(rename = "unitsAfterFee")]
    pub units_after_fee: Option<f64>,
    /// BRL proceeds after the resale fee.
    #[serde(rename = "finalAmount")]
    pub final_amount: Option<f64>,
    pub profit: Option<f64>,
    #[serde(rename = "profitPercentage")]
    pub profit_percentage: Option<f64>,
}

impl SimulationResult {
    /// All-null row for an exchange with no usable quote.
    pub fn unavailable(exchange: Exchange, initial_amount: f64) -> Self {
        Self {
            exchange,
            initial_amount,
            buy_price: None,
            units_after_fee: None,
            final_amount: None,
            profit: None,
            profit_percentage: None,
        }
    }
}
