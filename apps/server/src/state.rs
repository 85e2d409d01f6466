//! Shared application state.

use braitsure_engine::SimulationService;
use braitsure_feeds::{AggregatorConfig, PriceAggregator};
use std::sync::Arc;

/// The simulation service shared by the HTTP API and the Telegram bot.
pub type SharedService = Arc<SimulationService>;

/// Build the service from aggregation policy and a boot resale price.
pub fn create_service(
    config: AggregatorConfig,
    resale_price: f64,
) -> Result<SharedService, Box<dyn std::error::Error + Send + Sync>> {
    let aggregator = PriceAggregator::new(config)?;
    let service = SimulationService::new(aggregator).with_resale_price(resale_price)?;
    Ok(Arc::new(service))
}
