//! Exchange-specific spot ticker adapters.
//!
//! Each exchange wraps its last-trade price in a different response
//! envelope. Adapters isolate the endpoint and the field path behind a
//! single extraction signature, so adding or removing a venue is a local
//! change.

mod binance;
mod bybit;
mod coinbase;
mod kucoin;

pub use binance::BinanceAdapter;
pub use bybit::BybitAdapter;
pub use coinbase::CoinbaseAdapter;
pub use kucoin::KuCoinAdapter;

use crate::client::fetch_json;
use crate::error::FeedError;
use braitsure_core::Exchange;
use reqwest::Client;
use serde_json::Value;

/// Trait for exchange-specific USDT/BRL spot ticker endpoints.
pub trait DirectSource {
    /// Get the exchange identifier.
    fn exchange() -> Exchange;

    /// Get the ticker endpoint URL.
    fn url() -> &'static str;

    /// Extract the last trade price from the endpoint's response document.
    /// Returns `None` when the document has no numeric price at the
    /// expected field path.
    fn extract_price(doc: &Value) -> Option<f64>;
}

/// Read a price field that may arrive as a JSON string or a number.
pub(crate) fn number_or_string(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Fetch one exchange's direct USDT/BRL price.
///
/// Every failure mode (network, non-2xx, undecodable body, missing field)
/// is scoped to this exchange; sibling fetches are unaffected.
pub async fn fetch_direct_price<A: DirectSource>(client: &Client) -> Result<f64, FeedError> {
    let source = A::exchange().as_str();
    let doc = fetch_json(client, A::url(), source).await?;
    A::extract_price(&doc).ok_or(FeedError::MissingPrice { src: source })
}
