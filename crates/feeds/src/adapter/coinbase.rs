//! Coinbase spot price adapter.

use super::{number_or_string, DirectSource};
use braitsure_core::Exchange;
use serde_json::Value;

pub struct CoinbaseAdapter;

impl DirectSource for CoinbaseAdapter {
    fn exchange() -> Exchange {
        Exchange::Coinbase
    }

    fn url() -> &'static str {
        "https://api.coinbase.com/v2/prices/USDT-BRL/spot"
    }

    /// Response: `{"data":{"amount":"...","currency":"BRL"}}`.
    fn extract_price(doc: &Value) -> Option<f64> {
        number_or_string(doc.get("data")?.get("amount")?)
    }
}
