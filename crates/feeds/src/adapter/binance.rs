//! Binance spot ticker adapter.

use super::{number_or_string, DirectSource};
use braitsure_core::Exchange;
use serde_json::Value;

pub struct BinanceAdapter;

impl DirectSource for BinanceAdapter {
    fn exchange() -> Exchange {
        Exchange::Binance
    }

    fn url() -> &'static str {
        "https://api.binance.com/api/v3/ticker/24hr?symbol=USDTBRL"
    }

    /// Response is a flat object with `lastPrice` as a decimal string.
    fn extract_price(doc: &Value) -> Option<f64> {
        // An invalid symbol yields an error object without lastPrice.
        if !doc.is_object() {
            return None;
        }
        number_or_string(doc.get("lastPrice")?)
    }
}
