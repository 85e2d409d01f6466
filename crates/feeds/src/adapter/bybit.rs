//! Bybit spot ticker adapter.

use super::{number_or_string, DirectSource};
use braitsure_core::Exchange;
use serde_json::Value;

pub struct BybitAdapter;

impl DirectSource for BybitAdapter {
    fn exchange() -> Exchange {
        Exchange::Bybit
    }

    fn url() -> &'static str {
        "https://api.bybit.com/v5/market/tickers?category=spot&symbol=USDTBRL"
    }

    /// Response: `{"retCode":0,"result":{"list":[{"lastPrice":"..."}]}}`.
    /// A non-zero retCode means the API rejected the request.
    fn extract_price(doc: &Value) -> Option<f64> {
        if doc.get("retCode")?.as_i64()? != 0 {
            return None;
        }
        let first = doc.get("result")?.get("list")?.as_array()?.first()?;
        number_or_string(first.get("lastPrice")?)
    }
}
