//! KuCoin spot ticker adapter.

use super::{number_or_string, DirectSource};
use braitsure_core::Exchange;
use serde_json::Value;

pub struct KuCoinAdapter;

impl DirectSource for KuCoinAdapter {
    fn exchange() -> Exchange {
        Exchange::KuCoin
    }

    fn url() -> &'static str {
        "https://api.kucoin.com/api/v1/market/orderbook/level1?symbol=USDT-BRL"
    }

    /// Response: `{"code":"200000","data":{"price":"..."}}`.
    /// An unknown symbol yields `"data": null`.
    fn extract_price(doc: &Value) -> Option<f64> {
        number_or_string(doc.get("data")?.get("price")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_price() {
        let doc = json!({
            "code": "200000",
            "data": { "time": 1700000000000u64, "price": "5.205", "size": "10" }
        });
        assert_eq!(KuCoinAdapter::extract_price(&doc), Some(5.205));
    }

    #[test]
    fn test_null_data() {
        let doc = json!({ "code": "200000", "data": null });
        assert_eq!(KuCoinAdapter::extract_price(&doc), None);
    }
}
