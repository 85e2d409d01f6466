//! Aggregated market tickers for USDT.
//!
//! One call returns ticker records across many venues. Records carry the
//! market name (matched by substring against the supported exchange set),
//! the target currency, and the staleness/volume flags the aggregator
//! filters on.

use crate::client::fetch_json;
use crate::error::FeedError;
use compact_str::CompactString;
use reqwest::Client;
use serde_json::Value;

pub const TICKERS_URL: &str = "https://api.coingecko.com/api/v3/coins/tether/tickers";

/// One normalized ticker record from the aggregated source.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerRecord {
    /// Venue name as reported by the source, e.g. "Binance".
    pub market: CompactString,
    /// Target currency symbol, e.g. "BRL" or "USDT".
    pub target: CompactString,
    /// Last trade price in the target currency.
    pub last: f64,
    /// 24h volume converted to USD, 0 when the source omits it.
    pub converted_volume_usd: f64,
    pub is_stale: bool,
    pub is_anomaly: bool,
}

/// Parse the tickers array out of the source's envelope.
/// A body without a `tickers` array (including non-object payloads) is a
/// parse failure for the whole source.
pub fn parse_tickers(doc: &Value) -> Result<Vec<TickerRecord>, FeedError> {
    let tickers = doc
        .get("tickers")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::Parse {
            src: "tickers",
            reason: "missing tickers array".to_string(),
        })?;
    Ok(tickers.iter().filter_map(record_from_value).collect())
}

/// Records missing any required field are skipped, not fatal.
fn record_from_value(value: &Value) -> Option<TickerRecord> {
    Some(TickerRecord {
        market: value.get("market")?.get("name")?.as_str()?.into(),
        target: value.get("target")?.as_str()?.into(),
        last: value.get("last")?.as_f64()?,
        converted_volume_usd: value
            .get("converted_volume")
            .and_then(|v| v.get("usd"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        is_stale: value
            .get("is_stale")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        is_anomaly: value
            .get("is_anomaly")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Fetch and parse the aggregated ticker list.
pub async fn fetch_tickers(client: &Client) -> Result<Vec<TickerRecord>, FeedError> {
    let doc = fetch_json(client, TICKERS_URL, "tickers").await?;
    parse_tickers(&doc)
}
