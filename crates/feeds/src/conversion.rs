//! BRL conversion-rate resolution.
//!
//! Produces a single "BRL per 1 USD-equivalent" scalar from an ordered
//! fallback chain: a stablecoin/BRL pair, then a USD/BRL spot pair, then
//! the central bank's daily reference rate. Each step is attempted only
//! after the previous one failed; exhausting the chain is a hard failure
//! for the resolver, but direct-BRL quotes remain usable without it.

use crate::client::fetch_json;
use crate::error::FeedError;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

/// A resolved BRL-per-USD rate plus the source that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRate {
    pub rate: f64,
    pub source: &'static str,
}

/// One step of the fallback chain: an endpoint and its field path.
struct RateSource {
    name: &'static str,
    url: &'static str,
    extract: fn(&Value) -> Option<f64>,
}

const SOURCES: [RateSource; 3] = [
    RateSource {
        name: "coingecko tether/brl",
        url: "https://api.coingecko.com/api/v3/simple/price?ids=tether&vs_currencies=brl",
        extract: extract_tether_brl,
    },
    RateSource {
        name: "awesomeapi usd/brl",
        url: "https://economia.awesomeapi.com.br/json/last/USD-BRL",
        extract: extract_usd_brl_spot,
    },
    RateSource {
        name: "bcb usd/brl reference",
        url: "https://api.bcb.gov.br/dados/serie/bcdata.sgs.1/dados/ultimos/1?formato=json",
        extract: extract_bcb_reference,
    },
];

/// `{"tether":{"brl":5.21}}`
fn extract_tether_brl(doc: &Value) -> Option<f64> {
    doc.get("tether")?.get("brl")?.as_f64()
}

/// `{"USDBRL":{"bid":"5.20", ...}}`
fn extract_usd_brl_spot(doc: &Value) -> Option<f64> {
    doc.get("USDBRL")?.get("bid")?.as_str()?.trim().parse().ok()
}

/// SGS series 1 (PTAX sell): `[{"data":"...","valor":"5.2013"}]`
fn extract_bcb_reference(doc: &Value) -> Option<f64> {
    doc.as_array()?
        .last()?
        .get("valor")?
        .as_str()?
        .trim()
        .parse()
        .ok()
}

/// Extract and validate a rate from a source's response document.
fn rate_from_doc(source: &RateSource, doc: &Value) -> Result<f64, FeedError> {
    let rate = (source.extract)(doc).ok_or(FeedError::MissingPrice {
        src: source.name,
    })?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(FeedError::ImplausiblePrice {
            src: source.name,
            value: rate,
        });
    }
    Ok(rate)
}

/// Resolves the BRL conversion rate, trying sources in priority order.
pub struct ConversionResolver {
    client: Client,
}

impl ConversionResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Walk the fallback chain and return the first usable rate.
    /// Each failed step logs a warning; exhausting every step returns
    /// `FeedError::ConversionUnavailable`.
    pub async fn resolve(&self) -> Result<ConversionRate, FeedError> {
        for source in &SOURCES {
            match self.try_source(source).await {
                Ok(rate) => {
                    info!(source = source.name, rate, "resolved BRL conversion rate");
                    return Ok(ConversionRate {
                        rate,
                        source: source.name,
                    });
                }
                Err(e) => {
                    warn!(source = source.name, error = %e, "conversion source failed");
                }
            }
        }
        Err(FeedError::ConversionUnavailable)
    }

    async fn try_source(&self, source: &RateSource) -> Result<f64, FeedError> {
        let doc = fetch_json(&self.client, source.url, source.name).await?;
        rate_from_doc(source, &doc)
    }
}
