//! Price aggregation across direct adapters and the ticker source.
//!
//! All candidate sources are fetched concurrently and merged into exactly
//! one quote per supported exchange. Direct BRL prices outrank prices
//! converted from USD; within a rank the first valid candidate wins. The
//! result list's length and exchange order never vary, whatever fails
//! upstream.

use crate::adapter::{
    fetch_direct_price, BinanceAdapter, BybitAdapter, CoinbaseAdapter, KuCoinAdapter,
};
use crate::client::{build_client, DEFAULT_TIMEOUT_SECS};
use crate::conversion::{ConversionRate, ConversionResolver};
use crate::error::FeedError;
use crate::tickers::{fetch_tickers, TickerRecord};
use braitsure_core::{Exchange, ExchangeQuote, QuoteCurrency};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

/// Reconciliation rank: direct BRL quotes displace converted USD quotes.
const PRIORITY_DIRECT_BRL: u8 = 1;
const PRIORITY_CONVERTED_USD: u8 = 0;

/// Aggregation policy knobs. The numeric thresholds are operator policy,
/// not a hard contract.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Per-request timeout on every outbound fetch.
    pub timeout: Duration,
    /// Ticker records below this converted USD volume are skipped.
    pub min_converted_volume_usd: f64,
    /// A direct BRL price at or below this floor is rejected as an
    /// inverted or garbage pair.
    pub brl_floor: f64,
    /// Accepted band for USD-parity prices, inclusive.
    pub usd_band: (f64, f64),
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            min_converted_volume_usd: 1000.0,
            brl_floor: 1.0,
            usd_band: (0.9, 1.1),
        }
    }
}

/// A candidate price for one exchange, tagged with its reconciliation rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub exchange: Exchange,
    pub price: f64,
    pub priority: u8,
}

/// Fetches every candidate source and reconciles them per exchange.
pub struct PriceAggregator {
    client: Client,
    resolver: ConversionResolver,
    config: AggregatorConfig,
}

impl PriceAggregator {
    pub fn new(config: AggregatorConfig) -> Result<Self, FeedError> {
        let client = build_client(config.timeout)?;
        let resolver = ConversionResolver::new(client.clone());
        Ok(Self {
            client,
            resolver,
            config,
        })
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Fetch one quote per supported exchange.
    ///
    /// Direct adapters, the ticker source, and the conversion resolver run
    /// in a single concurrent join; each failure is absorbed into a missing
    /// candidate. The returned list always covers `Exchange::all()` in
    /// order, with `None` for exchanges no source could price.
    pub async fn fetch_quotes(&self) -> Vec<ExchangeQuote> {
        let (direct, tickers, rate) = tokio::join!(
            self.fetch_direct_candidates(),
            fetch_tickers(&self.client),
            self.resolver.resolve(),
        );

        let rate = match rate {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!(error = %e, "no BRL conversion rate; USD-denominated records will be dropped");
                None
            }
        };

        let mut candidates = direct;
        match tickers {
            Ok(records) => {
                candidates.extend(
                    records
                        .iter()
                        .filter_map(|record| self.classify_record(record, rate.as_ref())),
                );
            }
            Err(e) => warn!(error = %e, "ticker source unavailable"),
        }

        reconcile(&candidates)
    }

    /// Query the four direct USDT/BRL endpoints concurrently.
    /// Each result is sanity-checked and logged per exchange.
    async fn fetch_direct_candidates(&self) -> Vec<Candidate> {
        let (binance, bybit, kucoin, coinbase) = tokio::join!(
            fetch_direct_price::<BinanceAdapter>(&self.client),
            fetch_direct_price::<BybitAdapter>(&self.client),
            fetch_direct_price::<KuCoinAdapter>(&self.client),
            fetch_direct_price::<CoinbaseAdapter>(&self.client),
        );

        let results = [
            (Exchange::Binance, binance),
            (Exchange::Bybit, bybit),
            (Exchange::KuCoin, kucoin),
            (Exchange::Coinbase, coinbase),
        ];

        results
            .into_iter()
            .filter_map(|(exchange, result)| match result {
                Ok(price) if self.plausible_brl(price) => {
                    info!(exchange = exchange.as_str(), price, "direct quote");
                    Some(Candidate {
                        exchange,
                        price,
                        priority: PRIORITY_DIRECT_BRL,
                    })
                }
                Ok(price) => {
                    warn!(
                        exchange = exchange.as_str(),
                        price, "direct quote outside BRL sanity band"
                    );
                    None
                }
                Err(e) => {
                    warn!(exchange = exchange.as_str(), error = %e, "direct quote failed");
                    None
                }
            })
            .collect()
    }

    /// Turn a ticker record into a candidate, or reject it.
    ///
    /// Rejection reasons: unknown market, stale or anomalous flag, volume
    /// below the configured minimum, unsupported target currency, price
    /// outside its sanity band, or a USD record with no conversion rate.
    fn classify_record(
        &self,
        record: &TickerRecord,
        rate: Option<&ConversionRate>,
    ) -> Option<Candidate> {
        let exchange = Exchange::from_market_name(&record.market)?;

        if record.is_stale || record.is_anomaly {
            return None;
        }
        if record.converted_volume_usd < self.config.min_converted_volume_usd {
            return None;
        }

        match QuoteCurrency::from_str(&record.target) {
            Some(QuoteCurrency::BRL) if self.plausible_brl(record.last) => Some(Candidate {
                exchange,
                price: record.last,
                priority: PRIORITY_DIRECT_BRL,
            }),
            Some(currency) if currency.is_usd_equivalent() && self.plausible_usd(record.last) => {
                rate.map(|rate| Candidate {
                    exchange,
                    price: record.last * rate.rate,
                    priority: PRIORITY_CONVERTED_USD,
                })
            }
            _ => None,
        }
    }

    fn plausible_brl(&self, price: f64) -> bool {
        price.is_finite() && price > self.config.brl_floor
    }

    fn plausible_usd(&self, price: f64) -> bool {
        let (low, high) = self.config.usd_band;
        price.is_finite() && price >= low && price <= high
    }
}

/// Merge candidates into one quote per exchange.
///
/// Keyed accumulation with a replace-if-strictly-higher-priority rule;
/// within the same priority the first occurrence wins. The fixed exchange
/// list is projected at the end so absent exchanges become explicit `None`
/// entries rather than missing ones.
pub fn reconcile(candidates: &[Candidate]) -> Vec<ExchangeQuote> {
    let mut best: HashMap<Exchange, (f64, u8)> = HashMap::new();

    for candidate in candidates {
        match best.get(&candidate.exchange) {
            Some((_, held)) if *held >= candidate.priority => {}
            _ => {
                best.insert(candidate.exchange, (candidate.price, candidate.priority));
            }
        }
    }

    Exchange::all()
        .iter()
        .map(|&exchange| ExchangeQuote {
            exchange,
            buy_price: best.get(&exchange).map(|(price, _)| *price),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn aggregator() -> PriceAggregator {
        PriceAggregator::new(AggregatorConfig::default()).unwrap()
    }

    fn record(market: &str, target: &str, last: f64) -> TickerRecord {
        TickerRecord {
            market: market.into(),
            target: target.into(),
            last,
            converted_volume_usd: 50_000.0,
            is_stale: false,
            is_anomaly: false,
        }
    }

    fn rate(value: f64) -> ConversionRate {
        ConversionRate {
            rate: value,
            source: "test",
        }
    }

    #[test]
    fn test_reconcile_projects_full_exchange_set() {
        let quotes = reconcile(&[]);
        assert_eq!(quotes.len(), 4);
        for (quote, &exchange) in quotes.iter().zip(Exchange::all()) {
            assert_eq!(quote.exchange, exchange);
            assert_eq!(quote.buy_price, None);
        }
    }

    #[test]
    fn test_reconcile_prefers_direct_brl() {
        let candidates = [
            Candidate {
                exchange: Exchange::Binance,
                price: 5.30,
                priority: PRIORITY_CONVERTED_USD,
            },
            Candidate {
                exchange: Exchange::Binance,
                price: 5.21,
                priority: PRIORITY_DIRECT_BRL,
            },
        ];
        let quotes = reconcile(&candidates);
        assert_eq!(quotes[0].buy_price, Some(5.21));
    }

    #[test]
    fn test_reconcile_keeps_first_within_same_priority() {
        let candidates = [
            Candidate {
                exchange: Exchange::Bybit,
                price: 5.19,
                priority: PRIORITY_DIRECT_BRL,
            },
            Candidate {
                exchange: Exchange::Bybit,
                price: 5.40,
                priority: PRIORITY_DIRECT_BRL,
            },
        ];
        let quotes = reconcile(&candidates);
        assert_eq!(quotes[1].buy_price, Some(5.19));
    }

    #[test]
    fn test_reconcile_later_direct_displaces_earlier_converted() {
        // Converted candidate arrives first; the direct one must win anyway.
        let candidates = [
            Candidate {
                exchange: Exchange::KuCoin,
                price: 5.35,
                priority: PRIORITY_CONVERTED_USD,
            },
            Candidate {
                exchange: Exchange::KuCoin,
                price: 5.20,
                priority: PRIORITY_DIRECT_BRL,
            },
            Candidate {
                exchange: Exchange::KuCoin,
                price: 5.50,
                priority: PRIORITY_CONVERTED_USD,
            },
        ];
        let quotes = reconcile(&candidates);
        assert_eq!(quotes[2].buy_price, Some(5.20));
    }

    #[test]
    fn test_classify_brl_record() {
        let agg = aggregator();
        let candidate = agg.classify_record(&record("Binance", "BRL", 5.21), None);
        assert_eq!(
            candidate,
            Some(Candidate {
                exchange: Exchange::Binance,
                price: 5.21,
                priority: PRIORITY_DIRECT_BRL,
            })
        );
    }

    #[test]
    fn test_classify_usd_record_converts() {
        let agg = aggregator();
        let candidate = agg.classify_record(&record("Coinbase Exchange", "USD", 1.0), Some(&rate(5.20)));
        let candidate = candidate.unwrap();
        assert_eq!(candidate.exchange, Exchange::Coinbase);
        assert_eq!(candidate.priority, PRIORITY_CONVERTED_USD);
        assert!((candidate.price - 5.20).abs() < 1e-12);
    }

    #[test]
    fn test_classify_usd_record_without_rate_is_dropped() {
        let agg = aggregator();
        assert_eq!(agg.classify_record(&record("Coinbase", "USDT", 1.0), None), None);
    }

    #[test]
    fn test_classify_rejects_stale_and_anomalous() {
        let agg = aggregator();
        let mut stale = record("Binance", "BRL", 5.21);
        stale.is_stale = true;
        assert_eq!(agg.classify_record(&stale, None), None);

        let mut anomaly = record("Binance", "BRL", 5.21);
        anomaly.is_anomaly = true;
        assert_eq!(agg.classify_record(&anomaly, None), None);
    }

    #[test]
    fn test_classify_rejects_low_volume() {
        let agg = aggregator();
        let mut thin = record("Bybit", "BRL", 5.19);
        thin.converted_volume_usd = 999.0;
        assert_eq!(agg.classify_record(&thin, None), None);
    }

    #[test]
    fn test_classify_rejects_out_of_band_prices() {
        let agg = aggregator();
        // Inverted BRL pair.
        assert_eq!(agg.classify_record(&record("Binance", "BRL", 0.19), None), None);
        // Depegged-looking parity price.
        assert_eq!(
            agg.classify_record(&record("Binance", "USDT", 1.4), Some(&rate(5.2))),
            None
        );
        assert_eq!(
            agg.classify_record(&record("Binance", "USDT", 0.5), Some(&rate(5.2))),
            None
        );
    }

    #[test]
    fn test_classify_ignores_unknown_markets_and_targets() {
        let agg = aggregator();
        assert_eq!(
            agg.classify_record(&record("Kraken", "BRL", 5.2), None),
            None
        );
        assert_eq!(
            agg.classify_record(&record("Binance", "EUR", 0.92), Some(&rate(5.2))),
            None
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = AggregatorConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.min_converted_volume_usd, 1000.0);
        assert_eq!(config.brl_floor, 1.0);
        assert_eq!(config.usd_band, (0.9, 1.1));
    }
}
