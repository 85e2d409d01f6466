//! Quote types and the per-call join with static exchange details.

use crate::Exchange;
use serde::{Deserialize, Serialize};

/// Best known BRL buy-price for 1 USDT on an exchange at fetch time.
///
/// `buy_price` is `None` when no usable quote was obtained; the exchange is
/// still present in the aggregation result. Request-scoped, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    #[serde(rename = "name")]
    pub exchange: Exchange,
    #[serde(rename = "buyPrice")]
    pub buy_price: Option<f64>,
}

impl ExchangeQuote {
    /// Quote placeholder for an exchange that produced no usable price.
    pub fn unavailable(exchange: Exchange) -> Self {
        Self {
            exchange,
            buy_price: None,
        }
    }
}

/// Static per-exchange configuration, not derived from live data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeDetails {
    pub exchange: Exchange,
    /// Taker fee charged on the USDT purchase, as a fraction in [0, 1).
    pub fee_fraction: f64,
}

impl ExchangeDetails {
    pub fn new(exchange: Exchange, fee_fraction: f64) -> Self {
        Self {
            exchange,
            fee_fraction,
        }
    }

    /// Details for every supported exchange with its default fee.
    pub fn defaults() -> Vec<ExchangeDetails> {
        Exchange::all()
            .iter()
            .map(|&exchange| ExchangeDetails::new(exchange, exchange.default_fee_fraction()))
            .collect()
    }
}

/// An exchange's static details joined with its current buy price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedExchange {
    pub exchange: Exchange,
    pub fee_fraction: f64,
    pub buy_price: Option<f64>,
}

/// Join live quotes with static details, preserving quote order.
/// A quote whose exchange has no configured details is silently dropped.
pub fn join_quotes(quotes: &[ExchangeQuote], details: &[ExchangeDetails]) -> Vec<PricedExchange> {
    quotes
        .iter()
        .filter_map(|quote| {
            details
                .iter()
                .find(|d| d.exchange == quote.exchange)
                .map(|d| PricedExchange {
                    exchange: quote.exchange,
                    fee_fraction: d.fee_fraction,
                    buy_price: quote.buy_price,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quote_serializes_presentation_field_names() {
        let quote = ExchangeQuote {
            exchange: Exchange::Binance,
            buy_price: Some(5.2),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["name"], "Binance");
        assert_eq!(json["buyPrice"], 5.2);

        let unavailable = ExchangeQuote::unavailable(Exchange::KuCoin);
        let json = serde_json::to_value(&unavailable).unwrap();
        assert!(json["buyPrice"].is_null());
    }

    #[test]
    fn test_default_details_cover_all_exchanges() {
        let details = ExchangeDetails::defaults();
        assert_eq!(details.len(), Exchange::all().len());
        assert_eq!(details[0].exchange, Exchange::Binance);
        assert_eq!(details[3].fee_fraction, 0.005);
    }

    #[test]
    fn test_join_preserves_order_and_fees() {
        let quotes = vec![
            ExchangeQuote {
                exchange: Exchange::Binance,
                buy_price: Some(5.21),
            },
            ExchangeQuote::unavailable(Exchange::Coinbase),
        ];
        let joined = join_quotes(&quotes, &ExchangeDetails::defaults());
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].exchange, Exchange::Binance);
        assert_eq!(joined[0].fee_fraction, 0.001);
        assert_eq!(joined[0].buy_price, Some(5.21));
        assert_eq!(joined[1].exchange, Exchange::Coinbase);
        assert_eq!(joined[1].buy_price, None);
    }

    #[test]
    fn test_join_drops_exchanges_without_details() {
        let quotes = vec![
            ExchangeQuote {
                exchange: Exchange::Binance,
                buy_price: Some(5.21),
            },
            ExchangeQuote {
                exchange: Exchange::Bybit,
                buy_price: Some(5.19),
            },
        ];
        let details = vec![ExchangeDetails::new(Exchange::Bybit, 0.001)];
        let joined = join_quotes(&quotes, &details);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].exchange, Exchange::Bybit);
    }
}
