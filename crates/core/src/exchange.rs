//! Exchange identifiers.

use serde::{Deserialize, Serialize};

/// Supported exchange identifier.
///
/// The set is closed: every quote and simulation row refers to one of these
/// four venues, and aggregation results always cover all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    Binance,
    Bybit,
    KuCoin,
    Coinbase,
}

impl Exchange {
    /// All supported exchanges, in the fixed presentation order.
    pub fn all() -> &'static [Exchange] {
        &[
            Exchange::Binance,
            Exchange::Bybit,
            Exchange::KuCoin,
            Exchange::Coinbase,
        ]
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "binance" => Some(Exchange::Binance),
            "bybit" => Some(Exchange::Bybit),
            "kucoin" => Some(Exchange::KuCoin),
            "coinbase" => Some(Exchange::Coinbase),
            _ => None,
        }
    }

    /// Get display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Exchange::Binance => "Binance",
            Exchange::Bybit => "Bybit",
            Exchange::KuCoin => "KuCoin",
            Exchange::Coinbase => "Coinbase",
        }
    }

    /// Provider token used to recognize this exchange in aggregator
    /// market names ("Binance Brasil", "KuCoin (spot)", ...).
    fn market_token(self) -> &'static str {
        match self {
            Exchange::Binance => "binance",
            Exchange::Bybit => "bybit",
            Exchange::KuCoin => "kucoin",
            Exchange::Coinbase => "coinbase",
        }
    }

    /// Check whether an aggregator market name refers to this exchange.
    pub fn matches_market_name(self, market_name: &str) -> bool {
        market_name.to_lowercase().contains(self.market_token())
    }

    /// Resolve an aggregator market name to a supported exchange.
    /// Returns `None` for markets outside the supported set.
    pub fn from_market_name(market_name: &str) -> Option<Exchange> {
        let lower = market_name.to_lowercase();
        Exchange::all()
            .iter()
            .copied()
            .find(|exchange| lower.contains(exchange.market_token()))
    }

    /// Default taker fee fraction charged on the USDT purchase.
    pub fn default_fee_fraction(self) -> f64 {
        match self {
            Exchange::Binance | Exchange::Bybit | Exchange::KuCoin => 0.001,
            Exchange::Coinbase => 0.005,
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
