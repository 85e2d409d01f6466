//! Quote currency types.

use serde::{Deserialize, Serialize};

/// Denomination of an upstream price record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteCurrency {
    /// Brazilian Real (direct pairs, no conversion needed)
    BRL,
    /// US Dollar
    USD,
    /// Tether
    USDT,
    /// USD Coin
    USDC,
}

impl QuoteCurrency {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BRL" => Some(QuoteCurrency::BRL),
            "USD" => Some(QuoteCurrency::USD),
            "USDT" => Some(QuoteCurrency::USDT),
            "USDC" => Some(QuoteCurrency::USDC),
            _ => None,
        }
    }

    /// Check if this is USD or a USD-pegged stablecoin.
    /// These prices proxy 1:1 parity and need BRL conversion.
    pub fn is_usd_equivalent(self) -> bool {
        matches!(
            self,
            QuoteCurrency::USD | QuoteCurrency::USDT | QuoteCurrency::USDC
        )
    }

    /// Get display name.
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteCurrency::BRL => "BRL",
            QuoteCurrency::USD => "USD",
            QuoteCurrency::USDT => "USDT",
            QuoteCurrency::USDC => "USDC",
        }
    }
}

impl std::fmt::Display for QuoteCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
