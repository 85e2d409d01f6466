//! Error types for feed operations.

use thiserror::Error;

/// Errors that can occur while fetching prices or conversion rates.
///
/// Failures at the single-source granularity are absorbed by the
/// aggregator and surface as missing quotes, never as call failures.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{src}: HTTP status {status}")]
    Status { src: &'static str, status: u16 },

    #[error("{src}: failed to parse response: {reason}")]
    Parse {
        src: &'static str,
        reason: String,
    },

    #[error("{src}: no numeric price at the expected field path")]
    MissingPrice { src: &'static str },

    #[error("{src}: implausible price {value}")]
    ImplausiblePrice { src: &'static str, value: f64 },

    #[error("no conversion source produced a BRL rate")]
    ConversionUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::Status {
            src: "Binance",
            status: 503,
        };
        assert_eq!(err.to_string(), "Binance: HTTP status 503");

        let err = FeedError::MissingPrice { src: "KuCoin" };
        assert!(err.to_string().contains("KuCoin"));
    }
}
