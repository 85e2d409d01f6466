//! Price fetching for the USDT/BRL quote aggregator.
//!
//! ## Architecture
//!
//! - `adapter/` - per-exchange spot ticker endpoints and field-path extraction
//! - `tickers` - the aggregated market-ticker source (one call, many venues)
//! - `conversion` - BRL-per-USD rate resolution with a fallback chain
//! - `aggregator` - reconciles all candidate prices into one quote per exchange

pub mod adapter;
pub mod aggregator;
pub mod client;
pub mod conversion;
pub mod error;
pub mod tickers;

pub use adapter::{
    fetch_direct_price, BinanceAdapter, BybitAdapter, CoinbaseAdapter, DirectSource, KuCoinAdapter,
};
pub use aggregator::*;
pub use client::*;
pub use conversion::*;
pub use error::*;
pub use tickers::*;
