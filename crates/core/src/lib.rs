//! Core data types for the USDT/BRL quote aggregator.

pub mod error;
pub mod exchange;
pub mod quote;
pub mod quote_currency;
pub mod simulation;

pub use error::*;
pub use exchange::*;
pub use quote::*;
pub use quote_currency::*;
pub use simulation::*;
