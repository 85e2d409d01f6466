//! Telegram bot surface for quote simulations.

pub mod config;
pub mod format;
pub mod telegram;

pub use config::*;
pub use format::*;
pub use telegram::*;
