//! Input validation for operator-supplied values.

use thiserror::Error;

/// Rejected operator input. Validation happens before any computation;
/// a rejected value never produces partial results or mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInput {
    #[error("amount must be a positive finite number, got {0}")]
    Amount(f64),

    #[error("resale price must be a positive finite number, got {0}")]
    ResalePrice(f64),
}

/// Validate a simulation amount in BRL.
pub fn validate_amount(amount: f64) -> Result<f64, InvalidInput> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(InvalidInput::Amount(amount))
    }
}

/// Validate a resale price in BRL per USDT.
pub fn validate_resale_price(price: f64) -> Result<f64, InvalidInput> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(InvalidInput::ResalePrice(price))
    }
}
