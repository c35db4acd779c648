//! # Amount Formatting
//!
//! Decimal helpers shared by the rate converter and the intent builder.

use crate::error::{PaymentError, PaymentResult};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounding applied to converted USD amounts (banker's rounding).
pub const USD_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Decimal places kept for USD amounts
pub const USD_DECIMALS: u32 = 2;

/// Round a USD amount to cents
pub fn round_usd(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(USD_DECIMALS, USD_ROUNDING)
}

/// Format a local amount: integer string when there is no fractional part,
/// otherwise its shortest decimal representation ("50", "50.5").
pub fn format_local_amount(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        amount.trunc().to_string()
    } else {
        amount.normalize().to_string()
    }
}

/// Format a USD amount with exactly two decimals ("11.10")
pub fn format_usd_fixed(amount: Decimal) -> String {
    format!("{:.2}", round_usd(amount))
}

/// Unformatted decimal string with trailing zeros removed ("11.1", "50")
pub fn format_decimal(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Reject zero and negative amounts
pub fn ensure_positive(amount: Decimal) -> PaymentResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidRequest(format!(
            "Amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}
