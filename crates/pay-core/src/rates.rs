//! # Rate Converter
//!
//! Converts a local-currency amount to USD using a live quote.

use crate::amount::round_usd;
use crate::error::{PaymentError, PaymentResult};
use crate::provider::BoxedRateSource;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Exchange-rate quote with USD as base: 1 USD = `rates[code]` units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateQuote {
    pub rates: HashMap<String, Decimal>,
}

impl RateQuote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a rate
    pub fn with_rate(mut self, code: impl Into<String>, rate: Decimal) -> Self {
        self.rates.insert(code.into(), rate);
        self
    }

    /// Convert `amount` of `iso_code` to USD, rounded to cents.
    pub fn to_usd(&self, amount: Decimal, iso_code: &str) -> PaymentResult<Decimal> {
        let rate = self
            .rates
            .get(iso_code)
            .copied()
            .ok_or_else(|| PaymentError::RateLookup {
                currency: iso_code.to_string(),
            })?;

        if rate <= Decimal::ZERO {
            return Err(PaymentError::malformed(
                "rates",
                format!("non-positive rate {} for {}", rate, iso_code),
            ));
        }

        let usd = Decimal::ONE
            .checked_div(rate)
            .and_then(|inverse| amount.checked_mul(inverse))
            .ok_or_else(|| {
                PaymentError::InvalidRequest(format!(
                    "Amount {} {} is too large to convert",
                    amount, iso_code
                ))
            })?;

        Ok(round_usd(usd))
    }
}

/// Map display codes to ISO 4217 ("RM" is the Malaysian ringgit)
pub fn iso_currency(code: &str) -> &str {
    match code {
        "RM" | "MYR" => "MYR",
        other => other,
    }
}

/// Local-to-USD conversion against a `RateSource`
#[derive(Clone)]
pub struct RateConverter {
    source: BoxedRateSource,
}

impl RateConverter {
    pub fn new(source: BoxedRateSource) -> Self {
        Self { source }
    }

    /// Fetch a fresh quote and convert. No retry.
    pub async fn to_usd(&self, amount: Decimal, currency: &str) -> PaymentResult<Decimal> {
        let iso = iso_currency(currency);
        let quote = self.source.usd_rates().await?;
        let usd = quote.to_usd(amount, iso)?;
        debug!("Converted {} {} -> {} USD", amount, iso, usd);
        Ok(usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    struct FixedRates(RateQuote);

    #[async_trait]
    impl crate::provider::RateSource for FixedRates {
        async fn usd_rates(&self) -> PaymentResult<RateQuote> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_myr_conversion() {
        let quote = RateQuote::new().with_rate("MYR", dec!(4.5));
        assert_eq!(quote.to_usd(dec!(50), "MYR").unwrap(), dec!(11.11));
    }

    #[test]
    fn test_conversion_rounds_half_even() {
        let quote = RateQuote::new().with_rate("EUR", dec!(1));
        assert_eq!(quote.to_usd(dec!(2.125), "EUR").unwrap(), dec!(2.12));
        assert_eq!(quote.to_usd(dec!(2.135), "EUR").unwrap(), dec!(2.14));
        assert_eq!(quote.to_usd(dec!(0.005), "EUR").unwrap(), dec!(0.00));
    }

    #[test]
    fn test_missing_currency() {
        let quote = RateQuote::new().with_rate("MYR", dec!(4.5));
        let err = quote.to_usd(dec!(10), "SGD").unwrap_err();
        assert!(matches!(err, PaymentError::RateLookup { currency } if currency == "SGD"));
    }

    #[test]
    fn test_zero_rate_is_malformed() {
        let quote = RateQuote::new().with_rate("XXX", dec!(0));
        assert!(matches!(
            quote.to_usd(dec!(10), "XXX"),
            Err(PaymentError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_overflowing_amount_is_rejected() {
        let quote = RateQuote::new().with_rate("KWD", dec!(0.307));
        let err = quote
            .to_usd(dec!(50000000000000000000000000000), "KWD")
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidRequest(_)));
    }

    #[test]
    fn test_monotonic_and_deterministic() {
        let quote = RateQuote::new().with_rate("MYR", dec!(4.4721));
        let mut previous = Decimal::ZERO;
        for cents in (1..5000).step_by(37) {
            let amount = Decimal::new(cents, 2);
            let usd = quote.to_usd(amount, "MYR").unwrap();
            assert!(usd >= previous);
            assert_eq!(usd, quote.to_usd(amount, "MYR").unwrap());
            previous = usd;
        }
    }

    #[test]
    fn test_iso_currency_mapping() {
        assert_eq!(iso_currency("RM"), "MYR");
        assert_eq!(iso_currency("MYR"), "MYR");
        assert_eq!(iso_currency("SGD"), "SGD");
    }

    #[tokio::test]
    async fn test_converter_maps_display_code() {
        let converter = RateConverter::new(Arc::new(FixedRates(
            RateQuote::new().with_rate("MYR", dec!(4.5)),
        )));
        assert_eq!(converter.to_usd(dec!(50), "RM").await.unwrap(), dec!(11.11));
    }
}
