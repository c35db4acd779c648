//! # Exchange Rates
//!
//! Live USD-base quote from the exchange-rate service.

use crate::config::ProvidersConfig;
use crate::http::{build_client, send_json};
use async_trait::async_trait;
use pay_core::{PaymentError, PaymentResult, RateQuote, RateSource};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::instrument;

const PROVIDER: &str = "rates";

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

pub struct ExchangeRateApi {
    url: String,
    client: Client,
}

impl ExchangeRateApi {
    pub fn new(config: &ProvidersConfig) -> PaymentResult<Self> {
        Ok(Self {
            url: config.rates_api_url.clone(),
            client: build_client(config.timeout)?,
        })
    }
}

impl LatestRatesResponse {
    fn into_quote(self) -> PaymentResult<RateQuote> {
        let mut quote = RateQuote::new();
        for (code, rate) in self.rates {
            let rate = Decimal::try_from(rate)
                .ok()
                .filter(|r| *r > Decimal::ZERO)
                .ok_or_else(|| {
                    PaymentError::malformed(PROVIDER, format!("invalid rate {} for {}", rate, code))
                })?;
            quote = quote.with_rate(code, rate);
        }
        Ok(quote)
    }
}

#[async_trait]
impl RateSource for ExchangeRateApi {
    #[instrument(skip(self))]
    async fn usd_rates(&self) -> PaymentResult<RateQuote> {
        let response: LatestRatesResponse = send_json(PROVIDER, self.client.get(&self.url)).await?;
        response.into_quote()
    }
}
