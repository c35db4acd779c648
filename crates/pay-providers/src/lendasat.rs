//! # Swap Provider
//!
//! Requests a Lightning invoice that settles into a stablecoin address.
//! The request carries only the hash lock; the preimage never leaves the process.

use crate::config::ProvidersConfig;
use crate::http::{build_client, send_json};
use async_trait::async_trait;
use pay_core::{LightningInvoiceResult, PaymentResult, SwapProvider, SwapRequest, SwapTerms};
use reqwest::Client;
use tracing::{debug, instrument};

const PROVIDER: &str = "lendasat";

pub struct LendasatSwapProvider {
    url: String,
    client: Client,
}

impl LendasatSwapProvider {
    pub fn new(config: &ProvidersConfig) -> PaymentResult<Self> {
        Ok(Self {
            url: config.lendasat_api_url.clone(),
            client: build_client(config.timeout)?,
        })
    }
}

/// Swap terms taken from the provider config
pub fn swap_terms(config: &ProvidersConfig) -> SwapTerms {
    SwapTerms {
        refund_pk: config.refund_pk.clone(),
        referral_code: config.referral_code.clone(),
        ..SwapTerms::default()
    }
}

#[async_trait]
impl SwapProvider for LendasatSwapProvider {
    #[instrument(skip(self, request), fields(polygon_address = %request.polygon_address))]
    async fn create_swap(&self, request: &SwapRequest) -> PaymentResult<LightningInvoiceResult> {
        debug!("Requesting swap: usd_amount={}", request.usd_amount);
        send_json(PROVIDER, self.client.post(&self.url).json(request)).await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
