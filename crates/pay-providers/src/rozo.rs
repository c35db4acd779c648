//! # Payment-Intent Provider
//!
//! Creates a payment intent and returns where the payer must send funds.

use crate::config::ProvidersConfig;
use crate::http::{build_client, send_json};
use async_trait::async_trait;
use pay_core::{
    IntentProvider, PaymentApiResponse, PaymentIntentRequest, PaymentIntentResult, PaymentResult,
};
use reqwest::Client;
use tracing::{debug, instrument};

const PROVIDER: &str = "rozo";

pub struct RozoIntentProvider {
    url: String,
    auth_header: String,
    client: Client,
}

impl RozoIntentProvider {
    pub fn new(config: &ProvidersConfig) -> PaymentResult<Self> {
        Ok(Self {
            url: config.rozo_api_url.clone(),
            auth_header: config.rozo_auth_header(),
            client: build_client(config.timeout)?,
        })
    }
}

#[async_trait]
impl IntentProvider for RozoIntentProvider {
    #[instrument(skip(self, request), fields(order_id = %request.metadata.merchant_order_id))]
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> PaymentResult<PaymentIntentResult> {
        debug!(
            "Creating payment intent: app_id={}, amount_units={}",
            request.app_id, request.destination.amount_units
        );

        let http = self
            .client
            .post(&self.url)
            .header("Authorization", &self.auth_header)
            .json(request);

        let response: PaymentApiResponse = send_json(PROVIDER, http).await?;
        response.into_result(PROVIDER)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
