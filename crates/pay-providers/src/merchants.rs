//! # Merchant Store
//!
//! Authenticated read of the merchant table from the directory's REST API.

use crate::config::ProvidersConfig;
use crate::http::{build_client, send_json};
use async_trait::async_trait;
use pay_core::{Merchant, MerchantSource, PaymentResult};
use reqwest::Client;
use tracing::{debug, instrument};

const PROVIDER: &str = "merchants";

pub struct SupabaseMerchantSource {
    url: String,
    api_key: String,
    auth_header: String,
    client: Client,
}

impl SupabaseMerchantSource {
    pub fn new(config: &ProvidersConfig) -> PaymentResult<Self> {
        Ok(Self {
            url: config.merchants_api_url.clone(),
            api_key: config.merchants_api_key.clone(),
            auth_header: config.merchants_auth_header(),
            client: build_client(config.timeout)?,
        })
    }
}

#[async_trait]
impl MerchantSource for SupabaseMerchantSource {
    #[instrument(skip(self))]
    async fn fetch_merchants(&self) -> PaymentResult<Vec<Merchant>> {
        let request = self
            .client
            .get(&self.url)
            .header("Authorization", &self.auth_header)
            .header("apikey", &self.api_key);

        let merchants: Vec<Merchant> = send_json(PROVIDER, request).await?;
        debug!("Fetched {} merchant rows", merchants.len());
        Ok(merchants)
    }
}
