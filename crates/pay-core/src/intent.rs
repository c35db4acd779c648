//! # Payment Intent
//!
//! Typed request and response shapes for the payment-intent provider and the
//! builder that turns a `ServiceConfig` plus amounts into a request.
//!
//! Merchant order ids are `{prefix}-{epoch-millis}`. Two requests for the
//! same merchant within one millisecond get the same id; the provider's
//! order-id format depends on this shape, so no extra uniqueness is added.

use crate::amount::{format_decimal, format_local_amount, format_usd_fixed};
use crate::error::{PaymentError, PaymentResult};
use crate::merchant::ServiceConfig;
use crate::template::render;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use rand::{rngs::OsRng, RngCore};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Length of the provider-side order id
pub const PROVIDER_ORDER_ID_LEN: usize = 11;

// =============================================================================
// Request payload
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub app_id: String,
    pub display: IntentDisplay,
    pub destination: IntentDestination,
    pub external_id: String,
    pub metadata: IntentMetadata,
    pub preferred_chain: String,
    pub preferred_token: String,
    pub preferred_token_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDisplay {
    pub intent: String,
    /// Unformatted USD decimal string
    pub payment_value: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDestination {
    pub destination_address: String,
    pub chain_id: String,
    pub amount_units: String,
    pub token_symbol: String,
    pub token_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentItem {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentMetadata {
    /// Provider-side order id
    #[serde(rename = "daimoOrderId")]
    pub provider_order_id: String,
    #[serde(rename = "preferredChain")]
    pub preferred_chain: String,
    #[serde(rename = "preferredToken")]
    pub preferred_token: String,
    #[serde(rename = "preferredTokenAddress")]
    pub preferred_token_address: String,
    pub intent: String,
    pub items: Vec<IntentItem>,
    pub payer: BTreeMap<String, String>,
    #[serde(rename = "appId")]
    pub app_id: String,
    pub amount_local: String,
    pub currency_local: String,
    pub merchant_order_id: String,
    #[serde(rename = "receiptUrl")]
    pub receipt_url: String,
    #[serde(rename = "customDeeplinkUrl")]
    pub custom_deeplink_url: String,
}

// =============================================================================
// Response payload
// =============================================================================

/// Provider response; only the fields the pipeline consumes are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentApiResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub destination: ResponseDestination,
    #[serde(default)]
    pub metadata: Option<ResponseMetadata>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDestination {
    pub destination_address: String,
    pub amount_units: String,
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default)]
    pub receiving_address: Option<String>,
}

/// Where to send funds and how much the provider expects
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentResult {
    pub receiving_address: String,
    pub usd_amount: Decimal,
    /// Provider-side intent id, when returned
    pub intent_id: Option<String>,
}

impl PaymentApiResponse {
    /// Prefer `metadata.receivingAddress`, fall back to the destination address.
    pub fn into_result(self, provider: &str) -> PaymentResult<PaymentIntentResult> {
        let receiving_address = self
            .metadata
            .and_then(|m| m.receiving_address)
            .filter(|a| !a.is_empty())
            .unwrap_or(self.destination.destination_address);

        if receiving_address.is_empty() {
            return Err(PaymentError::malformed(provider, "empty receiving address"));
        }

        let usd_amount: Decimal = self.destination.amount_units.trim().parse().map_err(|e| {
            PaymentError::malformed(
                provider,
                format!(
                    "invalid destination.amountUnits {:?}: {}",
                    self.destination.amount_units, e
                ),
            )
        })?;

        Ok(PaymentIntentResult {
            receiving_address,
            usd_amount,
            intent_id: self.id,
        })
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Fixed settlement chain, token and receipt configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationConfig {
    pub destination_address: String,
    pub chain_id: String,
    pub token_symbol: String,
    pub token_address: String,
    pub preferred_chain: String,
    pub preferred_token: String,
    pub preferred_token_address: String,
    /// Receipt URL; must contain `{order_id}`
    pub receipt_url_template: String,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            // USDC on Base
            destination_address: "0x5772FBe7a7817ef7F586215CA8b23b8dD22C8897".to_string(),
            chain_id: "8453".to_string(),
            token_symbol: "USDC".to_string(),
            token_address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
            // USDC on Polygon
            preferred_chain: "137".to_string(),
            preferred_token: "USDC".to_string(),
            preferred_token_address: "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359".to_string(),
            receipt_url_template: "https://ns.rozo.ai/payment/success?order_id={order_id}"
                .to_string(),
        }
    }
}

/// Per-call identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIds {
    pub merchant_order_id: String,
    pub provider_order_id: String,
}

impl OrderIds {
    /// `{prefix}-{epoch-millis}` plus a fresh provider order id
    pub fn generate(prefix: &str) -> Self {
        Self {
            merchant_order_id: format!("{}-{}", prefix, Utc::now().timestamp_millis()),
            provider_order_id: generate_provider_order_id(),
        }
    }
}

/// Random URL-safe token, lowercased, without `-`/`_`, at most 11 chars.
pub fn generate_provider_order_id() -> String {
    let mut bytes = [0u8; 8];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD
        .encode(bytes)
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .take(PROVIDER_ORDER_ID_LEN)
        .collect::<String>()
        .to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct IntentBuilder {
    destination: DestinationConfig,
}

impl IntentBuilder {
    pub fn new(destination: DestinationConfig) -> Self {
        Self { destination }
    }

    /// Build a request with freshly generated order ids
    pub fn build(
        &self,
        config: &ServiceConfig,
        local_amount: Decimal,
        usd_amount: Decimal,
    ) -> PaymentResult<PaymentIntentRequest> {
        self.build_with_ids(
            config,
            local_amount,
            usd_amount,
            OrderIds::generate(&config.order_prefix),
        )
    }

    /// Build a request with caller-supplied ids
    pub fn build_with_ids(
        &self,
        config: &ServiceConfig,
        local_amount: Decimal,
        usd_amount: Decimal,
        ids: OrderIds,
    ) -> PaymentResult<PaymentIntentRequest> {
        let local = format_local_amount(local_amount);
        let usd_fixed = format_usd_fixed(usd_amount);
        let usd_raw = format_decimal(usd_amount);
        let order_id = ids.merchant_order_id.as_str();

        let vars = [
            ("merchant_id", config.merchant_id.as_str()),
            ("merchant_name", config.merchant_name.as_str()),
            ("currency", config.currency_local.as_str()),
            ("order_id", order_id),
            ("local_amount", local.as_str()),
            ("usd_amount", usd_fixed.as_str()),
        ];

        let intent = render(&config.intent_template, &vars, &["usd_amount"])?;
        let item_desc = render(
            &config.item_desc_template,
            &vars,
            &["local_amount", "usd_amount"],
        )?;
        let deeplink = render(&config.deeplink_template, &vars, &["local_amount"])?;
        let receipt_url = render(&self.destination.receipt_url_template, &vars, &["order_id"])?;

        let d = &self.destination;
        Ok(PaymentIntentRequest {
            app_id: config.app_id.clone(),
            display: IntentDisplay {
                intent: intent.clone(),
                payment_value: usd_raw.clone(),
                currency: "USD".to_string(),
            },
            destination: IntentDestination {
                destination_address: d.destination_address.clone(),
                chain_id: d.chain_id.clone(),
                amount_units: usd_raw,
                token_symbol: d.token_symbol.clone(),
                token_address: d.token_address.clone(),
            },
            external_id: String::new(),
            metadata: IntentMetadata {
                provider_order_id: ids.provider_order_id,
                preferred_chain: d.preferred_chain.clone(),
                preferred_token: d.preferred_token.clone(),
                preferred_token_address: d.preferred_token_address.clone(),
                intent,
                items: vec![
                    IntentItem {
                        name: config.item_name.clone(),
                        description: item_desc,
                    },
                    IntentItem {
                        name: "Order ID".to_string(),
                        description: ids.merchant_order_id.clone(),
                    },
                ],
                payer: BTreeMap::new(),
                app_id: config.app_id.clone(),
                amount_local: local,
                currency_local: config.currency_local.clone(),
                merchant_order_id: ids.merchant_order_id,
                receipt_url,
                custom_deeplink_url: deeplink,
            },
            preferred_chain: d.preferred_chain.clone(),
            preferred_token: d.preferred_token.clone(),
            preferred_token_address: d.preferred_token_address.clone(),
        })
    }
}
