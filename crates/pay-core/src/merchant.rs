//! # Merchant Types
//!
//! Merchant records from the external directory and the per-merchant
//! `ServiceConfig` derived from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A merchant row from the directory store (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    /// Unique lowercase identifier (e.g., "cafe", "ride")
    pub id: String,

    /// Display name
    pub name: String,

    /// Local currency display code (e.g., "RM", "USD")
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Cashback percentage advertised by the merchant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback: Option<i64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub prepaid_amount: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Merchant {
    /// Create a merchant with required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            currency: currency.into(),
            logo_url: None,
            description: None,
            cashback: None,
            prepaid_amount: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Filtering, renaming and ordering rules applied to directory rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPolicy {
    /// Legacy or duplicate ids dropped from the listing
    #[serde(default)]
    pub excluded: Vec<String>,

    /// Ids listed first, in this order
    #[serde(default)]
    pub priority: Vec<String>,

    /// Display-name overrides keyed by merchant id
    #[serde(default)]
    pub name_overrides: HashMap<String, String>,
}

impl Default for DirectoryPolicy {
    fn default() -> Self {
        Self {
            excluded: vec!["cafee".to_string()],
            priority: ["cafe", "laundry", "ride", "spa", "meisan"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            name_overrides: HashMap::from([("ride".to_string(), "Ride (SG <> NS)".to_string())]),
        }
    }
}

impl DirectoryPolicy {
    /// Position in the priority list; unlisted ids rank after every listed one
    pub fn rank(&self, merchant_id: &str) -> usize {
        self.priority
            .iter()
            .position(|id| id == merchant_id)
            .unwrap_or(self.priority.len())
    }

    /// Filter, rename and sort merchant rows.
    ///
    /// Ordering is by priority rank, then by display name.
    pub fn apply(&self, merchants: Vec<Merchant>) -> Vec<Merchant> {
        let mut merchants: Vec<Merchant> = merchants
            .into_iter()
            .filter(|m| !self.excluded.contains(&m.id))
            .map(|mut m| {
                if let Some(name) = self.name_overrides.get(&m.id) {
                    m.name = name.clone();
                }
                m
            })
            .collect();

        merchants.sort_by(|a, b| {
            self.rank(&a.id)
                .cmp(&self.rank(&b.id))
                .then_with(|| a.name.cmp(&b.name))
        });
        merchants
    }
}

/// Per-merchant payment-intent configuration
///
/// Templates are rendered by the intent builder with the placeholders
/// `merchant_id`, `merchant_name`, `currency`, `order_id`, `local_amount`
/// and `usd_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub merchant_id: String,
    pub merchant_name: String,
    /// Provider application id
    pub app_id: String,
    /// Human-readable intent, e.g. "Pay for {merchant_name} - ${usd_amount}"
    pub intent_template: String,
    pub item_name: String,
    pub item_desc_template: String,
    /// Local currency display code
    pub currency_local: String,
    pub order_prefix: String,
    pub deeplink_template: String,
}

impl ServiceConfig {
    /// Derive the config for a merchant
    pub fn for_merchant(merchant: &Merchant) -> Self {
        Self {
            merchant_id: merchant.id.clone(),
            merchant_name: merchant.name.clone(),
            app_id: format!("nsrozoRewardsMP-{}", merchant.id),
            intent_template: "Pay for {merchant_name} - ${usd_amount}".to_string(),
            item_name: merchant.name.clone(),
            item_desc_template: "{currency} {local_amount} ({usd_amount} USD)".to_string(),
            currency_local: merchant.currency.clone(),
            order_prefix: merchant.id.to_uppercase(),
            deeplink_template: "https://ns.rozo.ai/ns/{merchant_id}?amount={local_amount}"
                .to_string(),
        }
    }

    /// Whether the merchant already prices in USD
    pub fn is_usd(&self) -> bool {
        self.currency_local == "USD"
    }
}
