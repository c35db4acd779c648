//! # Provider Traits
//!
//! Seams for every external service the pipeline talks to.
//! HTTP implementations live in `pay-providers`; tests use in-memory ones.
//!
//! ```text
//! ┌──────────────────┐  ┌──────────────┐  ┌────────────────┐  ┌──────────────┐
//! │  MerchantSource  │  │  RateSource  │  │ IntentProvider │  │ SwapProvider │
//! │ fetch_merchants  │  │  usd_rates   │  │ create_intent  │  │ create_swap  │
//! └────────┬─────────┘  └──────┬───────┘  └───────┬────────┘  └──────┬───────┘
//!          │                   │                  │                  │
//!  MerchantDirectory     RateConverter    PaymentOrchestrator   SwapRequester
//! ```

use crate::error::PaymentResult;
use crate::intent::{PaymentIntentRequest, PaymentIntentResult};
use crate::merchant::Merchant;
use crate::rates::RateQuote;
use crate::swap::{LightningInvoiceResult, SwapRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Merchant directory store
#[async_trait]
pub trait MerchantSource: Send + Sync {
    /// Fetch raw merchant rows, unfiltered and unsorted.
    async fn fetch_merchants(&self) -> PaymentResult<Vec<Merchant>>;
}

/// Exchange-rate service quoting against USD
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the current quote (1 USD = `rate` units of each currency).
    async fn usd_rates(&self) -> PaymentResult<RateQuote>;
}

/// Payment-intent provider
///
/// Each call creates a new provider-side payment intent; it is not idempotent.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    async fn create_intent(&self, request: &PaymentIntentRequest) -> PaymentResult<PaymentIntentResult>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Stablecoin-to-Lightning swap provider
#[async_trait]
pub trait SwapProvider: Send + Sync {
    async fn create_swap(&self, request: &SwapRequest) -> PaymentResult<LightningInvoiceResult>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

pub type BoxedMerchantSource = Arc<dyn MerchantSource>;
pub type BoxedRateSource = Arc<dyn RateSource>;
pub type BoxedIntentProvider = Arc<dyn IntentProvider>;
pub type BoxedSwapProvider = Arc<dyn SwapProvider>;
