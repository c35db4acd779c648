//! # pay-core
//!
//! Core types, traits and the payment-quote pipeline for ns-lightning.
//!
//! This crate provides:
//! - `MerchantDirectory` for ranked merchant listings and the `ServiceConfig` snapshot
//! - `RateConverter` for local-currency to USD conversion
//! - `IntentBuilder` for payment-intent request payloads
//! - `PaymentOrchestrator` for creating provider-side payment intents
//! - `SwapRequester` for hash-locked Lightning invoices
//! - Provider traits (`MerchantSource`, `RateSource`, `IntentProvider`, `SwapProvider`)
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{PaymentOrchestrator, SwapRequester};
//!
//! directory.load_service_config().await?;
//!
//! let payment = orchestrator.create_payment("cafe", dec!(50)).await?;
//! let swap = swaps
//!     .request_invoice(&payment.receiving_address, payment.usd_amount)
//!     .await?;
//!
//! // Show swap.invoice to the payer
//! ```

pub mod amount;
pub mod directory;
pub mod error;
pub mod intent;
pub mod merchant;
pub mod orchestrator;
pub mod provider;
pub mod rates;
pub mod swap;
pub mod template;

// Re-exports for convenience
pub use directory::{MerchantDirectory, ServiceConfigMap};
pub use error::{PaymentError, PaymentResult};
pub use intent::{
    DestinationConfig, IntentBuilder, OrderIds, PaymentApiResponse, PaymentIntentRequest,
    PaymentIntentResult,
};
pub use merchant::{DirectoryPolicy, Merchant, ServiceConfig};
pub use orchestrator::PaymentOrchestrator;
pub use provider::{
    BoxedIntentProvider, BoxedMerchantSource, BoxedRateSource, BoxedSwapProvider,
    IntentProvider, MerchantSource, RateSource, SwapProvider,
};
pub use rates::{iso_currency, RateConverter, RateQuote};
pub use swap::{
    LightningInvoiceResult, Preimage, SwapInvoice, SwapRequest, SwapRequester, SwapSecret,
    SwapTerms, DEFAULT_REFUND_PK, TARGET_TOKEN,
};
