//! # pay-providers
//!
//! HTTP implementations of the `pay-core` provider traits:
//!
//! | Client | Trait | Service |
//! |--------|-------|---------|
//! | `SupabaseMerchantSource` | `MerchantSource` | Merchant directory store |
//! | `ExchangeRateApi` | `RateSource` | USD-base exchange rates |
//! | `RozoIntentProvider` | `IntentProvider` | Payment-intent provider |
//! | `LendasatSwapProvider` | `SwapProvider` | Stablecoin-to-Lightning swaps |
//!
//! Every client uses a `reqwest::Client` with the configured timeout and
//! never retries.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_providers::{ProvidersConfig, RozoIntentProvider};
//!
//! let config = ProvidersConfig::from_env()?;
//! let intents = RozoIntentProvider::new(&config)?;
//! ```

pub mod config;
mod http;
pub mod lendasat;
pub mod merchants;
pub mod rates;
pub mod rozo;

// Re-exports
pub use config::ProvidersConfig;
pub use lendasat::{swap_terms, LendasatSwapProvider};
pub use merchants::SupabaseMerchantSource;
pub use rates::ExchangeRateApi;
pub use rozo::RozoIntentProvider;
