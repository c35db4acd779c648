//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the merchant directory, payment orchestrator and swap requester.

use pay_core::{
    BoxedIntentProvider, BoxedMerchantSource, BoxedRateSource, BoxedSwapProvider,
    DirectoryPolicy, IntentBuilder, MerchantDirectory, PaymentOrchestrator, RateConverter,
    SwapRequester, SwapTerms,
};
use pay_providers::{
    swap_terms, ExchangeRateApi, LendasatSwapProvider, ProvidersConfig, RozoIntentProvider,
    SupabaseMerchantSource,
};
use std::sync::Arc;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Service-config reload interval; `None` loads once at startup
    pub reload_interval: Option<Duration>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            reload_interval: std::env::var("CONFIG_RELOAD_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Provider handles used to assemble the pipeline
pub struct Providers {
    pub merchants: BoxedMerchantSource,
    pub rates: BoxedRateSource,
    pub intents: BoxedIntentProvider,
    pub swaps: BoxedSwapProvider,
    pub swap_terms: SwapTerms,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Merchant listing and service-config snapshot
    pub directory: Arc<MerchantDirectory>,
    /// Payment-intent pipeline
    pub orchestrator: Arc<PaymentOrchestrator>,
    /// Lightning swap requests
    pub swaps: Arc<SwapRequester>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state backed by the HTTP providers.
    ///
    /// The service config is empty until `directory.load_service_config()` runs.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let providers_config = ProvidersConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load provider config: {}", e))?;

        let providers = Providers {
            merchants: Arc::new(SupabaseMerchantSource::new(&providers_config)?),
            rates: Arc::new(ExchangeRateApi::new(&providers_config)?),
            intents: Arc::new(RozoIntentProvider::new(&providers_config)?),
            swaps: Arc::new(LendasatSwapProvider::new(&providers_config)?),
            swap_terms: swap_terms(&providers_config),
        };

        let policy = load_directory_policy()?;
        Ok(Self::new(config, providers, policy))
    }

    /// Assemble state from explicit providers
    pub fn new(config: AppConfig, providers: Providers, policy: DirectoryPolicy) -> Self {
        let directory = Arc::new(MerchantDirectory::new(providers.merchants, policy));
        let orchestrator = PaymentOrchestrator::new(
            directory.clone(),
            RateConverter::new(providers.rates),
            IntentBuilder::default(),
            providers.intents,
        );
        let swaps = SwapRequester::new(providers.swaps, providers.swap_terms);

        Self {
            directory,
            orchestrator: Arc::new(orchestrator),
            swaps: Arc::new(swaps),
            config,
        }
    }
}

/// Load directory policy overrides from config file
fn load_directory_policy() -> anyhow::Result<DirectoryPolicy> {
    let config_paths = [
        "config/directory.toml",
        "../config/directory.toml",
        "../../config/directory.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let policy: DirectoryPolicy = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!(
                "Loaded directory policy from {} ({} priority ids)",
                path,
                policy.priority.len()
            );
            return Ok(policy);
        }
    }

    tracing::info!("No directory policy file found, using defaults");
    Ok(DirectoryPolicy::default())
}
