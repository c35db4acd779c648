//! # Provider Configuration
//!
//! Endpoints and credentials for every external provider.
//! Secrets are loaded from environment variables.

use pay_core::{PaymentError, PaymentResult, DEFAULT_REFUND_PK};
use std::env;
use std::time::Duration;

pub const DEFAULT_MERCHANTS_API_URL: &str =
    "https://usgsoilitadwutfvxfzq.supabase.co/rest/v1/merchants?select=*";
pub const DEFAULT_RATES_API_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";
pub const DEFAULT_ROZO_API_URL: &str = "https://intentapiv2.rozo.ai/functions/v1/payment-api";
pub const DEFAULT_LENDASAT_API_URL: &str = "https://apilendaswap.lendasat.com/swap";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for all outbound providers
#[derive(Clone)]
pub struct ProvidersConfig {
    /// Merchant store REST endpoint
    pub merchants_api_url: String,

    /// Merchant store key, sent as `apikey` and as a bearer token
    pub merchants_api_key: String,

    /// Rate service endpoint (USD base)
    pub rates_api_url: String,

    /// Payment-intent provider endpoint
    pub rozo_api_url: String,

    /// Payment-intent provider bearer token
    pub rozo_api_token: String,

    /// Swap provider endpoint
    pub lendasat_api_url: String,

    /// Refund public key registered with the swap provider
    pub refund_pk: String,

    /// Optional swap referral code
    pub referral_code: Option<String>,

    /// Timeout applied to every outbound request
    pub timeout: Duration,
}

impl ProvidersConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `MERCHANTS_API_KEY`
    /// - `ROZO_API_TOKEN`
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let merchants_api_key = required("MERCHANTS_API_KEY")?;
        let rozo_api_token = required("ROZO_API_TOKEN")?;

        let timeout_secs = match optional("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                PaymentError::Configuration(format!("HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            merchants_api_url: optional("MERCHANTS_API_URL")
                .unwrap_or_else(|| DEFAULT_MERCHANTS_API_URL.to_string()),
            merchants_api_key,
            rates_api_url: optional("RATES_API_URL")
                .unwrap_or_else(|| DEFAULT_RATES_API_URL.to_string()),
            rozo_api_url: optional("ROZO_API_URL")
                .unwrap_or_else(|| DEFAULT_ROZO_API_URL.to_string()),
            rozo_api_token,
            lendasat_api_url: optional("LENDASAT_API_URL")
                .unwrap_or_else(|| DEFAULT_LENDASAT_API_URL.to_string()),
            refund_pk: optional("LENDASAT_REFUND_PK")
                .unwrap_or_else(|| DEFAULT_REFUND_PK.to_string()),
            referral_code: optional("LENDASAT_REFERRAL_CODE"),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create config with explicit credentials and default endpoints (for testing)
    pub fn new(merchants_api_key: impl Into<String>, rozo_api_token: impl Into<String>) -> Self {
        Self {
            merchants_api_url: DEFAULT_MERCHANTS_API_URL.to_string(),
            merchants_api_key: merchants_api_key.into(),
            rates_api_url: DEFAULT_RATES_API_URL.to_string(),
            rozo_api_url: DEFAULT_ROZO_API_URL.to_string(),
            rozo_api_token: rozo_api_token.into(),
            lendasat_api_url: DEFAULT_LENDASAT_API_URL.to_string(),
            refund_pk: DEFAULT_REFUND_PK.to_string(),
            referral_code: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builder: point every provider at one base URL (for mock servers)
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.merchants_api_url = format!("{}/rest/v1/merchants?select=*", base);
        self.rates_api_url = format!("{}/v4/latest/USD", base);
        self.rozo_api_url = format!("{}/functions/v1/payment-api", base);
        self.lendasat_api_url = format!("{}/swap", base);
        self
    }

    /// Builder: set referral code
    pub fn with_referral_code(mut self, code: impl Into<String>) -> Self {
        self.referral_code = Some(code.into());
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Merchant store authorization header value
    pub fn merchants_auth_header(&self) -> String {
        format!("Bearer {}", self.merchants_api_key)
    }

    /// Payment-intent provider authorization header value
    pub fn rozo_auth_header(&self) -> String {
        format!("Bearer {}", self.rozo_api_token)
    }
}

impl std::fmt::Debug for ProvidersConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvidersConfig")
            .field("merchants_api_url", &self.merchants_api_url)
            .field("rates_api_url", &self.rates_api_url)
            .field("rozo_api_url", &self.rozo_api_url)
            .field("lendasat_api_url", &self.lendasat_api_url)
            .field("referral_code", &self.referral_code.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn required(key: &str) -> PaymentResult<String> {
    optional(key).ok_or_else(|| PaymentError::Configuration(format!("{} not set", key)))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
