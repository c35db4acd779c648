//! # Payment Error Types
//!
//! Typed error handling for the payment-quote pipeline.
//! All pipeline operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, malformed templates)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Merchant id not present in the loaded service config
    #[error("Unknown merchant: {merchant_id}")]
    UnknownMerchant { merchant_id: String },

    /// Currency code absent from the rate quote
    #[error("No exchange rate for currency: {currency}")]
    RateLookup { currency: String },

    /// Non-success status from an external provider
    #[error("Provider error [{provider}]: HTTP {status}: {message}")]
    Upstream {
        provider: String,
        status: u16,
        message: String,
    },

    /// Success status, but the body is missing or has invalid fields
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse { provider: String, message: String },

    /// Network/HTTP transport error (connect failure, timeout)
    #[error("Network error [{provider}]: {message}")]
    Network { provider: String, message: String },

    /// QR or payload encoding failure
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl PaymentError {
    pub fn upstream(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        PaymentError::Upstream {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn malformed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::MalformedResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn network(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Network {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Name of the external provider that triggered this error, if any
    pub fn provider(&self) -> Option<&str> {
        match self {
            PaymentError::Upstream { provider, .. }
            | PaymentError::MalformedResponse { provider, .. }
            | PaymentError::Network { provider, .. } => Some(provider),
            _ => None,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
