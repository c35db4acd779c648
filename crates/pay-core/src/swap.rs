//! # Swap Requester
//!
//! Exchanges a stablecoin receiving address and USD amount for a Lightning
//! invoice. Each request is locked with a fresh SHA-256 hash lock; the
//! matching preimage is the only material that can claim the swapped funds.
//!
//! The preimage lives in memory only. `Preimage` redacts itself in `Debug`
//! and is not `Serialize`, so it cannot end up in logs or payloads by accident.

use crate::error::PaymentResult;
use crate::provider::BoxedSwapProvider;
use rand::{rngs::OsRng, RngCore};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{info, instrument};

/// Prefix on hex-encoded hash locks and preimages
pub const HEX_PREFIX: &str = "0x";

/// Token the swap provider pays out (USDC on Polygon)
pub const TARGET_TOKEN: &str = "usdc_pol";

/// Refund key registered with the swap provider
pub const DEFAULT_REFUND_PK: &str =
    "024b4b4b4f6e4e4593fd430ec04f23f6b56276f1a8e4280d5988b326374aee050a";

/// `0x`-prefixed hex preimage
#[derive(Clone, PartialEq, Eq)]
pub struct Preimage(String);

impl Preimage {
    /// The hex secret. Hand it to the payer; never log or store it.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Preimage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Preimage(<redacted>)")
    }
}

/// A 32-byte preimage and its SHA-256 hash lock
#[derive(Debug, Clone)]
pub struct SwapSecret {
    pub preimage: Preimage,
    pub hash_lock: String,
}

impl SwapSecret {
    /// Generate from the OS CSPRNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8; 32]) -> Self {
        let hash = Sha256::digest(bytes);
        Self {
            preimage: Preimage(format!("{}{}", HEX_PREFIX, hex::encode(bytes))),
            hash_lock: format!("{}{}", HEX_PREFIX, hex::encode(hash)),
        }
    }
}

/// Swap request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapRequest {
    pub polygon_address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub usd_amount: Decimal,
    pub target_token: String,
    pub hash_lock: String,
    pub refund_pk: String,
    pub referral_code: Option<String>,
}

/// Swap provider response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LightningInvoiceResult {
    pub ln_invoice: String,
    pub sats_required: u64,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fee_sats: Option<u64>,
    #[serde(default)]
    pub usd_per_sat: Option<f64>,
    #[serde(default)]
    pub usd_amount: Option<f64>,
    #[serde(default)]
    pub hash_lock: Option<String>,
    #[serde(default)]
    pub refund_locktime: Option<u64>,
    #[serde(default)]
    pub unilateral_claim_delay: Option<u64>,
    #[serde(default)]
    pub unilateral_refund_delay: Option<u64>,
    #[serde(default)]
    pub unilateral_refund_without_receiver_delay: Option<u64>,
    #[serde(default)]
    pub network: Option<String>,
}

/// Invoice plus the secret that claims the swap
#[derive(Debug, Clone)]
pub struct SwapInvoice {
    pub invoice: String,
    pub preimage: Preimage,
    pub sats_required: u64,
    pub details: LightningInvoiceResult,
}

/// Static parts of every swap request
#[derive(Debug, Clone, PartialEq)]
pub struct SwapTerms {
    pub target_token: String,
    pub refund_pk: String,
    pub referral_code: Option<String>,
}

impl Default for SwapTerms {
    fn default() -> Self {
        Self {
            target_token: TARGET_TOKEN.to_string(),
            refund_pk: DEFAULT_REFUND_PK.to_string(),
            referral_code: None,
        }
    }
}

#[derive(Clone)]
pub struct SwapRequester {
    provider: BoxedSwapProvider,
    terms: SwapTerms,
}

impl SwapRequester {
    pub fn new(provider: BoxedSwapProvider, terms: SwapTerms) -> Self {
        Self { provider, terms }
    }

    /// Request a Lightning invoice that pays `usd_amount` to `receiving_address`.
    #[instrument(skip(self), fields(provider = self.provider.provider_name()))]
    pub async fn request_invoice(
        &self,
        receiving_address: &str,
        usd_amount: Decimal,
    ) -> PaymentResult<SwapInvoice> {
        let secret = SwapSecret::generate();
        let request = SwapRequest {
            polygon_address: receiving_address.to_string(),
            usd_amount,
            target_token: self.terms.target_token.clone(),
            hash_lock: secret.hash_lock.clone(),
            refund_pk: self.terms.refund_pk.clone(),
            referral_code: self.terms.referral_code.clone(),
        };

        let details = self.provider.create_swap(&request).await?;

        info!(
            "Swap created: id={:?}, sats_required={}, hash_lock={}",
            details.id, details.sats_required, secret.hash_lock
        );

        Ok(SwapInvoice {
            invoice: details.ln_invoice.clone(),
            preimage: secret.preimage,
            sats_required: details.sats_required,
            details,
        })
    }
}
