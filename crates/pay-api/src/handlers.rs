//! # Request Handlers
//!
//! Axum request handlers for the invoice API.
//! Every pipeline failure is reported as HTTP 500 with `{"detail": "..."}`.

use crate::qr::qr_png_base64;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::{Merchant, PaymentError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create invoice request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateInvoiceRequest {
    /// Amount in the merchant's local currency
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Merchant id
    pub service: String,
}

/// Create invoice response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateInvoiceResponse {
    /// BOLT11 payment request
    pub invoice: String,
    /// Base64 PNG QR code of the invoice
    pub qr_code: String,
    /// Satoshis the payer must send
    pub sats: u64,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    if let Some(provider) = err.provider() {
        warn!(provider, "Upstream provider failure");
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(err.to_string())),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "ns-lightning",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List merchants, ranked for display
pub async fn list_merchants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Merchant>>, ApiError> {
    let merchants = state.directory.fetch_merchants().await.map_err(|e| {
        error!("Failed to fetch merchants: {}", e);
        payment_error_to_response(e)
    })?;
    Ok(Json(merchants))
}

/// Create a payment intent, swap it for a Lightning invoice and render its QR code
#[instrument(skip(state, payload))]
pub async fn create_invoice(
    State(state): State<AppState>,
    payload: Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> Result<Json<CreateInvoiceResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(rejection.body_text())),
        )
    })?;

    info!(
        "Creating invoice: service={}, amount={}",
        request.service, request.amount
    );

    let payment = state
        .orchestrator
        .create_payment(&request.service, request.amount)
        .await
        .map_err(|e| {
            error!("Failed to create payment: {}", e);
            payment_error_to_response(e)
        })?;

    // The provider-side intent already exists; a failure below leaves it orphaned.
    let swap = state
        .swaps
        .request_invoice(&payment.receiving_address, payment.usd_amount)
        .await
        .map_err(|e| {
            error!(
                "Failed to create swap for {}: {}",
                payment.receiving_address, e
            );
            payment_error_to_response(e)
        })?;

    let qr_code = qr_png_base64(&swap.invoice).map_err(payment_error_to_response)?;

    info!("Invoice created: sats={}", swap.sats_required);

    Ok(Json(CreateInvoiceResponse {
        invoice: swap.invoice,
        qr_code,
        sats: swap.sats_required,
    }))
}
