//! # Routes
//!
//! Axum router configuration for the invoice API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
///   - POST /create-invoice - Create a Lightning invoice for a merchant payment
///   - GET  /api/merchants  - Ranked merchant list
///   - GET  /health         - Health check
///   - GET  /               - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new().route("/merchants", get(handlers::list_merchants));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route("/create-invoice", post(handlers::create_invoice))
        .nest("/api", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{CreateInvoiceResponse, ErrorResponse};
    use crate::state::{AppConfig, Providers};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pay_core::{
        DirectoryPolicy, IntentProvider, LightningInvoiceResult, Merchant, MerchantSource,
        PaymentError, PaymentIntentRequest, PaymentIntentResult, PaymentResult, RateQuote,
        RateSource, SwapProvider, SwapRequest, SwapTerms,
    };
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct StaticMerchants;

    #[async_trait]
    impl MerchantSource for StaticMerchants {
        async fn fetch_merchants(&self) -> PaymentResult<Vec<Merchant>> {
            Ok(vec![
                Merchant::new("spa", "Spa", "RM"),
                Merchant::new("zzz", "zzz", "RM"),
                Merchant::new("cafee", "Old Cafe", "RM"),
                Merchant::new("cafe", "NS Cafe", "RM"),
                Merchant::new("aaa", "aaa", "USD"),
            ])
        }
    }

    struct StaticRates;

    #[async_trait]
    impl RateSource for StaticRates {
        async fn usd_rates(&self) -> PaymentResult<RateQuote> {
            Ok(RateQuote::new().with_rate("MYR", dec!(4.5)))
        }
    }

    #[derive(Default)]
    struct Intents {
        requests: Mutex<Vec<PaymentIntentRequest>>,
    }

    #[async_trait]
    impl IntentProvider for Intents {
        async fn create_intent(
            &self,
            request: &PaymentIntentRequest,
        ) -> PaymentResult<PaymentIntentResult> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(PaymentIntentResult {
                receiving_address: "0xreceiver".to_string(),
                usd_amount: request.destination.amount_units.parse().unwrap(),
                intent_id: Some("pay_1".to_string()),
            })
        }

        fn provider_name(&self) -> &'static str {
            "test-intents"
        }
    }

    struct Swaps {
        calls: AtomicUsize,
        status: Option<u16>,
    }

    #[async_trait]
    impl SwapProvider for Swaps {
        async fn create_swap(&self, request: &SwapRequest) -> PaymentResult<LightningInvoiceResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(status) = self.status {
                return Err(PaymentError::upstream("test-swaps", status, "swap rejected"));
            }
            let json = serde_json::json!({
                "ln_invoice": format!("lnbc1{}", request.polygon_address),
                "sats_required": 10500
            });
            Ok(serde_json::from_value(json).unwrap())
        }

        fn provider_name(&self) -> &'static str {
            "test-swaps"
        }
    }

    struct Harness {
        server: TestServer,
        intents: Arc<Intents>,
        swaps: Arc<Swaps>,
    }

    async fn harness(swap_status: Option<u16>) -> Harness {
        let intents = Arc::new(Intents::default());
        let swaps = Arc::new(Swaps {
            calls: AtomicUsize::new(0),
            status: swap_status,
        });
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            reload_interval: None,
        };
        let state = AppState::new(
            config,
            Providers {
                merchants: Arc::new(StaticMerchants),
                rates: Arc::new(StaticRates),
                intents: intents.clone(),
                swaps: swaps.clone(),
                swap_terms: SwapTerms::default(),
            },
            DirectoryPolicy::default(),
        );
        state.directory.load_service_config().await.unwrap();

        Harness {
            server: TestServer::new(create_router(state)).unwrap(),
            intents,
            swaps,
        }
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness(None).await;
        let response = h.server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_merchants_are_ranked() {
        let h = harness(None).await;
        let merchants: Vec<Merchant> = h.server.get("/api/merchants").await.json();
        let ids: Vec<_> = merchants.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["cafe", "spa", "aaa", "zzz"]);
    }

    #[tokio::test]
    async fn test_create_invoice() {
        let h = harness(None).await;
        let response = h
            .server
            .post("/create-invoice")
            .json(&serde_json::json!({"amount": 50.0, "service": "cafe"}))
            .await;

        response.assert_status_ok();
        let body: CreateInvoiceResponse = response.json();
        assert_eq!(body.invoice, "lnbc10xreceiver");
        assert_eq!(body.sats, 10500);
        assert!(!body.qr_code.is_empty());

        let requests = h.intents.requests.lock().unwrap();
        assert_eq!(requests[0].display.payment_value, "11.11");
        assert_eq!(requests[0].metadata.amount_local, "50");
    }

    #[tokio::test]
    async fn test_unknown_merchant_is_500_without_provider_calls() {
        let h = harness(None).await;
        let response = h
            .server
            .post("/create-invoice")
            .json(&serde_json::json!({"amount": 50, "service": "doesnotexist"}))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.detail, "Unknown merchant: doesnotexist");
        assert!(h.intents.requests.lock().unwrap().is_empty());
        assert_eq!(h.swaps.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_swap_failure_is_500_with_provider_message() {
        let h = harness(Some(503)).await;
        let response = h
            .server
            .post("/create-invoice")
            .json(&serde_json::json!({"amount": 20, "service": "aaa"}))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert!(body.detail.contains("swap rejected"));
        assert_eq!(h.intents.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let h = harness(None).await;
        let response = h
            .server
            .post("/create-invoice")
            .json(&serde_json::json!({"service": "cafe"}))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert!(!body.detail.is_empty());
    }
}
