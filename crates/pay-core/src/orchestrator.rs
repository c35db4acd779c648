//! # Payment Orchestrator
//!
//! `create_payment`: look up the merchant's config, convert to USD, build the
//! intent and post it to the payment-intent provider.
//!
//! Every call creates a new provider-side intent. If a later stage (the swap
//! request) fails, the intent is left in place; nothing is rolled back.

use crate::amount::ensure_positive;
use crate::directory::MerchantDirectory;
use crate::error::PaymentResult;
use crate::intent::{IntentBuilder, PaymentIntentRequest, PaymentIntentResult};
use crate::provider::BoxedIntentProvider;
use crate::rates::RateConverter;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct PaymentOrchestrator {
    directory: Arc<MerchantDirectory>,
    converter: RateConverter,
    builder: IntentBuilder,
    intents: BoxedIntentProvider,
}

impl PaymentOrchestrator {
    pub fn new(
        directory: Arc<MerchantDirectory>,
        converter: RateConverter,
        builder: IntentBuilder,
        intents: BoxedIntentProvider,
    ) -> Self {
        Self {
            directory,
            converter,
            builder,
            intents,
        }
    }

    /// Convert and build the intent without posting it
    pub async fn prepare(
        &self,
        merchant_id: &str,
        local_amount: Decimal,
    ) -> PaymentResult<PaymentIntentRequest> {
        let local_amount = ensure_positive(local_amount)?;
        let config = self.directory.service_config(merchant_id)?;

        let usd_amount = if config.is_usd() {
            local_amount
        } else {
            self.converter
                .to_usd(local_amount, &config.currency_local)
                .await?
        };

        debug!(
            "Building intent: merchant={}, local={} {}, usd={}",
            merchant_id, local_amount, config.currency_local, usd_amount
        );

        self.builder.build(&config, local_amount, usd_amount)
    }

    /// Create a provider-side payment intent for `merchant_id`.
    ///
    /// Not safe to retry blindly: each call creates a new intent.
    #[instrument(skip(self), fields(provider = self.intents.provider_name()))]
    pub async fn create_payment(
        &self,
        merchant_id: &str,
        local_amount: Decimal,
    ) -> PaymentResult<PaymentIntentResult> {
        let request = self.prepare(merchant_id, local_amount).await?;
        let result = self.intents.create_intent(&request).await?;

        info!(
            "Payment intent created: order={}, receiving_address={}, usd={}",
            request.metadata.merchant_order_id, result.receiving_address, result.usd_amount
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;
    use crate::merchant::{DirectoryPolicy, Merchant};
    use crate::provider::{IntentProvider, MerchantSource, RateSource};
    use crate::rates::RateQuote;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StaticMerchants(Vec<Merchant>);

    #[async_trait]
    impl MerchantSource for StaticMerchants {
        async fn fetch_merchants(&self) -> PaymentResult<Vec<Merchant>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct CountingRates {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RateSource for CountingRates {
        async fn usd_rates(&self) -> PaymentResult<RateQuote> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RateQuote::new().with_rate("MYR", dec!(4.5)))
        }
    }

    #[derive(Default)]
    struct RecordingIntents {
        requests: Mutex<Vec<PaymentIntentRequest>>,
        status: Option<u16>,
    }

    #[async_trait]
    impl IntentProvider for RecordingIntents {
        async fn create_intent(
            &self,
            request: &PaymentIntentRequest,
        ) -> PaymentResult<PaymentIntentResult> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(status) = self.status {
                return Err(PaymentError::upstream("rozo", status, "boom"));
            }
            Ok(PaymentIntentResult {
                receiving_address: "0xrecv".to_string(),
                usd_amount: request.destination.amount_units.parse().unwrap(),
                intent_id: None,
            })
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }

    struct Fixture {
        orchestrator: PaymentOrchestrator,
        rates: Arc<CountingRates>,
        intents: Arc<RecordingIntents>,
    }

    async fn fixture(intents: RecordingIntents) -> Fixture {
        let directory = Arc::new(MerchantDirectory::new(
            Arc::new(StaticMerchants(vec![
                Merchant::new("cafe", "NS Cafe", "MYR"),
                Merchant::new("shop", "US Shop", "USD"),
            ])),
            DirectoryPolicy::default(),
        ));
        directory.load_service_config().await.unwrap();

        let rates = Arc::new(CountingRates::default());
        let intents = Arc::new(intents);
        let orchestrator = PaymentOrchestrator::new(
            directory,
            RateConverter::new(rates.clone()),
            IntentBuilder::default(),
            intents.clone(),
        );
        Fixture {
            orchestrator,
            rates,
            intents,
        }
    }

    #[tokio::test]
    async fn test_create_payment_converts_and_builds() {
        let f = fixture(RecordingIntents::default()).await;
        let result = f.orchestrator.create_payment("cafe", dec!(50.0)).await.unwrap();

        assert_eq!(result.receiving_address, "0xrecv");
        assert_eq!(result.usd_amount, dec!(11.11));

        let requests = f.intents.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].display.payment_value, "11.11");
        assert_eq!(requests[0].metadata.amount_local, "50");
        assert_eq!(requests[0].metadata.currency_local, "MYR");
        assert!(requests[0].metadata.merchant_order_id.starts_with("CAFE-"));
    }

    #[tokio::test]
    async fn test_usd_merchant_skips_rate_lookup() {
        let f = fixture(RecordingIntents::default()).await;
        let result = f.orchestrator.create_payment("shop", dec!(20)).await.unwrap();

        assert_eq!(result.usd_amount, dec!(20));
        assert_eq!(f.rates.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_merchant_issues_no_calls() {
        let f = fixture(RecordingIntents::default()).await;
        let err = f
            .orchestrator
            .create_payment("doesnotexist", dec!(50))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::UnknownMerchant { merchant_id } if merchant_id == "doesnotexist"
        ));
        assert!(f.intents.requests.lock().unwrap().is_empty());
        assert_eq!(f.rates.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let f = fixture(RecordingIntents::default()).await;
        assert!(matches!(
            f.orchestrator.create_payment("cafe", dec!(0)).await,
            Err(PaymentError::InvalidRequest(_))
        ));
        assert!(f.intents.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let f = fixture(RecordingIntents {
            status: Some(500),
            ..Default::default()
        })
        .await;
        let err = f.orchestrator.create_payment("cafe", dec!(50)).await.unwrap_err();
        assert!(matches!(err, PaymentError::Upstream { status: 500, .. }));
    }
}
