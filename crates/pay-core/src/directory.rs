//! # Merchant Directory
//!
//! Fetches and ranks merchants and owns the process-wide `ServiceConfig`
//! snapshot. The snapshot is an immutable map behind an `ArcSwap`: loading
//! builds a complete new map and publishes it with a single pointer swap, so
//! concurrent readers see either the old map or the new one.

use crate::error::{PaymentError, PaymentResult};
use crate::merchant::{DirectoryPolicy, Merchant, ServiceConfig};
use crate::provider::BoxedMerchantSource;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Immutable merchant id -> config mapping
pub type ServiceConfigMap = HashMap<String, Arc<ServiceConfig>>;

pub struct MerchantDirectory {
    source: BoxedMerchantSource,
    policy: DirectoryPolicy,
    configs: ArcSwap<ServiceConfigMap>,
}

impl MerchantDirectory {
    /// Create a directory with an empty config snapshot.
    ///
    /// `load_service_config` must run before payments are served.
    pub fn new(source: BoxedMerchantSource, policy: DirectoryPolicy) -> Self {
        Self {
            source,
            policy,
            configs: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Fetch merchants, drop excluded ids, apply name overrides and sort.
    #[instrument(skip(self))]
    pub async fn fetch_merchants(&self) -> PaymentResult<Vec<Merchant>> {
        let rows = self.source.fetch_merchants().await?;
        Ok(self.policy.apply(rows))
    }

    /// Rebuild the config snapshot from a fresh fetch and publish it.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn load_service_config(&self) -> PaymentResult<usize> {
        let merchants = self.fetch_merchants().await?;
        let configs: ServiceConfigMap = merchants
            .iter()
            .map(|m| (m.id.clone(), Arc::new(ServiceConfig::for_merchant(m))))
            .collect();
        let count = configs.len();
        self.configs.store(Arc::new(configs));
        info!("Loaded service config for {} merchants", count);
        Ok(count)
    }

    /// Typed lookup against the current snapshot
    pub fn service_config(&self, merchant_id: &str) -> PaymentResult<Arc<ServiceConfig>> {
        self.configs
            .load()
            .get(merchant_id)
            .cloned()
            .ok_or_else(|| PaymentError::UnknownMerchant {
                merchant_id: merchant_id.to_string(),
            })
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<ServiceConfigMap> {
        self.configs.load_full()
    }

    /// Merchant ids in the current snapshot
    pub fn merchant_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.configs.load().keys().cloned().collect();
        ids.sort();
        ids
    }
}
