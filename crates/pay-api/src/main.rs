//! # NS Lightning
//!
//! Pay merchants in local currency with a Lightning invoice.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export MERCHANTS_API_KEY=...
//! export ROZO_API_TOKEN=...
//! export LENDASAT_REFERRAL_CODE=...   # optional
//!
//! # Run the server
//! ns-lightning
//! ```

use pay_api::{routes, state::AppState};
use pay_core::MerchantDirectory;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::from_env()?;

    // Payments cannot be served before the first load
    let merchants = state.directory.load_service_config().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Merchants loaded: {}", merchants);

    if let Some(interval) = state.config.reload_interval {
        info!("Reloading service config every {:?}", interval);
        spawn_reload(state.directory.clone(), interval);
    }

    let app = routes::create_router(state);

    info!("⚡ NS Lightning starting on http://{}", addr);

    if !is_prod {
        info!("Merchants: GET http://{}/api/merchants", addr);
        info!("Invoice: POST http://{}/create-invoice", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn spawn_reload(directory: Arc<MerchantDirectory>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // first tick fires immediately; startup already loaded
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = directory.load_service_config().await {
                warn!("Service config reload failed, keeping previous snapshot: {}", e);
            }
        }
    });
}

fn print_banner() {
    println!(
        r#"
  ⚡ NS Lightning Payments ⚡
  ━━━━━━━━━━━━━━━━━━━━━━━━━━
  Local currency in, Lightning out
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
