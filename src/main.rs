mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::{AppConfig, ProviderKind};
use crate::external::mock::MockProvider;
use crate::external::price_provider::PriceProvider;
use crate::external::yahoofinance::YahooFinanceProvider;
use crate::logging::init_logging;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;

    // Logging comes up before anything else logs
    init_logging(&config)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let provider: Arc<dyn PriceProvider> = match config.provider {
        ProviderKind::Yahoo => {
            tracing::info!("📊 Using price provider: Yahoo Finance");
            Arc::new(YahooFinanceProvider::new())
        },
        ProviderKind::Mock => {
            tracing::info!("📊 Using price provider: deterministic mock data");
            Arc::new(MockProvider::new())
        },
    };

    tracing::info!("📚 Asset catalog loaded with {} entries", models::catalog().len());

    let addr = config.bind_address();
    let state = AppState::new(config, provider);

    // Expired cache entries are only evicted on lookup otherwise
    let price_cache = state.price_cache.clone();
    let failure_cache = state.failure_cache.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(600));
        loop {
            interval.tick().await;
            price_cache.cleanup_expired();
            failure_cache.cleanup_expired();
            tracing::debug!(
                "Price cache holds {} series, {} active fetch failures",
                price_cache.len(),
                failure_cache.len()
            );
        }
    });

    let app = app::create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Asset visualizer backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
