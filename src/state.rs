use std::sync::Arc;
use crate::config::AppConfig;
use crate::external::price_provider::PriceProvider;
use crate::services::failure_cache::FailureCache;
use crate::services::price_cache::PriceCache;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub price_provider: Arc<dyn PriceProvider>,
    pub price_cache: PriceCache,
    pub failure_cache: FailureCache,
}

impl AppState {
    pub fn new(config: AppConfig, price_provider: Arc<dyn PriceProvider>) -> Self {
        Self {
            price_cache: PriceCache::new(config.price_cache_ttl),
            failure_cache: FailureCache::new(),
            config: Arc::new(config),
            price_provider,
        }
    }
}
