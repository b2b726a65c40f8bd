use std::sync::Arc;
use chrono::{DateTime, Utc, Duration};
use dashmap::DashMap;

use crate::external::price_provider::PriceProviderError;

/// Information about a failed fetch for a ticker
#[derive(Debug, Clone)]
pub struct FailureInfo {
    pub failed_at: DateTime<Utc>,
    pub error_type: FailureType,
    pub ttl_hours: i64,
}

impl FailureInfo {
    pub fn retry_after(&self) -> DateTime<Utc> {
        self.failed_at + Duration::hours(self.ttl_hours)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureType {
    NotFound,       // Ticker has no data at the provider
    RateLimited,    // Temporary rate limit
    ApiError,       // Network, parse, timeout
}

impl FailureType {
    pub fn ttl_hours(&self) -> i64 {
        match self {
            FailureType::NotFound => 24,
            FailureType::RateLimited => 1,
            FailureType::ApiError => 6,
        }
    }
}

impl From<&PriceProviderError> for FailureType {
    fn from(e: &PriceProviderError) -> Self {
        match e {
            PriceProviderError::RateLimited => FailureType::RateLimited,
            PriceProviderError::NotFound(_) => FailureType::NotFound,
            _ => FailureType::ApiError,
        }
    }
}

impl std::fmt::Display for FailureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FailureType::NotFound => "not_found",
            FailureType::RateLimited => "rate_limited",
            FailureType::ApiError => "api_error",
        };
        f.write_str(label)
    }
}

/// Thread-safe cache of tickers whose last fetch failed, so the provider is
/// not hammered for symbols that will keep failing.
#[derive(Clone, Default)]
pub struct FailureCache {
    cache: Arc<DashMap<String, FailureInfo>>,
}

impl FailureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active failure for a ticker, if its TTL has not expired yet
    pub fn is_failed(&self, ticker: &str) -> Option<FailureInfo> {
        self.is_failed_at(ticker, Utc::now())
    }

    fn is_failed_at(&self, ticker: &str, now: DateTime<Utc>) -> Option<FailureInfo> {
        if let Some(entry) = self.cache.get(ticker) {
            let info = entry.value().clone();
            if now < info.retry_after() {
                return Some(info);
            }
        }
        self.evict_expired_at(ticker, now);
        None
    }

    /// Removes the entry only if it is still expired under the shard lock; a
    /// failure recorded in between stays.
    fn evict_expired_at(&self, ticker: &str, now: DateTime<Utc>) {
        self.cache.remove_if(ticker, |_, info| now >= info.retry_after());
    }

    pub fn record_failure(&self, ticker: &str, error_type: FailureType) {
        self.record_failure_at(ticker, error_type, Utc::now());
    }

    fn record_failure_at(&self, ticker: &str, error_type: FailureType, failed_at: DateTime<Utc>) {
        let info = FailureInfo {
            failed_at,
            error_type,
            ttl_hours: error_type.ttl_hours(),
        };

        self.cache.insert(ticker.to_string(), info);
    }

    /// Clear a ticker from the failure cache (e.g., after successful fetch)
    pub fn clear(&self, ticker: &str) {
        self.cache.remove(ticker);
    }

    pub fn cleanup_expired(&self) {
        let now = Utc::now();
        self.cache.retain(|_, info| now < info.retry_after());
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }
}
