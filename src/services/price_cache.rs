use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use dashmap::DashMap;

use crate::models::PriceSeries;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    ticker: String,
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone)]
struct CachedSeries {
    series: Arc<PriceSeries>,
    stored_at: Instant,
}

/// In-memory cache of fetched series keyed on ticker and date range.
#[derive(Clone)]
pub struct PriceCache {
    entries: Arc<DashMap<CacheKey, CachedSeries>>,
    ttl: Duration,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Option<Arc<PriceSeries>> {
        let key = CacheKey { ticker: ticker.to_string(), start, end };

        if let Some(entry) = self.entries.get(&key) {
            if entry.stored_at.elapsed() < self.ttl {
                return Some(entry.series.clone());
            }
        }
        self.evict_expired(&key);
        None
    }

    /// Re-checks the age under the shard lock so a series inserted by a
    /// concurrent request is not thrown away.
    fn evict_expired(&self, key: &CacheKey) {
        let ttl = self.ttl;
        self.entries.remove_if(key, |_, cached| cached.stored_at.elapsed() >= ttl);
    }

    pub fn insert(&self, start: NaiveDate, end: NaiveDate, series: Arc<PriceSeries>) {
        let key = CacheKey { ticker: series.ticker.clone(), start, end };
        self.entries.insert(key, CachedSeries { series, stored_at: Instant::now() });
    }

    pub fn cleanup_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, cached| cached.stored_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
