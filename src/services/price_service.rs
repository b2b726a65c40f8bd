use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::external::price_provider::{ExternalPricePoint, PriceProviderError};
use crate::models::{catalog, AssetEntry, PricePoint, PriceSeries};
use crate::services::failure_cache::FailureType;
use crate::state::AppState;

/// Inclusive date range for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn default_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Fills in the dashboard defaults (2024-01-01 through today) and rejects
    /// inverted ranges.
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, AppError> {
        let start = start.unwrap_or_else(Self::default_start);
        let end = end.unwrap_or_else(|| Utc::now().date_naive());

        if start > end {
            return Err(AppError::Validation(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        Ok(Self { start, end })
    }
}

pub fn resolve_asset(ticker: &str) -> Result<&'static AssetEntry, AppError> {
    catalog()
        .get(ticker)
        .or_else(|| catalog().by_display_name(ticker))
        .ok_or_else(|| AppError::NotFound(format!("Unknown asset {}", ticker)))
}

/// Sorts ascending, keeps the last bar for a repeated date and drops bars
/// with non-finite or non-positive prices.
pub fn normalize(ticker: &str, mut points: Vec<ExternalPricePoint>) -> PriceSeries {
    points.sort_by_key(|p| p.date);

    let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
    for p in points {
        let valid = [p.open, p.high, p.low, p.close]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !valid {
            continue;
        }

        let point = PricePoint {
            date: p.date,
            open: p.open,
            high: p.high,
            low: p.low,
            close: p.close,
            volume: p.volume,
        };

        match out.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => out.push(point),
        }
    }

    PriceSeries::new(ticker, out)
}

/// Failure-cache key for a fetch error. `NotFound` only says the provider had
/// nothing for this window, so it blocks the same range; rate limits and API
/// errors block the whole ticker.
fn failure_key(ticker: &str, range: DateRange, failure_type: FailureType) -> String {
    match failure_type {
        FailureType::NotFound => format!("{}:{}:{}", ticker, range.start, range.end),
        FailureType::RateLimited | FailureType::ApiError => ticker.to_string(),
    }
}

/// Resolves a catalog ticker and returns its series for `range`, going to the
/// provider only on a cache miss.
pub async fn load_series(
    state: &AppState,
    ticker: &str,
    range: DateRange,
) -> Result<(&'static AssetEntry, Arc<PriceSeries>), AppError> {
    let asset = resolve_asset(ticker)?;
    let ticker = asset.ticker.as_str();

    let range_key = failure_key(ticker, range, FailureType::NotFound);
    let active_failure = state
        .failure_cache
        .is_failed(ticker)
        .or_else(|| state.failure_cache.is_failed(&range_key));

    if let Some(failure) = active_failure {
        info!("⚠️ Skipping fetch for {} - ticker is in failure cache ({}). Will retry after {}",
              ticker, failure.error_type, failure.retry_after());
        return Err(AppError::External(format!(
            "Ticker {} is in failure cache ({}). Will retry after {}",
            ticker, failure.error_type, failure.retry_after()
        )));
    }

    if let Some(series) = state.price_cache.get(ticker, range.start, range.end) {
        info!("✓ Cache hit for {} ({} to {})", ticker, range.start, range.end);
        return Ok((asset, series));
    }

    let fetch = state
        .price_provider
        .fetch_daily_history(ticker, range.start, range.end);

    let result = match timeout(state.config.fetch_timeout, fetch).await {
        Ok(result) => result,
        Err(_) => Err(PriceProviderError::Network(format!(
            "fetch timed out after {}s",
            state.config.fetch_timeout.as_secs()
        ))),
    };

    match result {
        Ok(points) => {
            let series = Arc::new(normalize(ticker, points));
            state.failure_cache.clear(ticker);
            state.failure_cache.clear(&range_key);
            state.price_cache.insert(range.start, range.end, series.clone());
            info!("✓ Fetched {} bars for {} from {}", series.len(), ticker, state.price_provider.name());
            Ok((asset, series))
        },
        Err(e) => {
            let failure_type = FailureType::from(&e);
            state
                .failure_cache
                .record_failure(&failure_key(ticker, range, failure_type), failure_type);

            match failure_type {
                FailureType::RateLimited => warn!("Rate limited when fetching prices for {}", ticker),
                _ => error!("✗ Failed to fetch price data for {}: {}", ticker, e),
            }
            Err(AppError::from(e))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::external::mock::MockProvider;
    use crate::external::price_provider::PriceProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> ExternalPricePoint {
        ExternalPricePoint {
            date: date(1, d),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1,
        }
    }

    struct CountingProvider {
        calls: AtomicUsize,
        fail_with_not_found: bool,
    }

    #[async_trait]
    impl PriceProvider for CountingProvider {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch_daily_history(
            &self,
            ticker: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_with_not_found {
                return Err(PriceProviderError::NotFound(ticker.to_string()));
            }
            MockProvider::new().fetch_daily_history(ticker, start, end).await
        }
    }

    /// No sessions for single-day ranges; mock bars otherwise.
    struct WeekendProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceProvider for WeekendProvider {
        fn name(&self) -> &'static str {
            "weekend"
        }

        async fn fetch_daily_history(
            &self,
            ticker: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if start == end {
                return Err(PriceProviderError::NotFound(ticker.to_string()));
            }
            MockProvider::new().fetch_daily_history(ticker, start, end).await
        }
    }

    struct NoSessionsProvider;

    #[async_trait]
    impl PriceProvider for NoSessionsProvider {
        fn name(&self) -> &'static str {
            "no-sessions"
        }

        async fn fetch_daily_history(
            &self,
            _ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
            Ok(Vec::new())
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl PriceProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn fetch_daily_history(
            &self,
            _ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    fn state_with(provider: Arc<dyn PriceProvider>) -> AppState {
        AppState::new(AppConfig::default(), provider)
    }

    #[test]
    fn test_normalize_sorts_dedupes_and_filters() {
        let points = vec![
            bar(3, 12.0),
            bar(1, 10.0),
            bar(2, 0.0),
            bar(3, 13.0),
            bar(4, f64::NAN),
            bar(5, 15.0),
        ];
        let series = normalize("AAPL", points);

        let dates: Vec<NaiveDate> = series.dates();
        assert_eq!(dates, vec![date(1, 1), date(1, 3), date(1, 5)]);
        assert_eq!(series.closes(), vec![10.0, 13.0, 15.0]);
    }

    #[test]
    fn test_date_range_defaults_and_validation() {
        let r = DateRange::resolve(None, Some(date(6, 1))).unwrap();
        assert_eq!(r.start, date(1, 1));
        assert_eq!(r.end, date(6, 1));

        assert!(matches!(
            DateRange::resolve(Some(date(6, 2)), Some(date(6, 1))),
            Err(AppError::Validation(_))
        ));

        let same_day = DateRange::resolve(Some(date(6, 1)), Some(date(6, 1))).unwrap();
        assert_eq!(same_day.start, same_day.end);
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_not_found() {
        let state = state_with(Arc::new(MockProvider::new()));
        let range = DateRange::resolve(Some(date(1, 1)), Some(date(1, 10))).unwrap();
        let err = load_series(&state, "ZZZZ", range).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_resolve_asset_by_display_name() {
        assert_eq!(resolve_asset("Bitcoin (BTC-USD)").unwrap().ticker, "BTC-USD");
        assert_eq!(resolve_asset("uba.lg").unwrap().ticker, "UBA.LG");
    }

    #[tokio::test]
    async fn test_second_load_hits_cache() {
        let provider = Arc::new(CountingProvider { calls: AtomicUsize::new(0), fail_with_not_found: false });
        let state = state_with(provider.clone());
        let range = DateRange::resolve(Some(date(1, 1)), Some(date(1, 10))).unwrap();

        let (asset, first) = load_series(&state, "aapl", range).await.unwrap();
        let (_, second) = load_series(&state, "AAPL", range).await.unwrap();

        assert_eq!(asset.ticker, "AAPL");
        assert_eq!(first.ticker, "AAPL");
        assert_eq!(first.len(), 10);
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_cached() {
        let provider = Arc::new(CountingProvider { calls: AtomicUsize::new(0), fail_with_not_found: true });
        let state = state_with(provider.clone());
        let range = DateRange::resolve(Some(date(1, 1)), Some(date(1, 10))).unwrap();

        let first = load_series(&state, "NESTLE.LG", range).await.unwrap_err();
        assert!(matches!(first, AppError::NotFound(_)));

        let second = load_series(&state, "NESTLE.LG", range).await.unwrap_err();
        assert!(matches!(second, AppError::External(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_range_does_not_block_other_ranges() {
        let provider = Arc::new(WeekendProvider { calls: AtomicUsize::new(0) });
        let state = state_with(provider.clone());
        let saturday = DateRange::resolve(Some(date(1, 6)), Some(date(1, 6))).unwrap();
        let quarter = DateRange::resolve(Some(date(1, 1)), Some(date(3, 1))).unwrap();

        let err = load_series(&state, "AAPL", saturday).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(state.failure_cache.is_failed("AAPL").is_none());

        let (_, series) = load_series(&state, "AAPL", quarter).await.unwrap();
        assert_eq!(series.len(), 61);

        // The empty window itself is still remembered
        let again = load_series(&state, "AAPL", saturday).await.unwrap_err();
        assert!(matches!(again, AppError::External(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_range_without_sessions_is_an_empty_series() {
        let state = state_with(Arc::new(NoSessionsProvider));
        let saturday = DateRange::resolve(Some(date(1, 6)), Some(date(1, 6))).unwrap();

        let (asset, series) = load_series(&state, "MSFT", saturday).await.unwrap();
        assert_eq!(asset.ticker, "MSFT");
        assert!(series.is_empty());
        assert!(state.failure_cache.is_failed("MSFT").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_timeout() {
        let state = state_with(Arc::new(SlowProvider));
        let range = DateRange::resolve(Some(date(1, 1)), Some(date(1, 10))).unwrap();

        let err = load_series(&state, "TSLA", range).await.unwrap_err();
        assert!(matches!(err, AppError::External(msg) if msg.contains("timed out")));
        assert!(state.failure_cache.is_failed("TSLA").is_some());
    }
}
