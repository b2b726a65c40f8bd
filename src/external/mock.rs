use crate::external::price_provider::{ExternalPricePoint, PriceProvider, PriceProviderError};
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Offline provider: a deterministic random walk per ticker, one bar per
/// calendar day. The same ticker and range always produce the same bars.
pub struct MockProvider {
    base_price: f64,
}

impl MockProvider {
    pub fn new() -> Self {
        Self { base_price: 100.0 }
    }

    fn seed_for(ticker: &str) -> u64 {
        ticker
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |hash, b| {
                (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
            })
    }
}

#[async_trait]
impl PriceProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_daily_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
        if start > end {
            return Ok(Vec::new());
        }

        let mut rng = StdRng::seed_from_u64(Self::seed_for(ticker));
        let mut close = self.base_price;

        let points = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| {
                let open = close;
                close *= 1.0 + (rng.random::<f64>() - 0.5) * 0.04;
                let spread = close * rng.random_range(0.0..0.01);

                ExternalPricePoint {
                    date,
                    open,
                    high: open.max(close) + spread,
                    low: (open.min(close) - spread).max(0.01),
                    close,
                    volume: rng.random_range(10_000..1_000_000),
                }
            })
            .collect();

        Ok(points)
    }
}
