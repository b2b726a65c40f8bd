use crate::external::price_provider::{ExternalPricePoint, PriceProvider, PriceProviderError};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::Deserialize;

/// Yahoo Finance provider. No API key required.
///
/// Covers every asset in the catalog: US tickers as-is, Nigerian Exchange
/// listings with the `.LG` suffix and crypto pairs such as `BTC-USD`.
pub struct YahooFinanceProvider {
    client: reqwest::Client,
}

impl YahooFinanceProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (compatible; AssetVisualizer/0.1)")
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

fn parse_chart(ticker: &str, body: YahooChartResponse) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
    if let Some(error) = body.chart.error {
        if error.description.contains("No data found") {
            return Err(PriceProviderError::NotFound(ticker.to_string()));
        }
        return Err(PriceProviderError::BadResponse(error.description));
    }

    let result = body.chart.result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or_else(|| PriceProviderError::BadResponse("No chart result in response".into()))?;

    // A range without sessions (weekend, holiday) comes back with no timestamps
    let timestamps = &result.timestamp;
    if timestamps.is_empty() {
        return Ok(Vec::new());
    }

    let quote = result.indicators.quote
        .first()
        .ok_or_else(|| PriceProviderError::BadResponse("No quote data in response".into()))?;

    if [&quote.open, &quote.high, &quote.low, &quote.close]
        .iter()
        .any(|column| column.len() != timestamps.len())
    {
        return Err(PriceProviderError::Parse(
            "Timestamp and price arrays have different lengths".into()
        ));
    }

    let points: Vec<ExternalPricePoint> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            // Null rows are market holidays or halted sessions
            let open = quote.open[i]?;
            let high = quote.high[i]?;
            let low = quote.low[i]?;
            let close = quote.close[i]?;
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0.0);

            let date = chrono::DateTime::from_timestamp(*ts, 0)
                .map(|dt| dt.date_naive())?;

            Some(ExternalPricePoint {
                date,
                open,
                high,
                low,
                close,
                volume: volume.max(0.0) as u64,
            })
        })
        .collect();

    Ok(points)
}

#[async_trait]
impl PriceProvider for YahooFinanceProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch_daily_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
        let url = format!("https://query1.finance.yahoo.com/v8/finance/chart/{}", ticker);

        // period2 is exclusive
        let period1 = unix_midnight(start).to_string();
        let period2 = unix_midnight(end + Duration::days(1)).to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("interval", "1d"),
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("events", "history"),
            ])
            .send()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PriceProviderError::NotFound(ticker.to_string()));
        }
        if !status.is_success() {
            return Err(PriceProviderError::BadResponse(format!("HTTP {}", status)));
        }

        let body: YahooChartResponse = resp
            .json()
            .await
            .map_err(|e| PriceProviderError::Parse(e.to_string()))?;

        parse_chart(ticker, body)
    }
}
