use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ComparisonRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartMeta {
    pub ticker: String,
    pub display_name: String,
    pub currency_symbol: String,
    pub points: usize,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

// Closing price with both moving averages, plus the daily return panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceChart {
    pub meta: ChartMeta,
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
    pub ma7: Vec<Option<f64>>,
    pub ma30: Vec<Option<f64>>,
    pub daily_return: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandlestickChart {
    pub meta: ChartMeta,
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiChart {
    pub meta: ChartMeta,
    pub period: usize,
    pub overbought: f64,
    pub oversold: f64,
    pub dates: Vec<NaiveDate>,
    pub rsi: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonChart {
    pub primary: ChartMeta,
    pub secondary: ChartMeta,
    pub rows: Vec<ComparisonRow>,
    /// Set when the two assets share no dates in the requested range.
    pub message: Option<String>,
}
