use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// One daily OHLCV observation for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Closing-price projection of a [`PricePoint`], used when two assets are
/// compared on shared dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl From<&PricePoint> for ClosePoint {
    fn from(point: &PricePoint) -> Self {
        Self {
            date: point.date,
            close: point.close,
        }
    }
}

/// Ordered price history for one asset.
///
/// Points are ascending by date with no duplicate dates. The price service
/// enforces this when it normalizes provider output, so everything downstream
/// treats it as a precondition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn close_points(&self) -> Vec<ClosePoint> {
        self.points.iter().map(ClosePoint::from).collect()
    }
}
