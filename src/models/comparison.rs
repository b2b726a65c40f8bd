use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use super::ClosePoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub primary_close: f64,
    pub secondary_close: f64,
}

// Two assets reduced to the dates they share, closing price only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonFrame {
    pub primary: String,
    pub secondary: String,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub fn primary_closes(&self) -> Vec<ClosePoint> {
        self.rows
            .iter()
            .map(|r| ClosePoint { date: r.date, close: r.primary_close })
            .collect()
    }

    /// Same rows with the two sides exchanged.
    #[cfg(test)]
    pub fn swapped(&self) -> Self {
        Self {
            primary: self.secondary.clone(),
            secondary: self.primary.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| ComparisonRow {
                    date: r.date,
                    primary_close: r.secondary_close,
                    secondary_close: r.primary_close,
                })
                .collect(),
        }
    }
}
