use std::cmp::Ordering;

use crate::models::{ClosePoint, ComparisonFrame, ComparisonRow, PriceSeries};

/// Inner-joins two series on date, keeping closing prices only.
///
/// An empty frame is a valid result when the series share no dates.
pub fn align_for_comparison(primary: &PriceSeries, secondary: &PriceSeries) -> ComparisonFrame {
    ComparisonFrame {
        primary: primary.ticker.clone(),
        secondary: secondary.ticker.clone(),
        rows: align_closes(&primary.close_points(), &secondary.close_points()),
    }
}

/// Merge-walk over two ascending close sequences.
pub fn align_closes(a: &[ClosePoint], b: &[ClosePoint]) -> Vec<ComparisonRow> {
    let mut rows = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].date.cmp(&b[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                rows.push(ComparisonRow {
                    date: a[i].date,
                    primary_close: a[i].close,
                    secondary_close: b[j].close,
                });
                i += 1;
                j += 1;
            }
        }
    }

    rows
}
