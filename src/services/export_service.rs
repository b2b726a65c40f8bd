use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::PriceSeries;
use crate::services::dashboard_service::IndicatorReport;

#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: u64,
    #[serde(rename = "MA7")]
    ma7: Option<f64>,
    #[serde(rename = "MA30")]
    ma30: Option<f64>,
    #[serde(rename = "Daily Return")]
    daily_return: Option<f64>,
    #[serde(rename = "RSI")]
    rsi: Option<f64>,
}

pub fn export_filename(ticker: &str) -> String {
    format!("{}_data.csv", ticker)
}

/// Encodes the series and its indicators as UTF-8 CSV, one row per date.
/// Missing indicator values are written as empty fields.
pub fn export_csv(series: &PriceSeries, report: &IndicatorReport) -> Result<Vec<u8>, AppError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());

    for (i, point) in series.points.iter().enumerate() {
        writer
            .serialize(CsvRow {
                date: point.date,
                open: point.open,
                high: point.high,
                low: point.low,
                close: point.close,
                volume: point.volume,
                ma7: report.ma7.get(i),
                ma30: report.ma30.get(i),
                daily_return: report.daily_return.get(i),
                rsi: report.rsi.get(i),
            })
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    // serialize() only emits the header with the first row
    if series.is_empty() {
        writer
            .write_record(["Date", "Open", "High", "Low", "Close", "Volume", "MA7", "MA30", "Daily Return", "RSI"])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use chrono::Duration;

    const HEADER: &str = "Date,Open,High,Low,Close,Volume,MA7,MA30,Daily Return,RSI";

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 500,
            })
            .collect();
        PriceSeries::new("AAPL", points)
    }

    #[test]
    fn test_header_and_rows() {
        let s = series(&[10.0, 11.0, 12.0]);
        let report = IndicatorReport::build(&s);
        let bytes = export_csv(&s, &report).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "2024-03-01,10.0,10.0,10.0,10.0,500,,,,");
        assert_eq!(lines[2], "2024-03-02,11.0,11.0,11.0,11.0,500,,,10.0,");
    }

    #[test]
    fn test_missing_values_are_empty_not_zero() {
        let closes: Vec<f64> = (0..8).map(|i| 10.0 + i as f64).collect();
        let s = series(&closes);
        let report = IndicatorReport::build(&s);
        let text = String::from_utf8(export_csv(&s, &report).unwrap()).unwrap();

        let row = text.lines().nth(7).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[6], "13.0");
        assert_eq!(fields[7], "");
        assert_eq!(fields[9], "");
    }

    #[test]
    fn test_empty_series_still_has_header() {
        let s = series(&[]);
        let report = IndicatorReport::build(&s);
        let text = String::from_utf8(export_csv(&s, &report).unwrap()).unwrap();
        assert_eq!(text.trim_end(), HEADER);
    }

    #[test]
    fn test_filename() {
        assert_eq!(export_filename("BTC-USD"), "BTC-USD_data.csv");
    }
}
