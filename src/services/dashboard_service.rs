use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    AssetEntry, CandlestickChart, ChartMeta, ComparisonChart, ComparisonFrame, IndicatorSeries,
    PriceChart, PriceSeries, RsiChart,
};
use crate::services::indicators;

pub const SHORT_MA_WINDOW: usize = 7;
pub const LONG_MA_WINDOW: usize = 30;
pub const RSI_PERIOD: usize = 14;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

pub const NO_OVERLAP_MESSAGE: &str = "no overlapping data";

/// Every indicator the dashboard shows for one asset, computed once.
#[derive(Debug, Clone)]
pub struct IndicatorReport {
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
    pub ma7: IndicatorSeries,
    pub ma30: IndicatorSeries,
    pub daily_return: IndicatorSeries,
    pub rsi: IndicatorSeries,
}

impl IndicatorReport {
    pub fn build(series: &PriceSeries) -> Self {
        let close = series.closes();

        let report = Self {
            dates: series.dates(),
            ma7: IndicatorSeries::new("MA7", indicators::sma(&close, SHORT_MA_WINDOW)),
            ma30: IndicatorSeries::new("MA30", indicators::sma(&close, LONG_MA_WINDOW)),
            daily_return: IndicatorSeries::new("Daily Return", indicators::daily_return(&close)),
            rsi: IndicatorSeries::new("RSI", indicators::rsi(&close, RSI_PERIOD)),
            close,
        };

        debug!(
            "Indicators for {} over {} bars: MA30 defined on {}, RSI on {}",
            series.ticker,
            report.rsi.len(),
            report.ma30.defined_count(),
            report.rsi.defined_count()
        );
        report
    }
}

pub fn chart_meta(asset: &AssetEntry, series: &PriceSeries) -> ChartMeta {
    ChartMeta {
        ticker: asset.ticker.clone(),
        display_name: asset.display_name.clone(),
        currency_symbol: asset.currency_symbol().to_string(),
        points: series.len(),
        start: series.points.first().map(|p| p.date),
        end: series.points.last().map(|p| p.date),
    }
}

pub fn price_chart(asset: &AssetEntry, series: &PriceSeries) -> PriceChart {
    let report = IndicatorReport::build(series);

    PriceChart {
        meta: chart_meta(asset, series),
        dates: report.dates,
        close: report.close,
        ma7: report.ma7.values,
        ma30: report.ma30.values,
        daily_return: report.daily_return.values,
    }
}

pub fn candlestick_chart(asset: &AssetEntry, series: &PriceSeries) -> CandlestickChart {
    let points = &series.points;

    CandlestickChart {
        meta: chart_meta(asset, series),
        dates: series.dates(),
        open: points.iter().map(|p| p.open).collect(),
        high: points.iter().map(|p| p.high).collect(),
        low: points.iter().map(|p| p.low).collect(),
        close: series.closes(),
    }
}

pub fn rsi_chart(asset: &AssetEntry, series: &PriceSeries) -> RsiChart {
    let close = series.closes();

    RsiChart {
        meta: chart_meta(asset, series),
        period: RSI_PERIOD,
        overbought: RSI_OVERBOUGHT,
        oversold: RSI_OVERSOLD,
        dates: series.dates(),
        rsi: indicators::rsi(&close, RSI_PERIOD),
    }
}

pub fn comparison_chart(
    primary: (&AssetEntry, &PriceSeries),
    secondary: (&AssetEntry, &PriceSeries),
    frame: ComparisonFrame,
) -> ComparisonChart {
    let message = frame.is_empty().then(|| NO_OVERLAP_MESSAGE.to_string());

    ComparisonChart {
        primary: chart_meta(primary.0, primary.1),
        secondary: chart_meta(secondary.0, secondary.1),
        rows: frame.rows,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{catalog, PricePoint};
    use crate::services::comparison_service::align_for_comparison;
    use chrono::Duration;

    fn series(ticker: &str, start: NaiveDate, closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + Duration::days(i as i64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10,
            })
            .collect();
        PriceSeries::new(ticker, points)
    }

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_report_is_aligned_to_dates() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let s = series("AAPL", jan(1), &closes);
        let report = IndicatorReport::build(&s);

        assert_eq!(report.dates.len(), 40);
        assert_eq!(report.ma7.len(), 40);
        assert_eq!(report.ma30.len(), 40);
        assert_eq!(report.daily_return.len(), 40);
        assert_eq!(report.rsi.len(), 40);

        assert_eq!(report.ma7.defined_count(), 34);
        assert_eq!(report.ma30.defined_count(), 11);
        assert_eq!(report.daily_return.defined_count(), 39);
        assert_eq!(report.rsi.defined_count(), 27);
    }

    #[test]
    fn test_price_chart_uses_catalog_currency() {
        let asset = catalog().get("MTNN.LG").unwrap();
        let s = series("MTNN.LG", jan(1), &[200.0, 201.0, 202.0]);
        let chart = price_chart(asset, &s);

        assert_eq!(chart.meta.currency_symbol, "₦");
        assert_eq!(chart.meta.points, 3);
        assert_eq!(chart.meta.start, Some(jan(1)));
        assert_eq!(chart.meta.end, Some(jan(3)));
        assert_eq!(chart.ma7, vec![None, None, None]);
    }

    #[test]
    fn test_candlestick_chart_carries_ohlc() {
        let asset = catalog().get("TSLA").unwrap();
        let s = series("TSLA", jan(1), &[10.0, 12.0]);
        let chart = candlestick_chart(asset, &s);

        assert_eq!(chart.open, vec![9.5, 11.5]);
        assert_eq!(chart.high, vec![11.0, 13.0]);
        assert_eq!(chart.low, vec![9.0, 11.0]);
        assert_eq!(chart.close, vec![10.0, 12.0]);
    }

    #[test]
    fn test_rsi_chart_guide_levels() {
        let asset = catalog().get("AAPL").unwrap();
        let s = series("AAPL", jan(1), &[1.0; 20]);
        let chart = rsi_chart(asset, &s);
        assert_eq!(chart.overbought, 70.0);
        assert_eq!(chart.oversold, 30.0);
        assert_eq!(chart.rsi.len(), 20);
    }

    #[test]
    fn test_comparison_chart_reports_no_overlap() {
        let a_entry = catalog().get("AAPL").unwrap();
        let b_entry = catalog().get("KO").unwrap();
        let a = series("AAPL", jan(1), &[1.0, 2.0]);
        let b = series("KO", jan(10), &[1.0, 2.0]);

        let chart = comparison_chart((a_entry, &a), (b_entry, &b), align_for_comparison(&a, &b));
        assert!(chart.rows.is_empty());
        assert_eq!(chart.message.as_deref(), Some(NO_OVERLAP_MESSAGE));

        let c = series("KO", jan(2), &[5.0]);
        let chart = comparison_chart((a_entry, &a), (b_entry, &c), align_for_comparison(&a, &c));
        assert_eq!(chart.rows.len(), 1);
        assert!(chart.message.is_none());
    }
}
