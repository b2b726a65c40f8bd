mod asset;
mod chart;
mod comparison;
mod indicator;
mod price_point;

pub use asset::{catalog, AssetClass, AssetEntry};
pub use chart::{CandlestickChart, ChartMeta, ComparisonChart, PriceChart, RsiChart};
pub use comparison::{ComparisonFrame, ComparisonRow};
pub use indicator::IndicatorSeries;
pub use price_point::{ClosePoint, PricePoint, PriceSeries};
