pub(crate) mod assets;
pub(crate) mod charts;
pub(crate) mod compare;
pub(crate) mod export;
pub(crate) mod health;
pub(crate) mod prices;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::price_service::DateRange;

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`, both optional.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl RangeQuery {
    pub fn resolve(&self) -> Result<DateRange, AppError> {
        DateRange::resolve(self.start, self.end)
    }
}
