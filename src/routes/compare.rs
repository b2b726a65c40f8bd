use axum::extract::{Query, State};
use axum::{Json, Router};
use axum::routing::get;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::ComparisonChart;
use crate::services::price_service::{self, DateRange};
use crate::services::{comparison_service, dashboard_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(compare_assets))
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    primary: String,
    secondary: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Closing prices of two assets on the dates they share.
///
/// # Example
/// ```text
/// GET /api/compare?primary=AAPL&secondary=BTC-USD&start=2024-01-01
/// ```
pub async fn compare_assets(
    Query(query): Query<CompareQuery>,
    State(state): State<AppState>,
) -> Result<Json<ComparisonChart>, AppError> {
    info!("GET /api/compare - {} vs {}", query.primary, query.secondary);
    let range = DateRange::resolve(query.start, query.end)?;

    let ((primary_asset, primary), (secondary_asset, secondary)) = tokio::try_join!(
        price_service::load_series(&state, &query.primary, range),
        price_service::load_series(&state, &query.secondary, range),
    )?;

    let frame = comparison_service::align_for_comparison(&primary, &secondary);
    if frame.is_empty() {
        info!("No overlapping dates for {} and {}", primary.ticker, secondary.ticker);
    } else {
        info!("✓ {} and {} share {} dates", primary.ticker, secondary.ticker, frame.len());
    }

    Ok(Json(dashboard_service::comparison_chart(
        (primary_asset, primary.as_ref()),
        (secondary_asset, secondary.as_ref()),
        frame,
    )))
}
