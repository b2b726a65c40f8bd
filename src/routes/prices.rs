use axum::extract::{Path, Query, State};
use axum::{Json, Router};
use axum::routing::get;
use tracing::info;

use crate::errors::AppError;
use crate::models::PriceSeries;
use crate::routes::RangeQuery;
use crate::services::price_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:ticker", get(get_prices))
}

pub async fn get_prices(
    Path(ticker): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<PriceSeries>, AppError> {
    info!("GET /api/prices/{} - Getting price history", ticker);
    let range = query.resolve()?;
    let (_, series) = price_service::load_series(&state, &ticker, range).await?;
    Ok(Json(series.as_ref().clone()))
}
