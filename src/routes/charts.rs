use axum::extract::{Path, Query, State};
use axum::{Json, Router};
use axum::routing::get;
use tracing::info;

use crate::errors::AppError;
use crate::models::{CandlestickChart, PriceChart, RsiChart};
use crate::routes::RangeQuery;
use crate::services::{dashboard_service, price_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:ticker/price", get(get_price_chart))
        .route("/:ticker/candlestick", get(get_candlestick_chart))
        .route("/:ticker/rsi", get(get_rsi_chart))
}

/// Closing price with 7/30-day moving averages and daily returns.
pub async fn get_price_chart(
    Path(ticker): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<PriceChart>, AppError> {
    info!("GET /api/charts/{}/price", ticker);
    let range = query.resolve()?;
    let (asset, series) = price_service::load_series(&state, &ticker, range).await?;
    Ok(Json(dashboard_service::price_chart(asset, &series)))
}

pub async fn get_candlestick_chart(
    Path(ticker): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<CandlestickChart>, AppError> {
    info!("GET /api/charts/{}/candlestick", ticker);
    let range = query.resolve()?;
    let (asset, series) = price_service::load_series(&state, &ticker, range).await?;
    Ok(Json(dashboard_service::candlestick_chart(asset, &series)))
}

pub async fn get_rsi_chart(
    Path(ticker): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<Json<RsiChart>, AppError> {
    info!("GET /api/charts/{}/rsi", ticker);
    let range = query.resolve()?;
    let (asset, series) = price_service::load_series(&state, &ticker, range).await?;
    Ok(Json(dashboard_service::rsi_chart(asset, &series)))
}
