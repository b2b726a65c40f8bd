use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use axum::Router;
use axum::routing::get;
use tracing::{error, info};

use crate::errors::AppError;
use crate::routes::RangeQuery;
use crate::services::dashboard_service::IndicatorReport;
use crate::services::{export_service, price_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:ticker", get(download_csv))
}

/// Price history plus indicators as a `{ticker}_data.csv` attachment.
pub async fn download_csv(
    Path(ticker): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    info!("GET /api/export/{} - Exporting CSV", ticker);
    let range = query.resolve()?;
    let (asset, series) = price_service::load_series(&state, &ticker, range).await?;

    let report = IndicatorReport::build(&series);
    let body = export_service::export_csv(&series, &report).map_err(|e| {
        error!("Failed to export CSV for {}: {}", asset.ticker, e);
        e
    })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_service::export_filename(&asset.ticker)
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Export(e.to_string()))?,
    );

    Ok((headers, body))
}
