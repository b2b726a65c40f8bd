use axum::extract::Query;
use axum::{Json, Router};
use axum::routing::get;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{catalog, AssetClass, AssetEntry};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assets))
}

#[derive(Debug, Deserialize)]
pub struct AssetQuery {
    /// us_equity, nigerian_equity or crypto
    class: Option<String>,
}

pub async fn list_assets(
    Query(query): Query<AssetQuery>,
) -> Result<Json<Vec<AssetEntry>>, AppError> {
    info!("GET /api/assets - Listing catalog (class={:?})", query.class);

    let entries = match query.class.as_deref() {
        None => catalog().entries().to_vec(),
        Some(raw) => {
            let class = AssetClass::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown asset class {}", raw)))?;
            catalog().by_class(class).into_iter().cloned().collect()
        }
    };

    Ok(Json(entries))
}
