use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{assets, charts, compare, export, health, prices};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/assets", assets::router())
        .nest("/api/prices", prices::router())
        .nest("/api/charts", charts::router())
        .nest("/api/compare", compare::router())
        .nest("/api/export", export::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
