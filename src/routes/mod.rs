pub mod products;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::home;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health_check))
        .merge(products::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
