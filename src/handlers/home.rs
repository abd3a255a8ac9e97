use axum::{extract::State, http::StatusCode, response::Html};
use tracing::error;

use crate::state::AppState;
use crate::views;

// GET / - Landing page
pub async fn index() -> Html<String> {
    views::home_page()
}

// GET /health - Liveness probe, also touches the catalog backend
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.catalog.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            error!(error = %e, backend = state.catalog.backend(), "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}
