pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::article::handlers;
use crate::state::AppState;

/// Builds the API router. Anything not matched by an API route is served
/// from the configured static directory.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/generate-article",
            post(handlers::handle_generate_article),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .fallback_service(static_files)
        .with_state(state)
}
