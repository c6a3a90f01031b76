pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(handlers::handle_home))
        .route("/health", get(health::health_handler))
        // Analysis
        .route("/upload", post(handlers::handle_upload))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        // Stored analyses
        .route("/api/v1/analyses", get(handlers::handle_list_analyses))
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        .layer(body_limit)
        .with_state(state)
}
