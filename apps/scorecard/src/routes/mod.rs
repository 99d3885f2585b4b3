pub mod analysis;
pub mod health;
pub mod results;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Submission
        .route("/api/v1/analyze", post(analysis::handle_analyze_text))
        .route(
            "/api/v1/analyze/file",
            post(analysis::handle_analyze_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Stored result
        .route(
            "/api/v1/results",
            get(results::handle_get_results).delete(results::handle_clear_results),
        )
        .route("/api/v1/results/ring.svg", get(results::handle_ring_svg))
        .route("/api/v1/results/report", get(results::handle_report))
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
