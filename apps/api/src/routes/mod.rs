pub mod files;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assessments::handlers as assessments;
use crate::candidates::handlers as candidates;
use crate::listing::handlers as listing;
use crate::state::AppState;

/// Headroom above the file size limit for the other form fields and multipart framing.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/students", post(candidates::handle_register_candidate))
        .route("/api/assessments", post(assessments::handle_create_assessment))
        .route(
            "/api/students_with_assessments",
            get(listing::handle_list_candidates),
        )
        .route("/files/*path", get(files::handle_serve_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
