use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::header,
    response::IntoResponse,
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /files/*path
///
/// Serves a stored resume by its storage-relative path. Anything that does not
/// resolve to a regular file inside the storage root is reported as not found.
pub async fn handle_serve_file(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let not_found = || AppError::NotFound("File not found".to_string());

    let Path(relative) = path.map_err(|e| {
        warn!("Rejected undecodable file path: {e}");
        not_found()
    })?;

    let Some(absolute) = state.storage.resolve_existing(&relative).await else {
        if state.storage.resolve(&relative).is_none() {
            warn!("Rejected file request outside storage root: {relative}");
        }
        return Err(not_found());
    };

    let bytes = tokio::fs::read(&absolute).await.map_err(|_| not_found())?;
    let content_type = mime_guess::from_path(&absolute)
        .first_or_octet_stream()
        .to_string();

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}
