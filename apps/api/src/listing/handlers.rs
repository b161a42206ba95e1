use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::listing::query::{list_candidates, CandidateView};
use crate::state::AppState;

/// GET /api/students_with_assessments
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateView>>, AppError> {
    let views = list_candidates(&state.db).await?;
    Ok(Json(views))
}
