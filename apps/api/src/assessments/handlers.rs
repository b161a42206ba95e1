use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::assessments::categorize::{categorize, AssessmentInput};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub student_id: Option<i64>,
    pub yes_answers_count: Option<i64>,
    pub total_possible_yes: Option<i64>,
    pub assessment_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub success: bool,
    pub message: String,
    pub assessment_id: i64,
}

impl AssessmentRequest {
    fn into_input(self) -> Result<AssessmentInput, AppError> {
        let missing = || AppError::Validation("Missing required assessment data".to_string());

        let student_id = self.student_id.filter(|id| *id > 0).ok_or_else(missing)?;
        let yes_answers_count = self.yes_answers_count.ok_or_else(missing)?;
        let total_possible_yes = self.total_possible_yes.ok_or_else(missing)?;
        let message = self
            .assessment_message
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(missing)?;

        // The score is signed: disqualifying answers subtract from it.
        if total_possible_yes < 0 {
            return Err(AppError::Validation(
                "Total possible answers must be non-negative".to_string(),
            ));
        }

        Ok(AssessmentInput {
            student_id,
            yes_answers_count,
            total_possible_yes,
            message,
        })
    }
}

/// POST /api/assessments
///
/// Records the screening result and files the candidate's resume into the
/// qualified or unqualified bucket. A missing resume file is reported in the
/// message; the assessment is still created.
pub async fn handle_create_assessment(
    State(state): State<AppState>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AssessmentResponse>), AppError> {
    let Json(request) = payload.map_err(|_| {
        AppError::Validation("Missing required assessment data".to_string())
    })?;
    let input = request.into_input()?;

    let outcome = categorize(
        &state.db,
        &state.storage,
        state.qualification_rule(),
        &input,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AssessmentResponse {
            success: true,
            message: outcome.message(),
            assessment_id: outcome.assessment.id,
        }),
    ))
}
