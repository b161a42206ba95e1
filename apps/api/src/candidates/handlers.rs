use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::candidates::registry::register_candidate;
use crate::candidates::validation::{validate_submission, CandidateSubmission, UploadedResume};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCandidateResponse {
    pub success: bool,
    pub message: String,
    pub student_id: i64,
    /// URL under the file gateway, e.g. `/files/temp_resumes/<name>.pdf`.
    pub resume_path: String,
}

/// POST /api/students
///
/// Multipart form with `firstName`, `lastName` and the `resume` file part.
pub async fn handle_register_candidate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<RegisterCandidateResponse>), AppError> {
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let submission = read_submission(multipart).await?;
    let valid = validate_submission(submission, state.config.max_upload_bytes)?;

    let registered = register_candidate(&state.db, &state.storage, valid).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterCandidateResponse {
            success: true,
            message: "Student added successfully to temp folder".to_string(),
            student_id: registered.id,
            resume_path: format!("/files/{}", registered.resume_path),
        }),
    ))
}

async fn read_submission(mut multipart: Multipart) -> Result<CandidateSubmission, AppError> {
    let mut submission = CandidateSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "firstName" => submission.first_name = Some(read_text(field).await?),
            "lastName" => submission.last_name = Some(read_text(field).await?),
            // Only a part carrying a filename counts as the uploaded file.
            "resume" if field.file_name().is_some() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let contents = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume: {}", e.body_text()))
                })?;
                submission.resume = Some(UploadedResume {
                    file_name,
                    contents,
                });
            }
            _ => drain(field).await?,
        }
    }

    Ok(submission)
}

async fn drain(field: axum::extract::multipart::Field<'_>) -> Result<(), AppError> {
    field.bytes().await.map_err(|e| {
        AppError::Validation(format!("Invalid multipart payload: {}", e.body_text()))
    })?;
    Ok(())
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {}", e.body_text())))
}
