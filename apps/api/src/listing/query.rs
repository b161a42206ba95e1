use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::candidate::CandidateWithAssessmentRow;

/// A candidate as shown to recruiters, with its latest assessment flattened in.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub resume_path: Option<String>,
    pub student_created_at: DateTime<Utc>,
    /// Id of the latest assessment; breaks ties between equal timestamps.
    pub assessment_id: Option<i64>,
    pub yes_answers_count: Option<i64>,
    pub total_possible_yes: Option<i64>,
    pub assessment_message: Option<String>,
    pub assessment_assessed_at: Option<DateTime<Utc>>,
    /// Gateway URL for the resume, `None` when no path is recorded.
    pub resume_url: Option<String>,
}

impl From<CandidateWithAssessmentRow> for CandidateView {
    fn from(row: CandidateWithAssessmentRow) -> Self {
        let resume_path = row.resume_path.filter(|p| !p.is_empty());
        CandidateView {
            resume_url: resume_path.as_deref().map(resume_url),
            student_id: row.student_id,
            first_name: row.first_name,
            last_name: row.last_name,
            resume_path,
            student_created_at: row.student_created_at,
            assessment_id: row.assessment_id,
            yes_answers_count: row.yes_answers_count,
            total_possible_yes: row.total_possible_yes,
            assessment_message: row.assessment_message,
            assessment_assessed_at: row.assessment_assessed_at,
        }
    }
}

pub fn resume_url(resume_path: &str) -> String {
    format!("/files/{resume_path}")
}

/// Every candidate, newest first, each paired with its most recent assessment.
/// Ties on either timestamp fall back to the higher id.
pub async fn list_candidates(pool: &SqlitePool) -> Result<Vec<CandidateView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CandidateWithAssessmentRow>(
        r#"
        SELECT
            s.id          AS student_id,
            s.first_name,
            s.last_name,
            s.resume_path,
            s.created_at  AS student_created_at,
            a.id          AS assessment_id,
            a.yes_answers_count,
            a.total_possible_yes,
            a.assessment_message,
            a.assessed_at AS assessment_assessed_at
        FROM students s
        LEFT JOIN (
            SELECT
                *,
                ROW_NUMBER() OVER (
                    PARTITION BY student_id
                    ORDER BY assessed_at DESC, id DESC
                ) AS rn
            FROM assessments
        ) a ON s.id = a.student_id AND a.rn = 1
        ORDER BY s.created_at DESC, s.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CandidateView::from).collect())
}
