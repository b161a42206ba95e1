use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub resume_path: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the listing join: a candidate and its latest assessment, if any.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateWithAssessmentRow {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub resume_path: Option<String>,
    pub student_created_at: DateTime<Utc>,
    pub assessment_id: Option<i64>,
    pub yes_answers_count: Option<i64>,
    pub total_possible_yes: Option<i64>,
    pub assessment_message: Option<String>,
    pub assessment_assessed_at: Option<DateTime<Utc>>,
}
