use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: i64,
    pub student_id: i64,
    pub yes_answers_count: i64,
    pub total_possible_yes: i64,
    pub assessment_message: String,
    pub assessed_at: DateTime<Utc>,
}
