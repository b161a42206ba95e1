//! Resume Categorization Engine.
//!
//! Sequencing for one screening submission:
//! 1. Commit the assessment row on its own. From here on it always survives.
//! 2. Re-read the candidate's current `resume_path`.
//! 3. Pick the destination bucket with the active [`QualificationRule`].
//! 4. Inside a transaction: update `resume_path`, then move the file, then commit.
//!    A failed move rolls the update back; a failed commit moves the file back.
//!
//! Only resumes still in the temp bucket are relocated. A resume that was already
//! categorized (or vanished) is reported in-band as "not found", not as an error.
//! A crash between the move and the commit can still leave the file in its new
//! bucket with the old path recorded; there is no recovery journal.

use std::io;

use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::assessments::policy::QualificationRule;
use crate::candidates::registry::find_candidate;
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::storage::{Bucket, ResumeStorage};

/// A validated screening submission.
#[derive(Debug, Clone)]
pub struct AssessmentInput {
    pub student_id: i64,
    pub yes_answers_count: i64,
    pub total_possible_yes: i64,
    pub message: String,
}

/// What happened to the resume file after the assessment was recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Relocation {
    Moved { bucket: Bucket, resume_path: String },
    ResumeNotFound,
    NoResumePath,
}

#[derive(Debug, Clone)]
pub struct CategorizationOutcome {
    pub assessment: AssessmentRow,
    pub relocation: Relocation,
}

impl CategorizationOutcome {
    pub fn message(&self) -> String {
        match &self.relocation {
            Relocation::Moved { bucket, .. } => format!(
                "Assessment recorded and resume moved to {}.",
                bucket.dir_name()
            ),
            Relocation::ResumeNotFound => {
                "Assessment recorded, but resume file not found for moving.".to_string()
            }
            Relocation::NoResumePath => {
                "Assessment recorded, but no resume path found for student.".to_string()
            }
        }
    }
}

pub async fn categorize(
    pool: &SqlitePool,
    storage: &ResumeStorage,
    rule: QualificationRule,
    input: &AssessmentInput,
) -> Result<CategorizationOutcome, AppError> {
    let student_id = input.student_id;

    if find_candidate(pool, student_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Student {student_id} not found")));
    }

    let assessment = record_assessment(pool, input).await?;
    info!(
        "Recorded assessment {} for student {student_id} ({}/{})",
        assessment.id, assessment.yes_answers_count, assessment.total_possible_yes
    );

    let current: Option<String> =
        sqlx::query_scalar("SELECT resume_path FROM students WHERE id = ?")
            .bind(student_id)
            .fetch_optional(pool)
            .await?;
    let Some(current) = current.filter(|p| !p.trim().is_empty()) else {
        warn!("No resume path found for student {student_id}");
        return Ok(CategorizationOutcome {
            assessment,
            relocation: Relocation::NoResumePath,
        });
    };

    let bucket = rule.destination(input.yes_answers_count, input.total_possible_yes);
    let relocation = relocate(pool, storage, student_id, &current, bucket).await?;

    Ok(CategorizationOutcome {
        assessment,
        relocation,
    })
}

async fn record_assessment(
    pool: &SqlitePool,
    input: &AssessmentInput,
) -> Result<AssessmentRow, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments
            (student_id, yes_answers_count, total_possible_yes, assessment_message)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(input.student_id)
    .bind(input.yes_answers_count)
    .bind(input.total_possible_yes)
    .bind(&input.message)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(row)
}

async fn relocate(
    pool: &SqlitePool,
    storage: &ResumeStorage,
    student_id: i64,
    current: &str,
    bucket: Bucket,
) -> Result<Relocation, AppError> {
    if Bucket::of(current) != Some(Bucket::Temp) {
        warn!("Resume for student {student_id} is not in the holding area: {current}");
        return Ok(Relocation::ResumeNotFound);
    }
    let Some(target) = storage.rebase(current, bucket) else {
        warn!("Resume path for student {student_id} has no file name: {current}");
        return Ok(Relocation::ResumeNotFound);
    };
    if !storage.exists(current).await {
        warn!("Resume file not found for moving. Path: {current}");
        return Ok(Relocation::ResumeNotFound);
    }

    let mut tx = pool.begin().await?;

    // Guarded on the old path so a concurrent relocation cannot be overwritten.
    let updated = sqlx::query("UPDATE students SET resume_path = ? WHERE id = ? AND resume_path = ?")
        .bind(&target)
        .bind(student_id)
        .bind(current)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if updated == 0 {
        warn!("Resume path for student {student_id} changed underneath relocation");
        return Ok(Relocation::ResumeNotFound);
    }

    if let Err(e) = storage.move_file(current, &target).await {
        if let Err(rb) = tx.rollback().await {
            error!("Rollback after failed move for student {student_id} failed: {rb}");
        }
        if e.kind() == io::ErrorKind::NotFound && !storage.exists(current).await {
            warn!("Resume file vanished before it could be moved. Path: {current}");
            return Ok(Relocation::ResumeNotFound);
        }
        return Err(AppError::Storage(format!("Server error during file move: {e}")));
    }

    if let Err(e) = tx.commit().await {
        error!("Commit of resume path for student {student_id} failed: {e}");
        if let Err(undo) = storage.move_file(&target, current).await {
            error!("Could not move {target} back to {current}: {undo}");
        }
        return Err(e.into());
    }

    info!("Moved resume for student {student_id} to {target}");
    Ok(Relocation::Moved {
        bucket,
        resume_path: target,
    })
}
