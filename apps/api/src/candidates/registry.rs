use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::candidates::validation::ValidSubmission;
use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::storage::filename::unique_resume_name;
use crate::storage::ResumeStorage;

#[derive(Debug, Clone)]
pub struct RegisteredCandidate {
    pub id: i64,
    /// Storage-root-relative path of the staged resume, always in the temp bucket.
    pub resume_path: String,
}

/// Stages the resume into the temp bucket, then inserts the candidate row.
///
/// The file write and the insert are not one transaction: if the insert fails
/// the staged file stays behind as an orphan and is only logged.
pub async fn register_candidate(
    pool: &SqlitePool,
    storage: &ResumeStorage,
    submission: ValidSubmission,
) -> Result<RegisteredCandidate, AppError> {
    let ValidSubmission {
        first_name,
        last_name,
        resume,
    } = submission;

    let file_name = unique_resume_name(&first_name, &last_name, &resume.file_name);
    let resume_path = storage
        .stage(&file_name, &resume.contents)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to store resume: {e}")))?;

    let id = match insert_candidate(pool, &first_name, &last_name, &resume_path).await {
        Ok(id) => id,
        Err(e) => {
            warn!("Candidate insert failed; staged resume left orphaned at {resume_path}");
            return Err(e.into());
        }
    };

    info!("Registered candidate {id} with resume {resume_path}");
    Ok(RegisteredCandidate { id, resume_path })
}

async fn insert_candidate(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
    resume_path: &str,
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let id = sqlx::query(
        "INSERT INTO students (first_name, last_name, resume_path) VALUES (?, ?, ?)",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(resume_path)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    tx.commit().await?;
    Ok(id)
}

pub async fn find_candidate(pool: &SqlitePool, id: i64) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM students WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::policy::QualificationRule;
    use crate::candidates::validation::UploadedResume;
    use crate::storage::Bucket;
    use crate::test_support::{count_rows, isolated_state};
    use bytes::Bytes;

    fn valid(first: &str, last: &str, file_name: &str) -> ValidSubmission {
        ValidSubmission {
            first_name: first.to_string(),
            last_name: last.to_string(),
            resume: UploadedResume {
                file_name: file_name.to_string(),
                contents: Bytes::from_static(b"%PDF-1.7 resume"),
            },
        }
    }

    #[tokio::test]
    async fn test_register_stages_file_and_inserts_row() {
        let (state, _dir) = isolated_state(QualificationRule::default()).await;

        let registered = register_candidate(&state.db, &state.storage, valid("Ada", "Lovelace", "cv.pdf"))
            .await
            .unwrap();

        assert_eq!(Bucket::of(&registered.resume_path), Some(Bucket::Temp));
        assert!(registered.resume_path.ends_with(".pdf"));
        assert!(state.storage.exists(&registered.resume_path).await);

        let row = find_candidate(&state.db, registered.id).await.unwrap().unwrap();
        assert_eq!(row.first_name, "Ada");
        assert_eq!(row.last_name, "Lovelace");
        assert_eq!(row.resume_path, registered.resume_path);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let (state, _dir) = isolated_state(QualificationRule::default()).await;
        let first = register_candidate(&state.db, &state.storage, valid("A", "One", "a.pdf"))
            .await
            .unwrap();
        let second = register_candidate(&state.db, &state.storage, valid("B", "Two", "b.docx"))
            .await
            .unwrap();
        assert!(second.id > first.id);
        assert_eq!(count_rows(&state, "students").await, 2);
    }

    #[tokio::test]
    async fn test_insert_failure_leaves_orphan_file_and_no_row() {
        let (state, _dir) = isolated_state(QualificationRule::default()).await;
        sqlx::query("DROP TABLE assessments").execute(&state.db).await.unwrap();
        sqlx::query("DROP TABLE students").execute(&state.db).await.unwrap();

        let err = register_candidate(&state.db, &state.storage, valid("Ada", "Lovelace", "cv.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let staged = std::fs::read_dir(state.storage.root().join(Bucket::Temp.dir_name()))
            .unwrap()
            .count();
        assert_eq!(staged, 1);
    }

    #[tokio::test]
    async fn test_find_candidate_missing_is_none() {
        let (state, _dir) = isolated_state(QualificationRule::default()).await;
        assert!(find_candidate(&state.db, 42).await.unwrap().is_none());
    }
}
