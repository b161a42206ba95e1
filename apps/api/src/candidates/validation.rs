use bytes::Bytes;

use crate::config::ALLOWED_EXTENSIONS;
use crate::errors::AppError;
use crate::storage::filename::extension_of;

/// A file part pulled out of the upload form.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: String,
    pub contents: Bytes,
}

/// Raw form fields as received; anything may be missing.
#[derive(Debug, Default)]
pub struct CandidateSubmission {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub resume: Option<UploadedResume>,
}

/// A submission that passed every intake check.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub first_name: String,
    pub last_name: String,
    pub resume: UploadedResume,
}

/// Applies the intake checks in order: file part, file name, names, extension, size.
/// The first failing check decides the message returned to the client.
pub fn validate_submission(
    submission: CandidateSubmission,
    max_upload_bytes: usize,
) -> Result<ValidSubmission, AppError> {
    let resume = submission
        .resume
        .ok_or_else(|| AppError::Validation("No resume file part".to_string()))?;

    if resume.file_name.trim().is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }

    let first_name = non_blank(submission.first_name);
    let last_name = non_blank(submission.last_name);
    let (Some(first_name), Some(last_name)) = (first_name, last_name) else {
        return Err(AppError::Validation(
            "First name and last name are required".to_string(),
        ));
    };

    if !is_allowed_file(&resume.file_name) {
        return Err(AppError::Validation(
            "File type not allowed. Only PDF, DOC, DOCX.".to_string(),
        ));
    }

    if resume.contents.len() > max_upload_bytes {
        return Err(AppError::Validation(format!(
            "File too large. Maximum size is {max_upload_bytes} bytes"
        )));
    }

    Ok(ValidSubmission {
        first_name,
        last_name,
        resume,
    })
}

pub fn is_allowed_file(file_name: &str) -> bool {
    extension_of(file_name)
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1024;

    fn submission(first: &str, last: &str, file_name: &str) -> CandidateSubmission {
        CandidateSubmission {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            resume: Some(UploadedResume {
                file_name: file_name.to_string(),
                contents: Bytes::from_static(b"%PDF"),
            }),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_allowed_extensions_are_case_insensitive() {
        assert!(is_allowed_file("cv.pdf"));
        assert!(is_allowed_file("cv.DOCX"));
        assert!(is_allowed_file("cv.Doc"));
        assert!(!is_allowed_file("cv.exe"));
        assert!(!is_allowed_file("cv"));
        assert!(!is_allowed_file("cv.pdf.sh"));
    }

    #[test]
    fn test_valid_submission_trims_names() {
        let valid = validate_submission(submission("  Ada ", "Lovelace", "cv.pdf"), LIMIT).unwrap();
        assert_eq!(valid.first_name, "Ada");
        assert_eq!(valid.last_name, "Lovelace");
        assert_eq!(valid.resume.file_name, "cv.pdf");
    }

    #[test]
    fn test_missing_file_part_checked_first() {
        let sub = CandidateSubmission {
            first_name: None,
            last_name: None,
            resume: None,
        };
        let err = validate_submission(sub, LIMIT).unwrap_err();
        assert_eq!(message(err), "No resume file part");
    }

    #[test]
    fn test_empty_file_name_rejected() {
        let err = validate_submission(submission("Ada", "Lovelace", ""), LIMIT).unwrap_err();
        assert_eq!(message(err), "No selected file");
    }

    #[test]
    fn test_blank_names_rejected() {
        let err = validate_submission(submission("Ada", "   ", "cv.pdf"), LIMIT).unwrap_err();
        assert_eq!(message(err), "First name and last name are required");
    }

    #[test]
    fn test_disallowed_extension_rejected() {
        let err = validate_submission(submission("Ada", "Lovelace", "cv.txt"), LIMIT).unwrap_err();
        assert_eq!(message(err), "File type not allowed. Only PDF, DOC, DOCX.");
    }

    #[test]
    fn test_oversized_file_rejected() {
        let err = validate_submission(submission("Ada", "Lovelace", "cv.pdf"), 2).unwrap_err();
        assert!(message(err).starts_with("File too large"));
    }
}
