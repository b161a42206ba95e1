use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::assessments::policy::QualificationRule;

/// Resume extensions accepted at upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

const DEFAULT_THRESHOLD: f64 = 0.6;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare checkout starts without a `.env`.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage_root: PathBuf,
    pub qualification_rule: QualificationRule,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let threshold = match std::env::var("QUALIFICATION_THRESHOLD") {
            Ok(raw) => raw
                .parse::<f64>()
                .context("QUALIFICATION_THRESHOLD must be a number")?,
            Err(_) => DEFAULT_THRESHOLD,
        };
        let rule_name =
            std::env::var("QUALIFICATION_RULE").unwrap_or_else(|_| "positive_count".to_string());

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/recruiting.db".to_string()),
            storage_root: std::env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            qualification_rule: parse_rule(&rule_name, threshold)?,
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration rooted at an explicit storage directory and database.
    /// Used by tests to point the service at an isolated temp dir.
    #[cfg(test)]
    pub fn isolated(storage_root: PathBuf, database_url: String, rule: QualificationRule) -> Self {
        Config {
            database_url,
            storage_root,
            qualification_rule: rule,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn parse_rule(name: &str, threshold: f64) -> Result<QualificationRule> {
    match name.trim().to_ascii_lowercase().as_str() {
        "positive_count" => Ok(QualificationRule::PositiveCount),
        "threshold" => {
            if !(0.0..=1.0).contains(&threshold) {
                bail!("QUALIFICATION_THRESHOLD must be within 0.0..=1.0, got {threshold}");
            }
            Ok(QualificationRule::Threshold { ratio: threshold })
        }
        other => bail!("QUALIFICATION_RULE must be 'positive_count' or 'threshold', got '{other}'"),
    }
}
