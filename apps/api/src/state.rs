use sqlx::SqlitePool;

use crate::assessments::policy::QualificationRule;
use crate::config::Config;
use crate::storage::ResumeStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Storage root holding the temp, qualified and unqualified buckets.
    pub storage: ResumeStorage,
    pub config: Config,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            storage: ResumeStorage::new(config.storage_root.clone()),
            config,
        }
    }

    pub fn qualification_rule(&self) -> QualificationRule {
        self.config.qualification_rule
    }
}
