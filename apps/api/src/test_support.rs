//! Shared fixtures for unit tests: an isolated storage root and SQLite file per test.

use tempfile::TempDir;

use crate::assessments::policy::QualificationRule;
use crate::config::Config;
use crate::db::create_pool;
use crate::state::AppState;

/// Builds an `AppState` over a fresh temp directory. Keep the `TempDir` alive
/// for the duration of the test; dropping it deletes the root and database.
pub async fn isolated_state(rule: QualificationRule) -> (AppState, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let storage_root = dir.path().join("uploads");
    let database_url = format!("sqlite://{}", dir.path().join("intake.db").display());

    let pool = create_pool(&database_url).await.expect("open test database");
    let state = AppState::new(pool, Config::isolated(storage_root, database_url, rule));
    state
        .storage
        .ensure_layout()
        .await
        .expect("create storage buckets");

    (state, dir)
}

pub async fn count_rows(state: &AppState, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&state.db)
        .await
        .expect("count rows")
}
