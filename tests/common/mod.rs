//! Shared test infrastructure.
//!
//! `setup_test_db()` creates a temporary SQLite database with the schema
//! applied and no seed data, so every test starts from empty tables.

use tempfile::TempDir;

use gompa::db::{self, DbPool};

/// Setup a scratch database with migrations applied.
///
/// Returns (TempDir, DbPool); the TempDir must be kept alive for the pool
/// to remain valid.
pub fn setup_test_db() -> (TempDir, DbPool) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let pool = db::init_pool(db_path.to_str().expect("utf8 db path"));
    db::run_migrations(&pool);
    (dir, pool)
}
