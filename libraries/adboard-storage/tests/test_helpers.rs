//! Test helpers and fixtures for storage integration tests
//!
//! Tests run against real SQLite files in a temp directory to exercise the
//! same migrations and constraints as production.

use adboard_core::{AdId, CreateAd, CreateDisplay, DisplayId, UserId};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub db: adboard_storage::Database,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let db = adboard_storage::Database::new(&db_url)
            .await
            .expect("Failed to create database");

        Self {
            db,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }
}

/// Test fixture: create a user account
pub async fn create_test_user(pool: &SqlitePool, email: &str) -> UserId {
    let user = adboard_storage::users::create(pool, email, "Test User", "not-a-real-hash")
        .await
        .expect("Failed to create test user");
    user.id
}

/// Test fixture: create an ad owned by `owner`
pub async fn create_test_ad(
    pool: &SqlitePool,
    title: &str,
    duration_seconds: i64,
    owner: &UserId,
) -> AdId {
    let ad = adboard_storage::ads::create(
        pool,
        CreateAd {
            title: title.to_string(),
            kind: "image".to_string(),
            duration_seconds,
            media_ref: None,
            owner: owner.clone(),
        },
    )
    .await
    .expect("Failed to create test ad");
    ad.id
}

/// Test fixture: create a display owned by `owner`
pub async fn create_test_display(pool: &SqlitePool, name: &str, owner: &UserId) -> DisplayId {
    let display = adboard_storage::displays::create(
        pool,
        CreateDisplay {
            name: name.to_string(),
            location: "Main Street".to_string(),
            kind: "LED".to_string(),
            owner: owner.clone(),
        },
    )
    .await
    .expect("Failed to create test display");
    display.id
}
