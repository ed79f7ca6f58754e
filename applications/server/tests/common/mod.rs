/// Common test utilities and fixtures
use adboard_storage::Database;
use anyhow::Result;
use std::sync::Arc;

/// Create a test database with migrations applied
pub async fn create_test_database() -> Result<Arc<Database>> {
    let db = Database::in_memory().await?;
    Ok(Arc::new(db))
}
