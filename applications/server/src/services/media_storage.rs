/// Media storage service - manages uploaded ad media on disk
use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct MediaStorage {
    base_path: PathBuf,
}

impl MediaStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Initialize the storage directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Store an uploaded media file.
    ///
    /// The stored name is `{uuid}_{sanitized original name}`, so two uploads
    /// with the same filename never collide. Returns the stored name, which
    /// callers persist as the ad's media reference.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let sanitized = Self::sanitize_filename(original_name);
        if sanitized.is_empty() {
            return Err(ServerError::BadRequest("Invalid filename".to_string()));
        }

        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitized);
        let path = self.base_path.join(&stored_name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        Ok(stored_name)
    }

    /// Resolve a stored name to its path on disk
    pub fn media_path(&self, stored_name: &str) -> Result<PathBuf> {
        // The stored name is a single path component; anything else is a
        // traversal attempt.
        if stored_name.contains('/') || stored_name.contains('\\') || stored_name.contains("..") {
            return Err(ServerError::BadRequest("Invalid media name".to_string()));
        }

        let path = self.base_path.join(stored_name);
        if !path.exists() {
            return Err(ServerError::NotFound(format!(
                "Media file not found: {}",
                stored_name
            )));
        }
        Ok(path)
    }

    /// Delete a stored media file. Missing files are not an error; the
    /// database record is the source of truth and the file may already be
    /// gone.
    pub async fn delete(&self, stored_name: &str) {
        let path = match self.media_path(stored_name) {
            Ok(p) => p,
            Err(_) => return,
        };

        if let Err(e) = fs::remove_file(&path).await {
            tracing::warn!(file = %stored_name, error = %e, "Failed to delete media file");
        }
    }

    /// Base directory for static serving
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn sanitize_filename(name: &str) -> String {
        // Keep only the final path component, then strip anything outside a
        // conservative character set.
        let base = name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();

        base.chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .collect::<String>()
            .trim_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_resolve() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(temp_dir.path().to_path_buf());
        storage.initialize().await.unwrap();

        let stored = storage.store("promo.mp4", b"fake video data").await.unwrap();
        assert!(stored.ends_with("_promo.mp4"));

        let path = storage.media_path(&stored).unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_delete_is_silent_for_missing_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(temp_dir.path().to_path_buf());
        storage.initialize().await.unwrap();

        // Should not panic or error
        storage.delete("nonexistent.mp4").await;
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(temp_dir.path().to_path_buf());
        storage.initialize().await.unwrap();

        assert!(storage.media_path("../etc/passwd").is_err());

        // Path components in upload names are stripped, not honored
        let stored = storage
            .store("../../evil.mp4", b"data")
            .await
            .unwrap();
        assert!(stored.ends_with("_evil.mp4"));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(MediaStorage::sanitize_filename("ad one!.mp4"), "adone.mp4");
        assert_eq!(MediaStorage::sanitize_filename("/tmp/x/clip.png"), "clip.png");
        assert_eq!(MediaStorage::sanitize_filename("..."), "");
    }
}
