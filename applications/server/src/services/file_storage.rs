/// File storage service - uploaded audio on local disk
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tunebox_core::{CoreError, Result};
use tunebox_library::FileStore;

/// Stores uploads flat in one directory.
///
/// References look like `<prefix>/<file name>`, which is also the path the
/// router serves the directory under.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
    url_prefix: String,
}

impl FileStorage {
    pub fn new(base_path: PathBuf, url_prefix: impl Into<String>) -> Self {
        Self {
            base_path,
            url_prefix: url_prefix.into().trim_matches('/').to_string(),
        }
    }

    /// Initialize storage directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Map a stored reference back to a path inside the storage directory.
    ///
    /// Rejects references with another prefix or anything but a single
    /// plain file name after it (prevents directory traversal).
    pub fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let name = reference
            .strip_prefix(&self.url_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                CoreError::invalid_argument(format!("Not a stored file reference: {}", reference))
            })?;

        self.path_for(name)
    }

    fn path_for(&self, file_name: &str) -> Result<PathBuf> {
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_path.join(file_name)),
            _ => Err(CoreError::invalid_argument(format!(
                "Invalid file name: {}",
                file_name
            ))),
        }
    }
}

#[async_trait]
impl FileStore for FileStorage {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let path = self.path_for(file_name)?;
        fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored upload");
        Ok(format!("{}/{}", self.url_prefix, file_name))
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        let path = self.resolve(reference)?;
        fs::remove_file(&path).await?;

        tracing::debug!(path = %path.display(), "Removed upload");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_delete() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf(), "uploads");
        storage.initialize().await.unwrap();

        let reference = storage.save("123-abc.mp3", b"fake audio data").await.unwrap();
        assert_eq!(reference, "uploads/123-abc.mp3");

        let path = storage.resolve(&reference).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"fake audio data");

        storage.delete(&reference).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_file_delete_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf(), "uploads");

        assert!(storage.delete("uploads/nothing.mp3").await.is_err());
    }

    #[test]
    fn test_traversal_rejected() {
        let storage = FileStorage::new(PathBuf::from("/srv/uploads"), "/uploads/");

        assert!(storage.resolve("uploads/../secret").is_err());
        assert!(storage.resolve("uploads/a/b.mp3").is_err());
        assert!(storage.resolve("other/a.mp3").is_err());
        assert!(storage.resolve("uploadsx/a.mp3").is_err());
        assert_eq!(
            storage.resolve("uploads/a.mp3").unwrap(),
            PathBuf::from("/srv/uploads/a.mp3")
        );
    }
}
