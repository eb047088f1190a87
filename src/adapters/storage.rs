use crate::core::ArtifactStore;
use crate::utils::error::{Result, SentimentError};
use std::path::{Path, PathBuf};

/// Reads model artifacts from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    base_path: PathBuf,
}

impl LocalArtifactStore {
    /// 模型目錄不存在時直接回傳錯誤
    pub fn open(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        tracing::info!("Loading models from: {}", base_path.display());

        if !base_path.is_dir() {
            return Err(SentimentError::ModelDirectoryNotFound {
                path: base_path.display().to_string(),
            });
        }

        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ArtifactStore for LocalArtifactStore {
    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(name);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    fn locate(&self, name: &str) -> String {
        self.base_path.join(name).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("Models");

        match LocalArtifactStore::open(&missing) {
            Err(SentimentError::ModelDirectoryNotFound { path }) => {
                assert!(path.ends_with("Models"));
            }
            other => panic!("expected missing directory error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_artifact() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("count_vect.json"), b"{}").unwrap();

        let store = LocalArtifactStore::open(temp_dir.path()).unwrap();
        let data = tokio_test::block_on(store.read_artifact("count_vect.json")).unwrap();
        assert_eq!(data, b"{}");

        let missing = tokio_test::block_on(store.read_artifact("text_lr.json"));
        assert!(matches!(missing, Err(SentimentError::IoError(_))));
        assert!(store.locate("text_lr.json").ends_with("text_lr.json"));
    }
}
