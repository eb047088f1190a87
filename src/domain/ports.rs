use crate::domain::model::{Prediction, SparseVector};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 模型檔案來源
pub trait ArtifactStore: Send + Sync {
    fn read_artifact(&self, name: &str)
        -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Full path of an artifact, used in logs and errors.
    fn locate(&self, name: &str) -> String;
}

/// File names of the three exported artifacts inside the model directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFiles {
    pub count_vectorizer: String,
    pub tfidf_transformer: String,
    pub classifier: String,
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            count_vectorizer: "count_vect.json".to_string(),
            tfidf_transformer: "transformer.json".to_string(),
            classifier: "text_lr.json".to_string(),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn model_path(&self) -> &str;
    fn artifact_files(&self) -> ArtifactFiles;
    fn positive_class_index(&self) -> usize;
    fn max_text_length(&self) -> usize;
    fn cors_allowed_origins(&self) -> &[String];
    fn max_payload_size(&self) -> usize;
}

/// The three fixed stages every sentiment model runs.
pub trait Pipeline: Send + Sync {
    fn vectorize(&self, text: &str) -> Result<SparseVector>;
    fn transform(&self, counts: SparseVector) -> Result<SparseVector>;
    fn classify(&self, features: &SparseVector) -> Result<Vec<f64>>;
    fn n_classes(&self) -> usize;
}

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, text: &str) -> Result<Prediction>;
}
