use crate::core::classifier::{LogisticRegression, LogisticRegressionArtifact};
use crate::core::tfidf::{TfidfArtifact, TfidfTransformer};
use crate::core::vectorizer::{CountVectorizer, CountVectorizerArtifact};
use crate::domain::model::SparseVector;
use crate::domain::ports::{ArtifactFiles, ArtifactStore, Pipeline};
use crate::utils::error::{Result, SentimentError};
use serde::de::DeserializeOwned;

/// The three fitted artifacts, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SentimentModel {
    count_vectorizer: CountVectorizer,
    tfidf_transformer: TfidfTransformer,
    classifier: LogisticRegression,
}

async fn load_artifact<S, T>(store: &S, name: &str, file: &str) -> Result<T>
where
    S: ArtifactStore,
    T: DeserializeOwned,
{
    let bytes = store.read_artifact(file).await.map_err(|e| match e {
        SentimentError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            SentimentError::ArtifactNotFound {
                name: name.to_string(),
                path: store.locate(file),
            }
        }
        other => other,
    })?;

    let artifact = serde_json::from_slice(&bytes).map_err(|source| {
        SentimentError::ArtifactFormatError {
            name: name.to_string(),
            source,
        }
    })?;

    tracing::info!("Successfully loaded {}", name);
    Ok(artifact)
}

impl SentimentModel {
    pub fn new(
        count_vectorizer: CountVectorizer,
        tfidf_transformer: TfidfTransformer,
        classifier: LogisticRegression,
    ) -> Self {
        Self {
            count_vectorizer,
            tfidf_transformer,
            classifier,
        }
    }

    /// 依序載入 vectorizer、transformer、classifier 並檢查彼此維度一致
    pub async fn load<S: ArtifactStore>(store: &S, files: &ArtifactFiles) -> Result<Self> {
        let vectorizer: CountVectorizerArtifact =
            load_artifact(store, "count_vectorizer", &files.count_vectorizer).await?;
        let transformer: TfidfArtifact =
            load_artifact(store, "tfidf_transformer", &files.tfidf_transformer).await?;
        let classifier: LogisticRegressionArtifact =
            load_artifact(store, "classifier", &files.classifier).await?;

        let count_vectorizer = CountVectorizer::from_artifact(vectorizer)?;
        let n_features = count_vectorizer.n_features();
        let tfidf_transformer = TfidfTransformer::from_artifact(transformer, n_features)?;
        let classifier = LogisticRegression::from_artifact(classifier, n_features)?;

        tracing::debug!(
            "Model ready: {} features, classes {:?}",
            n_features,
            classifier.classes()
        );

        Ok(Self::new(count_vectorizer, tfidf_transformer, classifier))
    }

    pub fn n_features(&self) -> usize {
        self.count_vectorizer.n_features()
    }

    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }
}

impl Pipeline for SentimentModel {
    fn vectorize(&self, text: &str) -> Result<SparseVector> {
        Ok(self.count_vectorizer.transform(text))
    }

    fn transform(&self, counts: SparseVector) -> Result<SparseVector> {
        if counts.dim != self.n_features() {
            return Err(SentimentError::inference(format!(
                "expected {} features, got {}",
                self.n_features(),
                counts.dim
            )));
        }
        Ok(self.tfidf_transformer.transform(counts))
    }

    fn classify(&self, features: &SparseVector) -> Result<Vec<f64>> {
        let probabilities = self.classifier.predict_proba(features);
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(SentimentError::inference(format!(
                "classifier produced non-finite probabilities: {:?}",
                probabilities
            )));
        }
        Ok(probabilities)
    }

    fn n_classes(&self) -> usize {
        self.classifier.n_classes()
    }
}
