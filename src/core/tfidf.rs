use crate::domain::model::SparseVector;
use crate::utils::error::{Result, SentimentError};
use serde::{Deserialize, Serialize};

const ARTIFACT: &str = "tfidf_transformer";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
    None,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TfidfArtifact {
    #[serde(default)]
    pub idf: Vec<f64>,
    #[serde(default, deserialize_with = "deserialize_norm")]
    pub norm: Norm,
    #[serde(default = "default_true")]
    pub use_idf: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
}

// `"norm": null` 與 `"norm": "none"` 同義
fn deserialize_norm<'de, D>(deserializer: D) -> std::result::Result<Norm, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Norm>::deserialize(deserializer)?.unwrap_or(Norm::None))
}

#[derive(Debug, Clone)]
pub struct TfidfTransformer {
    idf: Vec<f64>,
    norm: Norm,
    use_idf: bool,
    sublinear_tf: bool,
}

impl TfidfTransformer {
    /// `n_features` is the vocabulary size of the vectorizer this transformer was fitted after.
    pub fn from_artifact(artifact: TfidfArtifact, n_features: usize) -> Result<Self> {
        if artifact.use_idf && artifact.idf.len() != n_features {
            return Err(SentimentError::shape(
                ARTIFACT,
                format!(
                    "idf has {} weights but the vocabulary has {} terms",
                    artifact.idf.len(),
                    n_features
                ),
            ));
        }

        if artifact.idf.iter().any(|w| !w.is_finite()) {
            return Err(SentimentError::shape(ARTIFACT, "idf contains non-finite weights"));
        }

        Ok(Self {
            idf: artifact.idf,
            norm: artifact.norm,
            use_idf: artifact.use_idf,
            sublinear_tf: artifact.sublinear_tf,
        })
    }

    pub fn transform(&self, counts: SparseVector) -> SparseVector {
        let SparseVector { dim, entries } = counts;

        let mut entries: Vec<(usize, f64)> = entries
            .into_iter()
            .map(|(column, tf)| {
                let mut value = tf;
                if self.sublinear_tf && value > 0.0 {
                    value = value.ln() + 1.0;
                }
                if self.use_idf {
                    value *= self.idf.get(column).copied().unwrap_or(0.0);
                }
                (column, value)
            })
            .collect();

        let norm = match self.norm {
            Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::None => 1.0,
        };

        // 全零向量維持原樣
        if norm > 0.0 && norm != 1.0 {
            for (_, value) in entries.iter_mut() {
                *value /= norm;
            }
        }

        SparseVector { dim, entries }
    }
}
