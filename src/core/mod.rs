pub mod classifier;
pub mod engine;
pub mod model;
pub mod tfidf;
pub mod vectorizer;

pub use crate::domain::model::{Prediction, Sentiment, SparseVector};
pub use crate::domain::ports::{ArtifactFiles, ArtifactStore, ConfigProvider, Pipeline, Predictor};
pub use crate::utils::error::Result;
