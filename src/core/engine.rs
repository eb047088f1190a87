use crate::core::Pipeline;
use crate::domain::model::{Prediction, Sentiment};
use crate::domain::ports::Predictor;
use crate::utils::error::{Result, SentimentError};
use async_trait::async_trait;

/// Class index the fitted classifier uses for positive reviews.
pub const DEFAULT_POSITIVE_CLASS_INDEX: usize = 2;

const LOG_PREVIEW_CHARS: usize = 50;

pub struct SentimentEngine<P: Pipeline> {
    pipeline: P,
    positive_class: usize,
}

/// Index of the largest probability; the first one wins on ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

impl<P: Pipeline> SentimentEngine<P> {
    pub fn new(pipeline: P, positive_class: usize) -> Result<Self> {
        let n_classes = pipeline.n_classes();
        if positive_class >= n_classes {
            return Err(SentimentError::InvalidConfigValueError {
                field: "positive_class_index".to_string(),
                value: positive_class.to_string(),
                reason: format!("classifier only has {} classes", n_classes),
            });
        }

        Ok(Self {
            pipeline,
            positive_class,
        })
    }

    pub fn run(&self, text: &str) -> Result<Prediction> {
        // Vectorize
        let counts = self.pipeline.vectorize(text)?;
        tracing::debug!("Count features shape: (1, {}), nnz={}", counts.dim, counts.nnz());

        // Transform
        let features = self.pipeline.transform(counts)?;
        tracing::debug!("TF-IDF features shape: (1, {}), nnz={}", features.dim, features.nnz());

        // Classify
        let probabilities = self.pipeline.classify(&features)?;
        tracing::debug!("Raw prediction probabilities: {:?}", probabilities);

        let class_index = argmax(&probabilities)
            .ok_or_else(|| SentimentError::inference("classifier returned no probabilities"))?;
        let confidence = probabilities[class_index].clamp(0.0, 1.0);

        // 只有正向類別對應 positive，其餘類別 (含中性) 皆視為 negative
        let sentiment = if class_index == self.positive_class {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };

        tracing::info!(
            "Prediction for text: '{}...' -> {} (confidence: {:.2})",
            preview(text),
            sentiment,
            confidence
        );

        Ok(Prediction {
            sentiment,
            confidence,
            class_index,
            probabilities,
        })
    }
}

#[async_trait]
impl<P: Pipeline> Predictor for SentimentEngine<P> {
    async fn predict(&self, text: &str) -> Result<Prediction> {
        self.run(text).map_err(|e| {
            tracing::error!("Prediction error: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SparseVector;

    /// Fixed probabilities regardless of input.
    struct FixedPipeline {
        probabilities: Vec<f64>,
    }

    impl Pipeline for FixedPipeline {
        fn vectorize(&self, _text: &str) -> Result<SparseVector> {
            Ok(SparseVector::new(1))
        }

        fn transform(&self, counts: SparseVector) -> Result<SparseVector> {
            Ok(counts)
        }

        fn classify(&self, _features: &SparseVector) -> Result<Vec<f64>> {
            Ok(self.probabilities.clone())
        }

        fn n_classes(&self) -> usize {
            3
        }
    }

    fn engine(probabilities: Vec<f64>) -> SentimentEngine<FixedPipeline> {
        SentimentEngine::new(FixedPipeline { probabilities }, DEFAULT_POSITIVE_CLASS_INDEX).unwrap()
    }

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_positive_class_maps_to_positive() {
        let prediction = engine(vec![0.1, 0.2, 0.7]).run("great").unwrap();
        assert_eq!(prediction.sentiment, Sentiment::Positive);
        assert_eq!(prediction.class_index, 2);
        assert!((prediction.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_other_classes_map_to_negative() {
        let prediction = engine(vec![0.1, 0.6, 0.3]).run("fine").unwrap();
        assert_eq!(prediction.sentiment, Sentiment::Negative);
        assert!((prediction.confidence - 0.6).abs() < 1e-12);

        let prediction = engine(vec![0.8, 0.1, 0.1]).run("awful").unwrap();
        assert_eq!(prediction.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_empty_probabilities_is_inference_error() {
        let err = engine(vec![]).run("anything").unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_positive_class_out_of_range() {
        let result = SentimentEngine::new(FixedPipeline { probabilities: vec![] }, 3);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_predict_through_trait_object() {
        let predictor: std::sync::Arc<dyn Predictor> = std::sync::Arc::new(engine(vec![0.0, 0.0, 1.0]));
        let prediction = predictor.predict("love it").await.unwrap();
        assert_eq!(prediction.sentiment, Sentiment::Positive);
    }
}
