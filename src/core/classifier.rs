use crate::domain::model::SparseVector;
use crate::utils::error::{Result, SentimentError};
use serde::{Deserialize, Serialize};

const ARTIFACT: &str = "classifier";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    Multinomial,
    Ovr,
}

impl MultiClass {
    /// 未指定時依類別數決定：兩類為 ovr，三類以上為 multinomial
    pub fn resolve(requested: Option<MultiClass>, n_classes: usize) -> Self {
        match requested {
            Some(multi_class) => multi_class,
            None if n_classes == 2 => MultiClass::Ovr,
            None => MultiClass::Multinomial,
        }
    }
}

/// Exported linear classifier: one coefficient row per class (or a single row for binary models).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticRegressionArtifact {
    pub classes: Vec<serde_json::Value>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_class: Option<MultiClass>,
}

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    multi_class: MultiClass,
}

fn class_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

fn log_sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        -(-x).exp().ln_1p()
    } else {
        x - x.exp().ln_1p()
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exp.iter().sum();
    exp.into_iter().map(|e| e / sum).collect()
}

impl LogisticRegression {
    pub fn from_artifact(artifact: LogisticRegressionArtifact, n_features: usize) -> Result<Self> {
        let n_classes = artifact.classes.len();
        let n_rows = artifact.coef.len();

        if n_classes < 2 {
            return Err(SentimentError::shape(
                ARTIFACT,
                format!("expected at least 2 classes, found {}", n_classes),
            ));
        }

        let binary = n_rows == 1 && n_classes == 2;
        if !binary && n_rows != n_classes {
            return Err(SentimentError::shape(
                ARTIFACT,
                format!("{} coefficient rows for {} classes", n_rows, n_classes),
            ));
        }

        if artifact.intercept.len() != n_rows {
            return Err(SentimentError::shape(
                ARTIFACT,
                format!(
                    "{} intercepts for {} coefficient rows",
                    artifact.intercept.len(),
                    n_rows
                ),
            ));
        }

        if let Some((row, weights)) = artifact
            .coef
            .iter()
            .enumerate()
            .find(|(_, weights)| weights.len() != n_features)
        {
            return Err(SentimentError::shape(
                ARTIFACT,
                format!(
                    "coefficient row {} has {} columns but the vocabulary has {} terms",
                    row,
                    weights.len(),
                    n_features
                ),
            ));
        }

        Ok(Self {
            classes: artifact.classes.iter().map(class_label).collect(),
            coef: artifact.coef,
            intercept: artifact.intercept,
            multi_class: MultiClass::resolve(artifact.multi_class, n_classes),
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn multi_class(&self) -> MultiClass {
        self.multi_class
    }

    pub fn decision_function(&self, features: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| features.dot(weights) + bias)
            .collect()
    }

    pub fn predict_proba(&self, features: &SparseVector) -> Vec<f64> {
        let scores = self.decision_function(features);

        if scores.len() == 1 {
            let p = match self.multi_class {
                MultiClass::Ovr => sigmoid(scores[0]),
                // softmax([-d, d])
                MultiClass::Multinomial => sigmoid(2.0 * scores[0]),
            };
            return vec![1.0 - p, p];
        }

        match self.multi_class {
            MultiClass::Multinomial => softmax(&scores),
            // 在 log 空間正規化，極小的 decision 值也不會變成 0/0
            MultiClass::Ovr => {
                let logs: Vec<f64> = scores.into_iter().map(log_sigmoid).collect();
                softmax(&logs)
            }
        }
    }
}
