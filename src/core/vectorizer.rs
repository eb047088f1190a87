//! Bag-of-words counting against a fixed, pre-fitted vocabulary.

use crate::domain::model::SparseVector;
use crate::utils::error::{Result, SentimentError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

const ARTIFACT: &str = "count_vectorizer";

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// On-disk form of a fitted count vectorizer.
///
/// Only word analysis is supported; any other exported parameter (`analyzer`,
/// `strip_accents`, ...) fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountVectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
    #[serde(default)]
    pub binary: bool,
}

#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    binary: bool,
}

impl CountVectorizer {
    pub fn from_artifact(artifact: CountVectorizerArtifact) -> Result<Self> {
        let n_features = artifact.vocabulary.len();
        if n_features == 0 {
            return Err(SentimentError::shape(ARTIFACT, "vocabulary is empty"));
        }

        if let Some((term, index)) = artifact
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= n_features)
        {
            return Err(SentimentError::shape(
                ARTIFACT,
                format!(
                    "term '{}' maps to column {} but the vocabulary has {} terms",
                    term, index, n_features
                ),
            ));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SentimentError::shape(
                ARTIFACT,
                format!("invalid ngram_range ({}, {})", min_n, max_n),
            ));
        }

        let token_pattern = Regex::new(&artifact.token_pattern).map_err(|e| {
            SentimentError::shape(
                ARTIFACT,
                format!("invalid token_pattern '{}': {}", artifact.token_pattern, e),
            )
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            lowercase: artifact.lowercase,
            token_pattern,
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.unwrap_or_default().into_iter().collect(),
            binary: artifact.binary,
        })
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// 斷詞：小寫化、套用 token pattern、移除停用詞
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        self.token_pattern
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    /// Word n-grams for every n in the configured range, joined by a single space.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let (min_n, max_n) = self.ngram_range;

        if max_n == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for term in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                let count = counts.entry(column).or_insert(0.0);
                if self.binary {
                    *count = 1.0;
                } else {
                    *count += 1.0;
                }
            }
        }

        SparseVector::from_entries(self.n_features(), counts.into_iter().collect())
    }
}
