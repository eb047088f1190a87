#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

pub const VOCABULARY: [&str; 7] = ["bad", "good", "great", "hate", "love", "okay", "terrible"];

pub fn count_vectorizer() -> Value {
    let vocabulary: serde_json::Map<String, Value> = VOCABULARY
        .iter()
        .enumerate()
        .map(|(i, term)| (term.to_string(), json!(i)))
        .collect();

    json!({
        "vocabulary": vocabulary,
        "lowercase": true,
        "token_pattern": "(?u)\\b\\w\\w+\\b",
        "ngram_range": [1, 1],
        "stop_words": null,
        "binary": false
    })
}

pub fn tfidf_transformer() -> Value {
    json!({
        "idf": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        "norm": "l2",
        "use_idf": true,
        "sublinear_tf": false
    })
}

/// negative / neutral / positive，正向類別在 index 2
pub fn classifier() -> Value {
    json!({
        "classes": ["negative", "neutral", "positive"],
        "coef": [
            [3.0, -1.0, -1.0, 3.0, -1.0, 0.0, 3.0],
            [0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0],
            [-1.0, 3.0, 3.0, -1.0, 3.0, 0.0, -1.0]
        ],
        "intercept": [0.0, 0.0, 0.0],
        "multi_class": "multinomial"
    })
}

pub fn write_json(dir: &Path, name: &str, value: &Value) {
    std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

/// Model directory holding all three fixture artifacts under their default names.
pub fn model_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_json(temp_dir.path(), "count_vect.json", &count_vectorizer());
    write_json(temp_dir.path(), "transformer.json", &tfidf_transformer());
    write_json(temp_dir.path(), "text_lr.json", &classifier());
    temp_dir
}

pub fn test_config(model_path: &Path) -> sentiment_api::CliConfig {
    sentiment_api::CliConfig {
        model_path: Some(model_path.to_str().unwrap().to_string()),
        ..Default::default()
    }
}
