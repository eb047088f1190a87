mod common;

use common::{model_dir, test_config, write_json};
use sentiment_api::core::{ArtifactFiles, ConfigProvider};
use sentiment_api::{load_engine, LocalArtifactStore, Sentiment, SentimentError, SentimentModel};
use tempfile::TempDir;

#[tokio::test]
async fn test_load_and_predict_positive() {
    let dir = model_dir();
    let engine = load_engine(&test_config(dir.path())).await.unwrap();

    let prediction = engine.run("I love this, it is a great product").unwrap();
    assert_eq!(prediction.sentiment, Sentiment::Positive);
    assert_eq!(prediction.class_index, 2);
    assert!(prediction.confidence > 0.9 && prediction.confidence <= 1.0);
    assert!((prediction.probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_load_and_predict_negative() {
    let dir = model_dir();
    let engine = load_engine(&test_config(dir.path())).await.unwrap();

    let prediction = engine.run("This is TERRIBLE. I hate it").unwrap();
    assert_eq!(prediction.sentiment, Sentiment::Negative);
    assert_eq!(prediction.class_index, 0);
    assert!(prediction.confidence > 0.9);
}

#[tokio::test]
async fn test_neutral_class_is_reported_as_negative() {
    let dir = model_dir();
    let engine = load_engine(&test_config(dir.path())).await.unwrap();

    let prediction = engine.run("It was okay").unwrap();
    assert_eq!(prediction.class_index, 1);
    assert_eq!(prediction.sentiment, Sentiment::Negative);
    let expected = 3.0f64.exp() / (3.0f64.exp() + 2.0);
    assert!((prediction.confidence - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_words_give_uniform_probabilities() {
    let dir = model_dir();
    let engine = load_engine(&test_config(dir.path())).await.unwrap();

    let prediction = engine.run("zebra quantum xylophone").unwrap();
    assert_eq!(prediction.class_index, 0);
    assert_eq!(prediction.sentiment, Sentiment::Negative);
    assert!((prediction.confidence - 1.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_missing_model_directory() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("Models");

    let err = load_engine(&test_config(&missing)).await.err().unwrap();
    assert!(matches!(err, SentimentError::ModelDirectoryNotFound { .. }));
    assert!(err.to_string().contains("Models"));
}

#[tokio::test]
async fn test_missing_artifact_reports_full_path() {
    let dir = model_dir();
    std::fs::remove_file(dir.path().join("transformer.json")).unwrap();

    let err = load_engine(&test_config(dir.path())).await.err().unwrap();
    match err {
        SentimentError::ArtifactNotFound { name, path } => {
            assert_eq!(name, "tfidf_transformer");
            assert!(path.ends_with("transformer.json"));
        }
        other => panic!("expected missing artifact, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_artifact() {
    let dir = model_dir();
    std::fs::write(dir.path().join("text_lr.json"), b"not json").unwrap();

    let err = load_engine(&test_config(dir.path())).await.err().unwrap();
    assert!(matches!(err, SentimentError::ArtifactFormatError { ref name, .. } if name == "classifier"));
}

#[tokio::test]
async fn test_character_analyzer_export_is_rejected() {
    let dir = model_dir();
    let mut vectorizer = common::count_vectorizer();
    vectorizer["analyzer"] = serde_json::json!("char_wb");
    write_json(dir.path(), "count_vect.json", &vectorizer);

    let err = load_engine(&test_config(dir.path())).await.err().unwrap();
    assert!(matches!(err, SentimentError::ArtifactFormatError { ref name, .. } if name == "count_vectorizer"));
    assert!(err.to_string().contains("analyzer"));
}

#[tokio::test]
async fn test_artifacts_from_different_models_are_rejected() {
    let dir = model_dir();
    write_json(
        dir.path(),
        "transformer.json",
        &serde_json::json!({"idf": [1.0, 2.0]}),
    );

    let err = load_engine(&test_config(dir.path())).await.err().unwrap();
    assert!(matches!(err, SentimentError::ModelShapeError { .. }));
}

#[tokio::test]
async fn test_positive_class_index_out_of_range() {
    let dir = model_dir();
    let mut config = test_config(dir.path());
    config.positive_class_index = Some(3);

    let err = load_engine(&config).await.err().unwrap();
    assert!(matches!(err, SentimentError::InvalidConfigValueError { .. }));
}

#[tokio::test]
async fn test_custom_artifact_file_names() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "vocab.json", &common::count_vectorizer());
    write_json(dir.path(), "idf.json", &common::tfidf_transformer());
    write_json(dir.path(), "lr.json", &common::classifier());

    let store = LocalArtifactStore::open(dir.path()).unwrap();
    let files = ArtifactFiles {
        count_vectorizer: "vocab.json".to_string(),
        tfidf_transformer: "idf.json".to_string(),
        classifier: "lr.json".to_string(),
    };

    let model = SentimentModel::load(&store, &files).await.unwrap();
    assert_eq!(model.n_features(), 7);
    assert_eq!(model.classes(), ["negative", "neutral", "positive"]);

    let config = test_config(dir.path());
    assert_eq!(config.artifact_files(), ArtifactFiles::default());
}
