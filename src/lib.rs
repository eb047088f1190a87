pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::storage::LocalArtifactStore;
pub use app::load_engine;
pub use crate::core::{engine::SentimentEngine, model::SentimentModel};
pub use domain::model::{PredictRequest, PredictResponse, Prediction, Sentiment};
pub use utils::error::{Result, SentimentError};
