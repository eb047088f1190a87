// Application layer: 把配置、模型檔案與推論引擎組裝起來

use crate::adapters::storage::LocalArtifactStore;
use crate::core::engine::SentimentEngine;
use crate::core::model::SentimentModel;
use crate::core::ConfigProvider;
use crate::utils::error::Result;

pub type DefaultEngine = SentimentEngine<SentimentModel>;

/// Loads the three artifacts from the configured model directory and builds the engine.
pub async fn load_engine<C: ConfigProvider>(config: &C) -> Result<DefaultEngine> {
    let store = LocalArtifactStore::open(config.model_path())?;
    let model = SentimentModel::load(&store, &config.artifact_files()).await?;
    SentimentEngine::new(model, config.positive_class_index())
}
