#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_origin, validate_path, validate_positive_number,
    validate_range,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL_PATH: &str = "./Models";
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 10_000;
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 1024 * 1024;

/// 兩種配置來源共用的檢查
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_non_empty_string("server.host", config.host())?;
    validate_range("server.port", config.port(), 1, u16::MAX)?;
    validate_positive_number("server.max_payload_size", config.max_payload_size(), 1)?;

    for origin in config.cors_allowed_origins() {
        validate_origin("server.cors_allowed_origins", origin)?;
    }

    validate_path("model.path", config.model_path())?;

    let files = config.artifact_files();
    validate_non_empty_string("model.files.count_vectorizer", &files.count_vectorizer)?;
    validate_non_empty_string("model.files.tfidf_transformer", &files.tfidf_transformer)?;
    validate_non_empty_string("model.files.classifier", &files.classifier)?;

    validate_positive_number("validation.max_text_length", config.max_text_length(), 1)?;

    Ok(())
}
