use crate::config::{
    validate_provider, DEFAULT_HOST, DEFAULT_MAX_PAYLOAD_SIZE, DEFAULT_MAX_TEXT_LENGTH,
    DEFAULT_MODEL_PATH, DEFAULT_PORT,
};
use crate::core::engine::DEFAULT_POSITIVE_CLASS_INDEX;
use crate::core::{ArtifactFiles, ConfigProvider};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Values left unset fall back to the TOML file (when given) and then to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "sentiment-api")]
#[command(about = "HTTP API serving a pre-trained text sentiment classifier")]
pub struct CliConfig {
    #[arg(short, long, env = "SENTIMENT_API_CONFIG", help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, env = "SENTIMENT_API_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "SENTIMENT_API_PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "MODEL_PATH", help = "Directory holding the exported model artifacts")]
    pub model_path: Option<String>,

    #[arg(long, env = "SENTIMENT_API_POSITIVE_CLASS_INDEX")]
    pub positive_class_index: Option<usize>,

    #[arg(long, env = "SENTIMENT_API_MAX_TEXT_LENGTH")]
    pub max_text_length: Option<usize>,

    #[arg(long, env = "SENTIMENT_API_CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_allowed_origins: Vec<String>,

    #[arg(long, env = "SENTIMENT_API_MAX_PAYLOAD_SIZE")]
    pub max_payload_size: Option<usize>,

    #[arg(long, env = "SENTIMENT_API_LOG_FORMAT", help = "compact or json")]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_default()
    }
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    fn model_path(&self) -> &str {
        self.model_path.as_deref().unwrap_or(DEFAULT_MODEL_PATH)
    }

    fn artifact_files(&self) -> ArtifactFiles {
        ArtifactFiles::default()
    }

    fn positive_class_index(&self) -> usize {
        self.positive_class_index
            .unwrap_or(DEFAULT_POSITIVE_CLASS_INDEX)
    }

    fn max_text_length(&self) -> usize {
        self.max_text_length.unwrap_or(DEFAULT_MAX_TEXT_LENGTH)
    }

    fn cors_allowed_origins(&self) -> &[String] {
        &self.cors_allowed_origins
    }

    fn max_payload_size(&self) -> usize {
        self.max_payload_size.unwrap_or(DEFAULT_MAX_PAYLOAD_SIZE)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["sentiment-api"]).unwrap();
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 5000);
        assert_eq!(config.positive_class_index(), 2);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::try_parse_from([
            "sentiment-api",
            "--port",
            "8080",
            "--model-path",
            "/srv/models",
            "--cors-allowed-origins",
            "https://a.example,https://b.example",
            "--log-format",
            "json",
            "-v",
        ])
        .unwrap();

        assert_eq!(config.port(), 8080);
        assert_eq!(config.model_path(), "/srv/models");
        assert_eq!(config.cors_allowed_origins().len(), 2);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_invalid_origin_fails_validation() {
        let config = CliConfig {
            cors_allowed_origins: vec!["not a url".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
