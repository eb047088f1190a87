use crate::config::{
    validate_provider, DEFAULT_HOST, DEFAULT_MAX_PAYLOAD_SIZE, DEFAULT_MAX_TEXT_LENGTH,
    DEFAULT_MODEL_PATH, DEFAULT_PORT,
};
use crate::core::engine::DEFAULT_POSITIVE_CLASS_INDEX;
use crate::core::{ArtifactFiles, ConfigProvider};
use crate::utils::error::{Result, SentimentError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub model: ModelSection,
    pub validation: ValidationSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_payload_size: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origins: Vec::new(),
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    pub path: String,
    pub positive_class_index: usize,
    pub files: FilesSection,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
            positive_class_index: DEFAULT_POSITIVE_CLASS_INDEX,
            files: FilesSection::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    pub count_vectorizer: String,
    pub tfidf_transformer: String,
    pub classifier: String,
}

impl Default for FilesSection {
    fn default() -> Self {
        let defaults = ArtifactFiles::default();
        Self {
            count_vectorizer: defaults.count_vectorizer,
            tfidf_transformer: defaults.tfidf_transformer,
            classifier: defaults.classifier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    pub max_text_length: usize,
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub format: LogFormat,
    pub verbose: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SentimentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SentimentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_PATH})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SentimentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用命令列上明確指定的值
    #[cfg(feature = "cli")]
    pub fn apply_cli_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if !cli.cors_allowed_origins.is_empty() {
            self.server.cors_allowed_origins = cli.cors_allowed_origins.clone();
        }
        if let Some(size) = cli.max_payload_size {
            self.server.max_payload_size = size;
        }
        if let Some(path) = &cli.model_path {
            self.model.path = path.clone();
        }
        if let Some(index) = cli.positive_class_index {
            self.model.positive_class_index = index;
        }
        if let Some(max) = cli.max_text_length {
            self.validation.max_text_length = max;
        }
        if let Some(format) = cli.log_format {
            self.logging.format = format;
        }
        if cli.verbose {
            self.logging.verbose = true;
        }
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn model_path(&self) -> &str {
        &self.model.path
    }

    fn artifact_files(&self) -> ArtifactFiles {
        ArtifactFiles {
            count_vectorizer: self.model.files.count_vectorizer.clone(),
            tfidf_transformer: self.model.files.tfidf_transformer.clone(),
            classifier: self.model.files.classifier.clone(),
        }
    }

    fn positive_class_index(&self) -> usize {
        self.model.positive_class_index
    }

    fn max_text_length(&self) -> usize {
        self.validation.max_text_length
    }

    fn cors_allowed_origins(&self) -> &[String] {
        &self.server.cors_allowed_origins
    }

    fn max_payload_size(&self) -> usize {
        self.server.max_payload_size
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
