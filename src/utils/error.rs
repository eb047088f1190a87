use thiserror::Error;

/// 客戶端看到的通用錯誤訊息，避免洩漏內部細節
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Model directory not found at: {path}")]
    ModelDirectoryNotFound { path: String },

    #[error("Model file not found: {path}")]
    ArtifactNotFound { name: String, path: String },

    #[error("Failed to parse {name} artifact: {source}")]
    ArtifactFormatError {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Model shape mismatch in {name}: {message}")]
    ModelShapeError { name: String, message: String },

    #[error("Inference error: {message}")]
    InferenceError { message: String },

    #[error("Configuration error in field '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Model,
    Config,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

impl SentimentError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::InferenceError {
            message: message.into(),
        }
    }

    pub fn shape(name: &str, message: impl Into<String>) -> Self {
        Self::ModelShapeError {
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Client,
            Self::ModelDirectoryNotFound { .. }
            | Self::ArtifactNotFound { .. }
            | Self::ArtifactFormatError { .. }
            | Self::ModelShapeError { .. } => ErrorCategory::Model,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::InferenceError { .. } | Self::IoError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Client => ErrorSeverity::Low,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Model | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Client
    }

    /// 對應的 HTTP 狀態碼：輸入錯誤為 400，其餘皆為 500
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// 回傳給客戶端的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => message.clone(),
            Self::ModelDirectoryNotFound { path } => {
                format!("Model directory '{}' does not exist", path)
            }
            Self::ArtifactNotFound { name, path } => {
                format!("Model artifact '{}' is missing ({})", name, path)
            }
            Self::ArtifactFormatError { name, .. } => {
                format!("Model artifact '{}' could not be read", name)
            }
            Self::ModelShapeError { name, .. } => {
                format!("Model artifact '{}' does not match the other artifacts", name)
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Configuration value '{}' is invalid", field)
            }
            Self::InferenceError { .. } | Self::IoError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "Send a JSON object with a non-empty 'text' string",
            Self::ModelDirectoryNotFound { .. } => {
                "Set MODEL_PATH (or --model-path) to the directory holding the exported artifacts"
            }
            Self::ArtifactNotFound { .. } => {
                "Export count_vect.json, transformer.json and text_lr.json into the model directory"
            }
            Self::ArtifactFormatError { .. } | Self::ModelShapeError { .. } => {
                "Re-export all three artifacts from the same fitted pipeline"
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file and command-line flags"
            }
            Self::InferenceError { .. } | Self::IoError(_) => "Check the server logs for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, SentimentError>;
