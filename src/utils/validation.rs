use crate::utils::error::{Result, SentimentError};
use serde_json::Value;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// null、false、0、空字串、空陣列與空物件都視為沒有資料
fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// 驗證預測請求內容，回傳去除前後空白的文字
pub fn validate_input(data: Option<&Value>, max_length: usize) -> Result<String> {
    let data = match data {
        Some(data) if !is_empty_payload(data) => data,
        _ => return Err(SentimentError::invalid_input("No input data provided")),
    };

    let object = data
        .as_object()
        .ok_or_else(|| SentimentError::invalid_input("Input must be a JSON object"))?;

    let text = object
        .get("text")
        .ok_or_else(|| SentimentError::invalid_input("Missing 'text' field in input"))?;

    let text = text
        .as_str()
        .ok_or_else(|| SentimentError::invalid_input("Text must be a string"))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(SentimentError::invalid_input("Text cannot be empty"));
    }

    if text.chars().count() > max_length {
        return Err(SentimentError::invalid_input(format!(
            "Text exceeds maximum length of {} characters",
            max_length
        )));
    }

    Ok(text.to_string())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SentimentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SentimentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_origin(field_name: &str, origin: &str) -> Result<()> {
    if origin == "*" {
        return Ok(());
    }

    match Url::parse(origin) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SentimentError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: origin.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SentimentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: origin.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SentimentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SentimentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SentimentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
