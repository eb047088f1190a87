use crate::core::{ConfigProvider, Predictor};
use crate::domain::model::PredictResponse;
use crate::utils::error::{Result, SentimentError, INTERNAL_ERROR_MESSAGE};
use crate::utils::validation::validate_input;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{self, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const INDEX_HTML: &str = include_str!("../static/index.html");

pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    pub max_text_length: usize,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>, max_text_length: usize) -> Self {
        Self {
            predictor,
            max_text_length,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub cors_allowed_origins: Vec<String>,
    pub max_payload_size: usize,
}

impl ServerOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            cors_allowed_origins: config.cors_allowed_origins().to_vec(),
            max_payload_size: config.max_payload_size(),
        }
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            cors_allowed_origins: Vec::new(),
            max_payload_size: 1024 * 1024,
        }
    }
}

impl IntoResponse for SentimentError {
    fn into_response(self) -> Response {
        tracing::error!("Error occurred: {}", self);

        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if self.is_client_error() {
            self.user_friendly_message()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "healthy" }))).into_response()
}

/// Empty bodies are treated as "no input"; anything else must be valid JSON.
fn parse_payload(body: &[u8]) -> Result<Option<Value>> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| SentimentError::invalid_input(format!("Invalid JSON payload: {}", e)))
}

async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> std::result::Result<Json<PredictResponse>, SentimentError> {
    let payload = parse_payload(&body)?;
    let text = validate_input(payload.as_ref(), state.max_text_length)?;

    let prediction = state.predictor.predict(&text).await?;
    Ok(Json(prediction.into()))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    use tower_http::cors::Any;

    let cors = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
            .allow_headers([http::header::CONTENT_TYPE])
    };

    cors.max_age(Duration::from_secs(3600))
}

pub fn build_app(state: Arc<AppState>, options: &ServerOptions) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(options.max_payload_size))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&options.cors_allowed_origins))
        .with_state(state)
}

/// Serves `app` on an already bound listener until Ctrl+C / SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub async fn startup<C: ConfigProvider>(config: &C, predictor: Arc<dyn Predictor>) -> Result<()> {
    let state = Arc::new(AppState::new(predictor, config.max_text_length()));
    let app = build_app(state, &ServerOptions::from_config(config));

    let bind_addr = format!("{}:{}", config.host(), config.port());
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Sentiment API listening on {}", listener.local_addr()?);

    serve(listener, app).await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload() {
        assert!(parse_payload(b"").unwrap().is_none());
        assert!(parse_payload(b"  \n").unwrap().is_none());
        assert_eq!(
            parse_payload(br#"{"text": "hi"}"#).unwrap(),
            Some(json!({"text": "hi"}))
        );

        let err = parse_payload(b"{text").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_internal_errors_use_generic_message() {
        let response = SentimentError::inference("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = SentimentError::invalid_input("Text cannot be empty").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
