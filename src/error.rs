use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const RELAY_FAILED: &str = "Failed to send Telegram message";

#[derive(Debug)]
pub enum AppError {
    MethodNotAllowed,
    PayloadTooLarge,
    InvalidInput(String),
    UpstreamRejected { status: u16, body: String },
    Transport(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::PayloadTooLarge => write!(f, "Payload too large"),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::UpstreamRejected { status, body } => {
                write!(f, "Telegram API error ({status}): {body}")
            }
            AppError::Transport(msg) => write!(f, "Transport error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large"),
            AppError::InvalidInput(msg) => {
                tracing::debug!("Rejected submission: {msg}");
                (StatusCode::BAD_REQUEST, "Invalid input")
            }
            AppError::UpstreamRejected { status, body } => {
                tracing::error!("Telegram API error ({status}): {body}");
                (StatusCode::INTERNAL_SERVER_ERROR, RELAY_FAILED)
            }
            AppError::Transport(msg) => {
                tracing::error!("{msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, RELAY_FAILED)
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
