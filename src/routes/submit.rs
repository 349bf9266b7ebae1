use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::relay::RelayOutcome;
use crate::state::SharedState;
use crate::submission::{self, parser, NotificationMessage};

pub async fn submit(
    State(state): State<SharedState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    // Checked before any body error surfaces.
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let body = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        _ => AppError::InvalidInput(rejection.body_text()),
    })?;

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let raw = parser::parse_body(content_type, &body).map_err(AppError::InvalidInput)?;
    let request = submission::validate(&raw).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let message = NotificationMessage::render(&request);

    match state.notifier.send(message.as_str()).await {
        RelayOutcome::Delivered => {
            tracing::debug!("Submission relayed via {}", state.notifier.id());
            Ok(Json(json!({ "success": true })))
        }
        RelayOutcome::Rejected { status, body } => Err(AppError::UpstreamRejected { status, body }),
        RelayOutcome::Transport(msg) => Err(AppError::Transport(msg)),
    }
}
