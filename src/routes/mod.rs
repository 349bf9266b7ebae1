pub mod submit;

use axum::routing::{any, get};
use axum::Router;

use crate::state::SharedState;

pub const SUBMIT_PATH: &str = "/api/submit";

pub fn relay_routes() -> Router<SharedState> {
    Router::new()
        // Every method reaches the handler so it can answer 405 itself.
        .route(SUBMIT_PATH, any(submit::submit))
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}
