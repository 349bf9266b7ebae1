pub mod config;
pub mod error;
pub mod state;
pub mod relay;
pub mod routes;
pub mod submission;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::relay::telegram::TelegramNotifier;
use crate::relay::Notifier;
use crate::state::{AppState, SharedState};

/// Build the router with the Telegram relay described by `config`.
pub fn build_app(config: Config) -> Result<Router, reqwest::Error> {
    let notifier = TelegramNotifier::new(&config.telegram)?;
    Ok(build_app_with_notifier(config, Arc::new(notifier)))
}

pub fn build_app_with_notifier(config: Config, notifier: Arc<dyn Notifier>) -> Router {
    let max_body_size = config.max_body_size;

    tracing::info!("Relaying submissions via {}", notifier.id());

    let state: SharedState = Arc::new(AppState { config, notifier });

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    Router::new()
        .merge(routes::relay_routes())
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(layers)
        .with_state(state)
}
