//! HTTP endpoint that feeds webhook deliveries into a [`WebhookDispatcher`].

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tracing::{error, info};

use super::dispatcher::WebhookDispatcher;

/// Router accepting webhook batches on `POST /`.
///
/// Answers `200 OK` once the batch is dispatched and `400 Invalid webhook
/// payload` when the body is not JSON or lacks an `events` array. Nest it
/// under whatever path the webhook is registered with.
pub fn router(dispatcher: Arc<WebhookDispatcher>) -> Router {
    Router::new().route("/", post(handle_webhook)).with_state(dispatcher)
}

async fn handle_webhook(
    State(dispatcher): State<Arc<WebhookDispatcher>>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let processed = serde_json::from_slice::<Value>(&body)
        .map_err(|err| err.to_string())
        .and_then(|payload| dispatcher.process(&payload).map_err(|err| err.to_string()));

    match processed {
        Ok(events) => {
            info!(count = events.len(), "webhook delivery accepted");
            (StatusCode::OK, "OK")
        }
        Err(err) => {
            error!(error = %err, "webhook processing error");
            (StatusCode::BAD_REQUEST, "Invalid webhook payload")
        }
    }
}
