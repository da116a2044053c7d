//! Example: receiving Whise webhooks
//!
//! Serves the webhook endpoint on `POST /webhooks/whise` and logs incoming
//! events. The port comes from `PORT` (default 3000).
//!
//! ```bash
//! cargo run -p whise-client --example webhook_server
//! curl -X POST localhost:3000/webhooks/whise \
//!      -H 'content-type: application/json' \
//!      -d '{"events":[{"name":"estate_update","objectId":42}],"clientId":7}'
//! ```

use std::sync::Arc;

use axum::Router;
use tracing::info;
use whise_client::{webhook, WebhookDispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    dotenvy::dotenv().ok();

    let dispatcher = Arc::new(WebhookDispatcher::new());

    dispatcher.on_all(|event| {
        info!(name = %event.name, object_id = ?event.object_id(), "received event");
    });
    dispatcher.on("estate_update", |event| {
        info!(estate = ?event.object_id(), client = ?event.client_id, "estate updated");
    });
    dispatcher.on("contact_created", |event| {
        info!(contact = ?event.object_id(), "contact created");
    });

    let app = Router::new().nest("/webhooks/whise", webhook::router(dispatcher));

    let port = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()).unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "webhook server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
