//! Example: authenticating and selecting a client
//!
//! Reads `WHISE_USERNAME` and `WHISE_PASSWORD` (a `.env` file works too),
//! lists the clients the marketplace account can access and switches to the
//! first one.
//!
//! ```bash
//! cargo run -p whise-client --example auth_flow
//! ```

use anyhow::Context;
use whise_client::WhiseClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let whise = WhiseClient::from_env().context("loading Whise configuration")?;

    whise.tokens().acquire_account_token().await?;
    println!("Authentication successful");

    let response = whise.admin().clients(&serde_json::json!({})).await?;
    let clients = response
        .get("clients")
        .or_else(|| response.get("Clients"))
        .and_then(serde_json::Value::as_array)
        .cloned()
        .unwrap_or_default();

    if clients.is_empty() {
        println!("No clients available. Make sure the marketplace account has clients activated.");
        return Ok(());
    }

    println!("Found {} clients:", clients.len());
    for client in &clients {
        println!("- ID: {}, Name: {}", client["id"], client["name"]);
    }

    let first_id = clients[0]["id"].as_u64().context("client id is not a number")?;
    whise.set_client(first_id, None).await?;
    println!("Client {first_id} selected; client endpoints are ready to use.");

    Ok(())
}
