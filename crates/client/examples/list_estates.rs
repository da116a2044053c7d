//! Example: listing estates and walking a project
//!
//! Requires `WHISE_USERNAME`, `WHISE_PASSWORD` and `WHISE_CLIENT_ID`;
//! `WHISE_OFFICE_ID` is optional.
//!
//! ```bash
//! cargo run -p whise-client --example list_estates
//! ```

use anyhow::Context;
use serde_json::{json, Value};
use whise_client::WhiseClient;
use whise_domain::{EstateKind, EstateQuery};

fn estates(response: &Value) -> &[Value] {
    response["estates"].as_array().map(Vec::as_slice).unwrap_or_default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenvy::dotenv().ok();

    let client_id: u64 = std::env::var("WHISE_CLIENT_ID")
        .context("WHISE_CLIENT_ID is not set")?
        .parse()
        .context("WHISE_CLIENT_ID must be a number")?;
    let office_id = std::env::var("WHISE_OFFICE_ID").ok().and_then(|v| v.parse().ok());

    let whise = WhiseClient::from_env()?;
    whise.set_client(client_id, office_id).await?;

    let query = EstateQuery::new()
        .page(10, 0)
        .filter("ShowDetails", true)
        .filter("ShowRepresentatives", true);
    let response = whise.estates().list(&query).await?;
    println!("Found {} estates", response["totalCount"]);

    for estate in estates(&response) {
        println!(
            "- ID: {}, Name: {}, Type: {}",
            estate["id"],
            estate["name"].as_str().unwrap_or("N/A"),
            EstateKind::identify(estate)
        );
    }

    let projects = whise.estates().projects(EstateQuery::new().page(5, 0)).await?;
    if let Some(project_id) = estates(&projects).first().and_then(|p| p["id"].as_u64()) {
        let units = whise.estates().project_with_units(project_id, EstateQuery::new()).await?;
        println!("\nUnits of project {project_id}:");
        for unit in estates(&units).iter().filter(|e| EstateKind::identify(e) == EstateKind::Unit)
        {
            println!("- ID: {}, Name: {}", unit["id"], unit["name"].as_str().unwrap_or("N/A"));
        }
    }

    let cities = whise.estates().used_cities(&json!({})).await?;
    if let Some(cities) = cities["cities"].as_array() {
        println!("\nUsed cities ({}):", cities.len());
        for city in cities.iter().take(5) {
            println!("- {} ({})", city["name"], city["zip"]);
        }
    }

    Ok(())
}
