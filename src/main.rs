use anyhow::{anyhow, Result};
use kappa_icons::error::QueryError;
use kappa_icons::{download_kappa_icons, Config};
use reqwest::Client;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::default();
    let client = Client::new();

    match download_kappa_icons(&client, &config).await {
        Ok(_) => Ok(()),
        Err(QueryError::Api(messages)) => {
            error!("Error fetching data from GraphQL API:");
            for message in &messages {
                error!("- {}", message);
            }
            Err(anyhow!("GraphQL API returned {} error(s)", messages.len()))
        }
        Err(e) => Err(anyhow::Error::new(e).context("Fatal API error")),
    }
}
