use crate::config::Config;
use crate::error::QueryError;
use crate::utils::download::{IconFetcher, Summary};
use crate::utils::graphql::fetch_required_items;
use crate::utils::response::format_summary;
use reqwest::Client;
use tracing::warn;

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The task lists no items, nothing was downloaded.
    NoItems,
    Completed(Summary),
}

/// Queries the Kappa task and downloads every required item's icon.
///
/// Query failures abort the run before any download. Per-item failures
/// only show up in the returned [`Summary`].
pub async fn download_kappa_icons(client: &Client, config: &Config) -> Result<RunOutcome, QueryError> {
    let required = fetch_required_items(client, config).await?;

    if required.items.is_empty() {
        warn!("No required items found for task '{}'.", required.task_name);
        return Ok(RunOutcome::NoItems);
    }

    println!(
        "Found {} required items for {}.",
        required.items.len(),
        required.task_name
    );

    let summary = IconFetcher::new(client, config)
        .fetch_all(&required.items)
        .await;

    println!("{}", format_summary(&summary, &config.output_dir));
    Ok(RunOutcome::Completed(summary))
}
