use crate::config::Config;
use crate::error::QueryError;
use crate::models::task::{Item, TaskResponse};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

/// Items the task requires, as reported by the API.
#[derive(Debug)]
pub struct RequiredItems {
    pub task_name: String,
    pub items: Vec<Item>,
}

pub fn build_query(task_id: &str) -> String {
    format!(
        r#"query KappaItems {{
            task(id: "{}") {{
                name
                objectives {{
                    ... on TaskObjectiveItem {{
                        id
                        items {{
                            name
                            id
                            gridImageLink
                        }}
                    }}
                }}
            }}
        }}"#,
        task_id
    )
}

pub async fn fetch_task(client: &Client, config: &Config) -> Result<TaskResponse, QueryError> {
    let transport = |source| QueryError::Transport {
        url: config.graphql_url.clone(),
        source,
    };

    let query = json!({ "query": build_query(&config.task_id) });
    let res = client
        .post(&config.graphql_url)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .timeout(config.query_timeout)
        .json(&query)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(transport)?;

    let body = res.text().await.map_err(transport)?;
    debug!("Received {} bytes from {}", body.len(), config.graphql_url);

    serde_json::from_str(&body).map_err(|source| QueryError::Decode {
        url: config.graphql_url.clone(),
        source,
    })
}

/// Runs the task query and flattens every objective's items into one list.
pub async fn fetch_required_items(
    client: &Client,
    config: &Config,
) -> Result<RequiredItems, QueryError> {
    info!("Fetching Kappa item data from {}", config.graphql_url);
    let response = fetch_task(client, config).await?;

    let errors = response.error_messages();
    if !errors.is_empty() {
        return Err(QueryError::Api(errors));
    }

    let task = match response.task() {
        Some(task) if task.has_objectives() => task,
        _ => return Err(QueryError::MissingTask),
    };

    Ok(RequiredItems {
        task_name: task.name.clone().unwrap_or_else(|| config.task_id.clone()),
        items: task.required_items(),
    })
}
