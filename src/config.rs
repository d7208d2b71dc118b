use std::path::PathBuf;
use std::time::Duration;

pub const GRAPHQL_URL: &str = "https://api.tarkov.dev/graphql";

/// The Collector, whose objectives list every Kappa item.
pub const KAPPA_TASK_ID: &str = "5c51aac186f77432ea65c552";

pub const OUTPUT_DIR: &str = "kappa_items";

/// Everything the pipeline needs to know about where to read and write.
#[derive(Debug, Clone)]
pub struct Config {
    pub graphql_url: String,
    pub task_id: String,
    pub output_dir: PathBuf,
    pub query_timeout: Duration,
    pub download_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_url: GRAPHQL_URL.to_string(),
            task_id: KAPPA_TASK_ID.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            query_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(10),
        }
    }
}
