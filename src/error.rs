use std::path::PathBuf;
use thiserror::Error;

/// Failures of the task query. Any of these ends the run before a single
/// icon is fetched.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("could not fetch data from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("GraphQL API returned errors: {}", .0.join("; "))]
    Api(Vec<String>),

    #[error("could not find the task or its objectives in the API response")]
    MissingTask,
}

/// Failures of a single icon download. These are reported and counted,
/// never propagated past the item.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),

    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
