use crate::config::Config;
use crate::error::DownloadError;
use crate::models::task::Item;
use futures::StreamExt;
use regex::Regex;
use reqwest::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};

pub const DEFAULT_EXTENSION: &str = ".png";
const MAX_EXTENSION_LEN: usize = 5;

/// Running tally of a download pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Terminal state of one item.
#[derive(Debug)]
pub enum ItemOutcome {
    Downloaded(PathBuf),
    Exists(PathBuf),
    Invalid(&'static str),
    Failed(DownloadError),
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemOutcome::Downloaded(path) => write!(f, "downloaded to {}", path.display()),
            ItemOutcome::Exists(path) => write!(f, "already present at {}", path.display()),
            ItemOutcome::Invalid(field) => write!(f, "invalid, bad or missing {}", field),
            ItemOutcome::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}

impl Summary {
    pub fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Downloaded(_) => self.downloaded += 1,
            ItemOutcome::Exists(_) => self.skipped += 1,
            ItemOutcome::Invalid(_) | ItemOutcome::Failed(_) => self.failed += 1,
        }
    }
}

fn extension_regex() -> &'static Regex {
    static EXTENSION: OnceLock<Regex> = OnceLock::new();
    // The dot must follow at least one character, so ".png" alone has no extension.
    EXTENSION.get_or_init(|| Regex::new(r"[^.](\.[^.]+)$").expect("error creating regex"))
}

/// Extension of the last path segment of `link`, including the dot.
/// Falls back to `.png` when there is none or it is implausibly long.
pub fn icon_extension(link: &str) -> &str {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    let segment = path.rsplit('/').next().unwrap_or(path);

    extension_regex()
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|ext| ext.as_str())
        .filter(|ext| ext.chars().count() <= MAX_EXTENSION_LEN)
        .unwrap_or(DEFAULT_EXTENSION)
}

pub fn icon_filename(id: &str, link: &str) -> String {
    format!("{}{}", id, icon_extension(link))
}

fn is_plain_file_name(id: &str) -> bool {
    !id.contains(['/', '\\']) && id != "." && id != ".."
}

/// Downloads icons one at a time into `config.output_dir`.
pub struct IconFetcher<'a> {
    client: &'a Client,
    config: &'a Config,
    dir_ready: bool,
}

impl<'a> IconFetcher<'a> {
    pub fn new(client: &'a Client, config: &'a Config) -> Self {
        Self {
            client,
            config,
            dir_ready: false,
        }
    }

    pub async fn fetch_all(&mut self, items: &[Item]) -> Summary {
        let mut summary = Summary {
            total: items.len(),
            ..Summary::default()
        };

        println!("\n--- Downloading Icons ---");
        for (i, item) in items.iter().enumerate() {
            let progress = format!("[{}/{}]", i + 1, items.len());
            let outcome = self.fetch(item, &progress).await;
            debug!("{} {}", progress, outcome);
            summary.record(&outcome);
        }
        summary
    }

    pub async fn fetch(&mut self, item: &Item, progress: &str) -> ItemOutcome {
        let name = item.display_name();

        let Some(id) = item.id() else {
            warn!("{} Skipping item '{}' - missing item ID.", progress, name);
            return ItemOutcome::Invalid("id");
        };
        if !is_plain_file_name(id) {
            warn!("{} Skipping item '{}' - ID '{}' is not a usable file name.", progress, name, id);
            return ItemOutcome::Invalid("id");
        }
        let Some(link) = item.icon_link() else {
            warn!(
                "{} Skipping item '{}' (ID: {}) - missing gridImageLink.",
                progress, name, id
            );
            return ItemOutcome::Invalid("gridImageLink");
        };

        let filename = icon_filename(id, link);
        let path = self.config.output_dir.join(&filename);

        if let Err(e) = self.ensure_output_dir().await {
            error!("  Error saving icon for '{}' ({}): {}", name, id, e);
            return ItemOutcome::Failed(e);
        }

        if path.exists() {
            println!(
                "{} Icon for '{}' ({}) already exists: {}",
                progress, name, id, filename
            );
            return ItemOutcome::Exists(path);
        }

        println!(
            "{} Downloading icon for '{}' ({}) from {} to {}...",
            progress, name, id, link, filename
        );
        match self.download(link, &path).await {
            Ok(()) => {
                println!("  Successfully downloaded {}", filename);
                ItemOutcome::Downloaded(path)
            }
            Err(e) => {
                error!("  Error downloading icon for '{}' ({}): {}", name, id, e);
                ItemOutcome::Failed(e)
            }
        }
    }

    async fn ensure_output_dir(&mut self) -> Result<(), DownloadError> {
        if self.dir_ready {
            return Ok(());
        }

        let dir = &self.config.output_dir;
        if !dir.is_dir() {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| DownloadError::Io {
                    path: dir.clone(),
                    source,
                })?;
            println!("Created directory: {}", dir.display());
        }
        self.dir_ready = true;
        Ok(())
    }

    async fn download(&self, link: &str, path: &Path) -> Result<(), DownloadError> {
        let response = self
            .client
            .get(link)
            .timeout(self.config.download_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status()));
        }

        let result = write_body(response, path).await;
        if result.is_err() {
            // A leftover file would be taken for a finished download next run.
            if let Err(e) = fs::remove_file(path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("  Could not remove partial file {}: {}", path.display(), e);
                }
            }
        }
        result
    }
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<(), DownloadError> {
    let io_error = |source| DownloadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(path).await.map_err(io_error)?;
    let mut stream = response.bytes_stream();

    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(io_error)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_error)?;

    debug!("Wrote {} bytes to {}", written, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_short_extensions() {
        assert_eq!(
            icon_filename("abc", "https://assets.tarkov.dev/abc-grid-image.webp"),
            "abc.webp"
        );
        assert_eq!(icon_filename("abc", "https://example.com/x/abc.jpg"), "abc.jpg");
    }

    #[test]
    fn falls_back_to_png() {
        assert_eq!(icon_filename("abc", "https://example.com/icons/abc"), "abc.png");
        assert_eq!(icon_filename("abc", "https://example.com/icons/abc.jpeg2000"), "abc.png");
        assert_eq!(icon_filename("abc", "https://example.com/icons/"), "abc.png");
        assert_eq!(icon_filename("abc", "https://example.com/icons/.hidden"), "abc.png");
        assert_eq!(icon_filename("abc", "https://example.com/icons/abc."), "abc.png");
    }

    #[test]
    fn extension_ignores_query_and_host() {
        assert_eq!(icon_extension("https://example.com/abc.gif?v=2"), ".gif");
        assert_eq!(icon_extension("https://assets.tarkov.dev/icon#frag"), ".png");
    }

    #[test]
    fn five_characters_is_the_limit() {
        assert_eq!(icon_extension("https://example.com/a.webp"), ".webp");
        assert_eq!(icon_extension("https://example.com/a.abcd"), ".abcd");
        assert_eq!(icon_extension("https://example.com/a.abcde"), ".png");
    }

    #[test]
    fn extension_length_counts_characters() {
        assert_eq!(icon_extension("https://example.com/a.ñaña"), ".ñaña");
        assert_eq!(icon_extension("https://example.com/a.ñañañ"), ".png");
    }

    #[test]
    fn outcome_describes_its_state() {
        assert_eq!(
            ItemOutcome::Invalid("gridImageLink").to_string(),
            "invalid, bad or missing gridImageLink"
        );
        assert_eq!(
            ItemOutcome::Exists(PathBuf::from("abc.png")).to_string(),
            "already present at abc.png"
        );
        assert_eq!(
            ItemOutcome::Failed(DownloadError::Status(reqwest::StatusCode::NOT_FOUND)).to_string(),
            "failed: server responded with 404 Not Found"
        );
    }

    #[test]
    fn rejects_path_like_ids() {
        assert!(is_plain_file_name("5c51aac186f77432ea65c552"));
        assert!(!is_plain_file_name("../etc"));
        assert!(!is_plain_file_name("a\\b"));
        assert!(!is_plain_file_name(".."));
    }

    #[test]
    fn summary_counts_terminal_states() {
        let mut summary = Summary::default();
        summary.record(&ItemOutcome::Downloaded(PathBuf::from("a.png")));
        summary.record(&ItemOutcome::Exists(PathBuf::from("a.png")));
        summary.record(&ItemOutcome::Invalid("gridImageLink"));
        summary.record(&ItemOutcome::Failed(DownloadError::Status(
            reqwest::StatusCode::NOT_FOUND,
        )));

        assert_eq!(
            summary,
            Summary {
                total: 0,
                downloaded: 1,
                skipped: 1,
                failed: 2,
            }
        );
    }
}
