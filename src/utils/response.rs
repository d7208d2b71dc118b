use crate::utils::download::Summary;
use std::path::Path;

pub fn format_summary(summary: &Summary, output_dir: &Path) -> String {
    format!(
        "\n--- Download Summary ---\n\
        Total items to process: {}\n\
        Successfully downloaded: {}\n\
        Already existed (skipped): {}\n\
        Failed to download/save: {}\n\
        Icons are saved in '{}' directory.",
        summary.total,
        summary.downloaded,
        summary.skipped,
        summary.failed,
        output_dir.display()
    )
}
