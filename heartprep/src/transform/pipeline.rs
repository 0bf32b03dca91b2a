//! High-level pipeline: download, parse, transform, write.
//!
//! # Example
//!
//! ```rust,ignore
//! use heartprep::{run, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = run("https://example.org/heart.csv", &Settings::default()).await?;
//!     println!("Wrote {} rows", summary.rows_written);
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use serde::Serialize;

use super::transform;
use crate::config::Settings;
use crate::error::PipelineError;
use crate::fetch::fetch_csv;
use crate::logs::{log_info, log_info_indent, log_success};
use crate::models::ProcessedDataset;
use crate::output::write_csv;
use crate::parser::{parse_bytes_auto, ParseResult};

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Rows in the downloaded dataset
    pub rows_read: usize,

    /// Exact duplicates dropped
    pub duplicates_removed: usize,

    /// Rows in the output file
    pub rows_written: usize,

    /// Columns in the output file, `categoria_edad` last
    pub columns: Vec<String>,

    /// Detected payload encoding
    pub encoding: String,

    /// Where the processed CSV was written
    pub output_path: PathBuf,
}

/// Run the whole job for one URL.
///
/// Nothing is written unless every step before the write succeeds.
pub async fn run(url: &str, settings: &Settings) -> Result<RunSummary, PipelineError> {
    log_info("🌐 Downloading dataset...");
    let bytes = fetch_csv(url, settings).await?;

    log_info("📖 Parsing CSV...");
    let parsed = parse_bytes_auto(&bytes)?;
    print_parse_result(&parsed);

    let rows_read = parsed.dataset.len();

    log_info("🧹 Cleaning and categorizing...");
    let processed = transform(parsed.dataset)?;

    log_info("💾 Writing output...");
    write_csv(&processed.dataset, &settings.output_path)?;

    let summary = summarize(rows_read, parsed.encoding, processed, settings);
    log_success(format!(
        "{} rows written ({} duplicates removed)",
        summary.rows_written, summary.duplicates_removed
    ));

    Ok(summary)
}

fn summarize(
    rows_read: usize,
    encoding: String,
    processed: ProcessedDataset,
    settings: &Settings,
) -> RunSummary {
    RunSummary {
        rows_read,
        duplicates_removed: processed.duplicates_removed,
        rows_written: processed.dataset.len(),
        columns: processed.dataset.headers().to_vec(),
        encoding,
        output_path: settings.output_path.clone(),
    }
}

/// Print parse details
fn print_parse_result(parsed: &ParseResult) {
    log_success(format!("Detected encoding: {}", parsed.encoding));
    log_success(format!("Read {} rows", parsed.dataset.len()));
    log_info(format!("📋 CSV has {} columns:", parsed.dataset.headers().len()));
    for (i, col) in parsed.dataset.headers().iter().enumerate() {
        log_info_indent(format!("[{:2}] {}", i + 1, col), 1);
    }
}
