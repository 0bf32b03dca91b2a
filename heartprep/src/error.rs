//! Error types for the heartprep pipeline.
//!
//! One enum per layer, composed into [`PipelineError`] through `From`
//! so `?` works across layer boundaries:
//!
//! - [`CsvError`] - decoding and CSV parsing
//! - [`FetchError`] - HTTP retrieval
//! - [`PreconditionError`] - the transformer's completeness gate
//! - [`OutputError`] - writing the processed CSV
//! - [`ConfigError`] - runtime settings
//! - [`PipelineError`] - top-level orchestration
//!
//! The driver only cares about the coarse [`FailureKind`] of an error.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors while decoding or parsing the downloaded CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Payload had no content at all.
    #[error("CSV payload is empty")]
    EmptyFile,

    /// Header row present but no data rows.
    #[error("CSV has a header but no data rows")]
    NoRecords,

    /// Bytes could not be decoded to text.
    #[error("Failed to decode content as {encoding}: {message}")]
    Encoding { encoding: String, message: String },

    /// Malformed CSV structure.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Header row is unusable (blank or repeated names).
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A column the schema requires is absent.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A value does not fit its column type.
    #[error("Line {line}, column '{column}' (value '{value}'): expected a number")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Retrieval Errors
// =============================================================================

/// Errors while downloading the dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Connection, TLS or body read failure.
    #[error("Request to {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("HTTP {status} for url {url}")]
    Status { status: u16, url: String },

    /// Request exceeded the configured timeout.
    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

// =============================================================================
// Transformer Errors
// =============================================================================

/// The transformer's input did not satisfy its preconditions.
///
/// Raised before any row is touched; no partial output exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// At least one cell is missing.
    #[error("the dataset has {total} missing values ({})", MissingSummary(.by_column))]
    MissingValues {
        total: usize,
        by_column: Vec<(String, usize)>,
    },

    /// The derived column would shadow an input column.
    #[error("column '{0}' already exists in the dataset")]
    ColumnExists(String),
}

struct MissingSummary<'a>(&'a [(String, usize)]);

impl fmt::Display for MissingSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (column, count)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", column, count)?;
        }
        Ok(())
    }
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing the processed CSV.
#[derive(Debug, Error)]
pub enum OutputError {
    /// CSV serialization failed.
    #[error("Failed to serialize CSV: {0}")]
    Serialize(#[from] csv::Error),

    /// Writing the file failed.
    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid runtime settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {message}")]
    InvalidVar {
        var: &'static str,
        value: String,
        message: String,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Retrieval error: {0}")]
    Fetch(#[from] FetchError),

    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Closed set of failure categories the driver reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network or HTTP layer.
    Retrieval,
    /// Payload parsed to a table with no data.
    EmptyDataset,
    /// Input had missing values.
    Precondition,
    /// Anything else.
    Unknown,
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PipelineError::Fetch(_) => FailureKind::Retrieval,
            PipelineError::Csv(CsvError::EmptyFile | CsvError::NoRecords) => {
                FailureKind::EmptyDataset
            }
            PipelineError::Precondition(_) => FailureKind::Precondition,
            PipelineError::Csv(_) | PipelineError::Output(_) | PipelineError::Config(_) => {
                FailureKind::Unknown
            }
        }
    }

    /// Human-readable message for the given failure category.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Fetch(e) => format!("HTTP request error: {}", e),
            PipelineError::Precondition(e) => format!("Precondition failed: {}", e),
            _ if self.kind() == FailureKind::EmptyDataset => {
                "Error: the dataset is empty.".to_string()
            }
            other => format!("Unknown error: {}", other),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for retrieval operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
