//! # heartprep - fetch, clean and age-categorize a CSV dataset
//!
//! Downloads the heart failure clinical records CSV (or any CSV with a
//! numeric `age` column), rejects it if any value is missing, drops exact
//! duplicate rows and appends a `categoria_edad` column.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  HTTP GET   │────▶│   Parser    │────▶│  Transform  │────▶│  CSV file   │
//! │  (reqwest)  │     │  (auto-enc) │     │ (dedup+bin) │     │ (overwrite) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use heartprep::{parse_csv, transform};
//!
//! let ds = parse_csv("age,sex\n5,1\n5,1\n45,0\n").unwrap();
//! let out = transform(ds).unwrap();
//! assert_eq!(out.dataset.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types and failure kinds
//! - [`models`] - Dataset, Row, Value, AgeBucket
//! - [`parser`] - Decoding and CSV parsing
//! - [`transform`] - Completeness gate, dedup, binning, pipeline
//! - [`fetch`] - HTTP retrieval
//! - [`output`] - CSV serialization
//! - [`config`] - Runtime settings
//! - [`logs`] - Pipeline logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Driver plumbing
pub mod config;
pub mod fetch;
pub mod logs;
pub mod output;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError, CsvError, FailureKind, FetchError, OutputError, PipelineError,
    PreconditionError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AgeBucket, Dataset, ProcessedDataset, Row, Value, AGE_CATEGORY_COLUMN, AGE_COLUMN,
};

// =============================================================================
// Re-exports - Parsing / Output
// =============================================================================

pub use output::{to_csv_string, write_csv, OUTPUT_FILE};
pub use parser::{decode_content, detect_encoding, parse_bytes_auto, parse_csv, ParseResult};

// =============================================================================
// Re-exports - Transform / Pipeline
// =============================================================================

pub use transform::{count_missing, drop_duplicates, run, transform, RunSummary};

pub use config::Settings;
pub use fetch::fetch_csv;
