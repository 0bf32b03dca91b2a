//! Serialize a [`Dataset`] back to CSV.

use std::fs;
use std::path::Path;

use crate::error::{OutputError, OutputResult};
use crate::models::Dataset;

/// Default file the processed dataset is written to.
pub const OUTPUT_FILE: &str = "heart_failure_dataset_procesado.csv";

/// Render the dataset as comma-separated text with a header row.
pub fn to_csv_string(dataset: &Dataset) -> OutputResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(dataset.headers())?;
    for row in dataset.rows() {
        writer.write_record(row.values().iter().map(|v| v.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Serialize(csv::Error::from(e.into_error())))?;

    // Every field came from a `String`, so this cannot fail
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the dataset to `path`, replacing any existing file.
///
/// The whole document is rendered before the file is touched, so a
/// serialization failure leaves an existing file unchanged.
pub fn write_csv(dataset: &Dataset, path: &Path) -> OutputResult<()> {
    let content = to_csv_string(dataset)?;
    fs::write(path, content).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;

    #[test]
    fn test_header_and_rows() {
        let ds = parse_csv("age,sex\n75,1\n60.667,0\n").unwrap();
        let text = to_csv_string(&ds).unwrap();
        assert_eq!(text, "age,sex\n75,1\n60.667,0\n");
    }

    #[test]
    fn test_quotes_fields_with_commas() {
        let ds = parse_csv("age,name\n40,\"Doe, Jane\"\n").unwrap();
        let text = to_csv_string(&ds).unwrap();
        assert_eq!(text, "age,name\n40,\"Doe, Jane\"\n");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        fs::write(&path, "stale content").unwrap();

        let ds = parse_csv("age\n30\n").unwrap();
        write_csv(&ds, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "age\n30\n");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");

        let ds = parse_csv("age\n30\n").unwrap();
        let err = write_csv(&ds, &path).unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
        assert!(err.to_string().contains("out.csv"));
    }
}
