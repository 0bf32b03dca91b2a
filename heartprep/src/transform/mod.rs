//! Dataset transformer.
//!
//! Cleans a parsed table and derives the age category:
//! - Completeness gate: any missing cell aborts with no output
//! - Dedup: exact duplicate rows dropped, first occurrence kept
//! - Binning: `categoria_edad` appended as the last column
//!
//! [`transform`] performs no I/O beyond log lines. The [`pipeline`]
//! submodule wraps it with download, parsing and file output.

pub mod binning;
pub mod dedup;
pub mod pipeline;

pub use binning::{append_age_category, bucket_counts, categorize_ages};
pub use dedup::{count_missing, drop_duplicates, missing_by_column};
pub use pipeline::*;

use crate::error::PreconditionError;
use crate::logs::{log_info, log_info_indent, log_warning};
use crate::models::{Dataset, ProcessedDataset, AGE_CATEGORY_COLUMN};

/// Validate, deduplicate and categorize a dataset.
///
/// Fails only when the input breaks a precondition: a missing value
/// anywhere in the table, or an existing `categoria_edad` column.
///
/// # Example
/// ```
/// use heartprep::{parse_csv, transform};
///
/// let ds = parse_csv("age,sex\n5,1\n5,1\n45,0\n").unwrap();
/// let out = transform(ds).unwrap();
///
/// assert_eq!(out.duplicates_removed, 1);
/// assert_eq!(out.dataset.headers(), ["age", "sex", "categoria_edad"]);
/// ```
pub fn transform(dataset: Dataset) -> Result<ProcessedDataset, PreconditionError> {
    let total = count_missing(&dataset);
    if total > 0 {
        return Err(PreconditionError::MissingValues {
            total,
            by_column: missing_by_column(&dataset),
        });
    }

    if dataset.column_index(AGE_CATEGORY_COLUMN).is_some() {
        return Err(PreconditionError::ColumnExists(AGE_CATEGORY_COLUMN.to_string()));
    }

    let (deduped, duplicates_removed) = drop_duplicates(dataset);
    if duplicates_removed > 0 {
        log_warning(format!(
            "{} duplicate rows found in the dataset, removed",
            duplicates_removed
        ));
    } else {
        log_info("No duplicate rows in the dataset");
    }

    let dataset = append_age_category(deduped);
    for (bucket, count) in bucket_counts(&categorize_ages(&dataset)) {
        log_info_indent(format!("{}: {}", bucket, count), 1);
    }

    Ok(ProcessedDataset {
        dataset,
        duplicates_removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::LOG_BROADCASTER;
    use crate::models::Value;
    use crate::parser::parse_csv;
    use tokio::sync::broadcast::error::TryRecvError;

    const HEADER: &str = "age,anaemia,creatinine_phosphokinase,diabetes,ejection_fraction,DEATH_EVENT";

    fn csv(rows: &[&str]) -> Dataset {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        parse_csv(&text).unwrap()
    }

    fn categories(ds: &Dataset) -> Vec<String> {
        let idx = ds.column_index(AGE_CATEGORY_COLUMN).unwrap();
        ds.rows().iter().map(|r| r.values()[idx].to_string()).collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let ds = csv(&["5,0,582,0,20,1", "5,0,582,0,20,1", "45,1,7861,0,38,1"]);
        let out = transform(ds).unwrap();

        assert_eq!(out.duplicates_removed, 1);
        assert_eq!(out.dataset.len(), 2);
        assert_eq!(categories(&out.dataset), vec!["Niño", "Adulto"]);
        assert_eq!(out.dataset.rows()[1].get(0), Some(&Value::Integer(45)));
    }

    #[test]
    fn test_missing_value_fails() {
        let ds = csv(&["75,0,582,0,20,1", "55,0,,0,38,0"]);
        let err = transform(ds).unwrap_err();
        assert_eq!(
            err,
            PreconditionError::MissingValues {
                total: 1,
                by_column: vec![("creatinine_phosphokinase".to_string(), 1)],
            }
        );
    }

    #[test]
    fn test_missing_age_fails() {
        let ds = csv(&["NA,0,582,0,20,1"]);
        assert!(matches!(
            transform(ds),
            Err(PreconditionError::MissingValues { total: 1, .. })
        ));
    }

    #[test]
    fn test_lowercase_na_marker_fails() {
        let ds = csv(&["75,0,582,0,20,1", "60,n/a,582,0,20,1"]);
        assert_eq!(
            transform(ds).unwrap_err(),
            PreconditionError::MissingValues {
                total: 1,
                by_column: vec![("anaemia".to_string(), 1)],
            }
        );
    }

    #[test]
    fn test_existing_category_column_fails() {
        let ds = parse_csv("age,categoria_edad\n30,x\n").unwrap();
        assert_eq!(
            transform(ds).unwrap_err(),
            PreconditionError::ColumnExists("categoria_edad".to_string())
        );
    }

    #[test]
    fn test_column_preservation() {
        let ds = csv(&["75,0,582,0,20,1", "65,0,7861,0,38,1"]);
        let input = ds.clone();
        let out = transform(ds).unwrap().dataset;

        let n = input.headers().len();
        assert_eq!(out.headers().len(), n + 1);
        assert_eq!(&out.headers()[..n], input.headers());
        assert_eq!(out.headers()[n], AGE_CATEGORY_COLUMN);
        for (before, after) in input.rows().iter().zip(out.rows()) {
            assert_eq!(&after.values()[..n], before.values());
        }
    }

    #[test]
    fn test_row_count_invariant() {
        let rows = [
            "75,0,582,0,20,1",
            "75,0,582,0,20,1",
            "55,0,7861,0,38,0",
            "75,0,582,0,20,1",
            "65,0,146,0,20,1",
            "55,0,7861,0,38,0",
        ];
        let ds = csv(&rows);
        let out = transform(ds).unwrap();
        assert_eq!(out.duplicates_removed, 3);
        assert_eq!(out.dataset.len(), rows.len() - out.duplicates_removed);
    }

    #[test]
    fn test_boundary_ages() {
        let ds = csv(&[
            "12,0,1,0,1,0",
            "13,0,1,0,1,0",
            "19,0,1,0,1,0",
            "20,0,1,0,1,0",
            "39,0,1,0,1,0",
            "40,0,1,0,1,0",
            "59,0,1,0,1,0",
            "60,0,1,0,1,0",
            "60.667,0,1,0,1,0",
        ]);
        let out = transform(ds).unwrap();
        assert_eq!(
            categories(&out.dataset),
            vec![
                "Niño",
                "Adolescente",
                "Adolescente",
                "Jóvenes adulto",
                "Jóvenes adulto",
                "Adulto",
                "Adulto",
                "Adulto mayor",
                "Adulto mayor",
            ]
        );
    }

    #[test]
    fn test_logs_duplicate_count() {
        let mut rx = LOG_BROADCASTER.subscribe();
        let ds = csv(&["81,0,1,0,1,0", "81,0,1,0,1,0", "81,0,1,0,1,0"]);
        transform(ds).unwrap();

        let mut found = false;
        loop {
            match rx.try_recv() {
                Ok(entry) => {
                    found |= entry.message == "2 duplicate rows found in the dataset, removed";
                }
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        assert!(found);
    }
}
