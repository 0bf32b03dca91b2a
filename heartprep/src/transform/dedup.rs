//! Completeness check and exact-duplicate removal.

use std::collections::HashSet;

use crate::models::{Dataset, Row};

/// Missing cells per column, in header order. Columns with none are omitted.
pub fn missing_by_column(dataset: &Dataset) -> Vec<(String, usize)> {
    let mut counts = vec![0usize; dataset.headers().len()];
    for row in dataset.rows() {
        for (i, value) in row.values().iter().enumerate() {
            if value.is_missing() {
                counts[i] += 1;
            }
        }
    }

    dataset
        .headers()
        .iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .map(|(h, n)| (h.clone(), n))
        .collect()
}

/// Total missing cells in the table.
pub fn count_missing(dataset: &Dataset) -> usize {
    dataset.rows().iter().map(Row::missing_count).sum()
}

/// Drop every row equal in all columns to an earlier row.
///
/// Returns the kept rows in their original order and the number removed.
pub fn drop_duplicates(dataset: Dataset) -> (Dataset, usize) {
    let before = dataset.len();
    let mut seen: HashSet<&Row> = HashSet::with_capacity(before);
    let kept: Vec<Row> = dataset
        .rows()
        .iter()
        .filter(|row| seen.insert(*row))
        .cloned()
        .collect();

    let removed = before - kept.len();
    (dataset.with_rows(kept), removed)
}
