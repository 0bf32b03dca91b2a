//! Age categorization.

use crate::models::{AgeBucket, Dataset, Value, AGE_CATEGORY_COLUMN};

/// Bucket every row's age. Rows whose age is missing get `None`.
pub fn categorize_ages(dataset: &Dataset) -> Vec<Option<AgeBucket>> {
    dataset.ages().map(|age| age.map(AgeBucket::from_age)).collect()
}

/// Append `categoria_edad` as the last column.
pub fn append_age_category(mut dataset: Dataset) -> Dataset {
    let labels = categorize_ages(&dataset)
        .into_iter()
        .map(|bucket| match bucket {
            Some(b) => Value::Text(b.label().to_string()),
            None => Value::Missing,
        })
        .collect();

    dataset.push_column(AGE_CATEGORY_COLUMN, labels);
    dataset
}

/// Row count per bucket, in bucket order. Empty buckets are omitted.
pub fn bucket_counts(buckets: &[Option<AgeBucket>]) -> Vec<(AgeBucket, usize)> {
    AgeBucket::ALL
        .iter()
        .map(|b| (*b, buckets.iter().filter(|x| **x == Some(*b)).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;

    #[test]
    fn test_appends_last_column() {
        let ds = parse_csv("age,sex\n10,1\n70,0\n").unwrap();
        let out = append_age_category(ds);

        assert_eq!(out.headers(), ["age", "sex", "categoria_edad"]);
        assert_eq!(out.rows()[0].get(2), Some(&Value::Text("Niño".into())));
        assert_eq!(out.rows()[1].get(2), Some(&Value::Text("Adulto mayor".into())));
    }

    #[test]
    fn test_bucket_counts() {
        let buckets = vec![
            Some(AgeBucket::Elderly),
            Some(AgeBucket::Child),
            Some(AgeBucket::Elderly),
            None,
        ];
        assert_eq!(
            bucket_counts(&buckets),
            vec![(AgeBucket::Child, 1), (AgeBucket::Elderly, 2)]
        );
    }
}
