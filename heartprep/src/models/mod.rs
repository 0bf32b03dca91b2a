//! Domain models for tabular datasets.
//!
//! - [`Value`] - one cell (missing, number or text)
//! - [`Row`] - ordered cells matching the header
//! - [`Dataset`] - header plus rows, schema checked once at parse time
//! - [`AgeBucket`] - the derived age category
//! - [`ProcessedDataset`] - transformer output

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Name of the numeric column the age category is derived from.
pub const AGE_COLUMN: &str = "age";

/// Name of the derived column appended by the transformer.
pub const AGE_CATEGORY_COLUMN: &str = "categoria_edad";

/// Tokens read as a missing value.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ============================================================================
// Value
// ============================================================================

/// A single cell.
///
/// Integer-looking fields are kept as `i64` so large IDs survive exactly;
/// other numeric fields are `f64`. Numbers compare by value, so `1` and
/// `1.0` are the same cell and `-0.0` equals `0.0`, but an integer only
/// equals a float that converts to it exactly. Missing cells compare
/// equal to each other.
#[derive(Debug, Clone)]
pub enum Value {
    Missing,
    Integer(i64),
    Number(f64),
    Text(String),
}

/// Hash/equality key shared by integers and integral floats.
#[derive(PartialEq, Eq, Hash)]
enum NumericKey {
    Integer(i64),
    Float(u64),
}

impl Value {
    /// Classify a raw CSV field.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_MARKERS.contains(&trimmed) {
            return Value::Missing;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_nan() => Value::Missing,
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn numeric_key(&self) -> Option<NumericKey> {
        match self {
            Value::Integer(i) => Some(NumericKey::Integer(*i)),
            Value::Number(n) => Some(float_key(*n)),
            _ => None,
        }
    }
}

fn float_key(n: f64) -> NumericKey {
    // Exact conversion only: i64::MIN..=i64::MAX as f64 rounds up at the top
    if n.fract() == 0.0 && n >= -9_223_372_036_854_775_808.0 && n < 9_223_372_036_854_775_808.0 {
        NumericKey::Integer(n as i64)
    } else {
        NumericKey::Float(n.to_bits())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Missing, Value::Missing) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => match (self.numeric_key(), other.numeric_key()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Missing => 0u8.hash(state),
            Value::Text(s) => {
                1u8.hash(state);
                s.hash(state);
            }
            Value::Integer(_) | Value::Number(_) => {
                2u8.hash(state);
                self.numeric_key().hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

// ============================================================================
// Row / Dataset
// ============================================================================

/// One record: cells in header order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row(pub Vec<Value>);

impl Row {
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn missing_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_missing()).count()
    }
}

/// An ordered table with a fixed header.
///
/// Construct through [`Dataset::new`], which checks the schema: unique
/// non-empty header names, one cell per column in every row, an `age`
/// column, and only numeric or missing ages.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
    age_index: usize,
}

/// Why a table was rejected by [`Dataset::new`].
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaViolation {
    BlankHeader(usize),
    DuplicateHeader(String),
    MissingColumn(&'static str),
    RowWidth { row: usize, expected: usize, got: usize },
    NonNumericAge { row: usize, value: String },
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Result<Self, SchemaViolation> {
        for (i, h) in headers.iter().enumerate() {
            if h.trim().is_empty() {
                return Err(SchemaViolation::BlankHeader(i));
            }
            if headers[..i].contains(h) {
                return Err(SchemaViolation::DuplicateHeader(h.clone()));
            }
        }

        let age_index = headers
            .iter()
            .position(|h| h == AGE_COLUMN)
            .ok_or(SchemaViolation::MissingColumn(AGE_COLUMN))?;

        for (i, row) in rows.iter().enumerate() {
            if row.0.len() != headers.len() {
                return Err(SchemaViolation::RowWidth {
                    row: i,
                    expected: headers.len(),
                    got: row.0.len(),
                });
            }
            if let Value::Text(s) = &row.0[age_index] {
                return Err(SchemaViolation::NonNumericAge {
                    row: i,
                    value: s.clone(),
                });
            }
        }

        Ok(Self {
            headers,
            rows,
            age_index,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Ages in row order; `None` where the cell is missing.
    pub fn ages(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(|r| r.0[self.age_index].as_f64())
    }

    /// Same header, different rows. Rows come from this dataset, so the
    /// schema still holds.
    pub(crate) fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            headers: self.headers.clone(),
            rows,
            age_index: self.age_index,
        }
    }

    /// Append a column. `values` must have one entry per row.
    pub(crate) fn push_column(&mut self, name: &str, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.0.push(value);
        }
    }
}

// ============================================================================
// AgeBucket
// ============================================================================

/// Age category derived from the numeric `age`.
///
/// Intervals are half-open on the left: `(0,12]`, `(12,19]`, `(19,39]`,
/// `(39,59]`, `(59,+inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "Niño")]
    Child,
    #[serde(rename = "Adolescente")]
    Adolescent,
    #[serde(rename = "Jóvenes adulto")]
    YoungAdult,
    #[serde(rename = "Adulto")]
    Adult,
    #[serde(rename = "Adulto mayor")]
    Elderly,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Child,
        AgeBucket::Adolescent,
        AgeBucket::YoungAdult,
        AgeBucket::Adult,
        AgeBucket::Elderly,
    ];

    /// Bucket for an age.
    ///
    /// Ages at or below zero fall outside the first interval; they are
    /// clamped to [`AgeBucket::Child`] so every row gets a category.
    pub fn from_age(age: f64) -> Self {
        if age <= 12.0 {
            AgeBucket::Child
        } else if age <= 19.0 {
            AgeBucket::Adolescent
        } else if age <= 39.0 {
            AgeBucket::YoungAdult
        } else if age <= 59.0 {
            AgeBucket::Adult
        } else {
            AgeBucket::Elderly
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::Child => "Niño",
            AgeBucket::Adolescent => "Adolescente",
            AgeBucket::YoungAdult => "Jóvenes adulto",
            AgeBucket::Adult => "Adulto",
            AgeBucket::Elderly => "Adulto mayor",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ProcessedDataset
// ============================================================================

/// Transformer output: deduplicated rows plus the `categoria_edad` column.
#[derive(Debug, Clone)]
pub struct ProcessedDataset {
    pub dataset: Dataset,
    pub duplicates_removed: usize,
}
