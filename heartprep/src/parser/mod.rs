//! CSV payload decoding and parsing.
//!
//! Turns the raw bytes of a download into a [`Dataset`]: detect the text
//! encoding, decode, then read a comma-separated table with a header row.
//! The schema (an `age` column holding numbers) is checked here once, so
//! the transformer can rely on it.

use crate::error::{CsvError, CsvResult};
use crate::models::{Dataset, Row, SchemaViolation, Value};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed table
    pub dataset: Dataset,
    /// Detected encoding
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => {
            String::from_utf8(bytes.to_vec()).map_err(|e| CsvError::Encoding {
                encoding: encoding.to_string(),
                message: e.to_string(),
            })
        }
        // WHATWG maps latin-1 labels onto windows-1252, a superset
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            Ok(encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned())
        }
        // Unknown label: let encoding_rs resolve it, fall back to lossy UTF-8
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => Ok(enc.decode_without_bom_handling(bytes).0.into_owned()),
            None => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

/// Parse CSV text into a [`Dataset`].
///
/// # Example
/// ```
/// use heartprep::parse_csv;
///
/// let ds = parse_csv("age,sex\n75,1\n55,0\n").unwrap();
///
/// assert_eq!(ds.len(), 2);
/// assert_eq!(ds.headers(), ["age", "sex"]);
/// ```
pub fn parse_csv(content: &str) -> CsvResult<Dataset> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    // Line number of every kept row, for error messages
    let mut lines = Vec::new();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        // Whitespace-only line; a row of empty fields is kept as missing values
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        lines.push(record.position().map(|p| p.line()).unwrap_or(0));
        rows.push(Row(record.iter().map(Value::parse).collect()));
    }

    if rows.is_empty() {
        return Err(CsvError::NoRecords);
    }

    Dataset::new(headers, rows).map_err(|violation| match violation {
        SchemaViolation::BlankHeader(i) => {
            CsvError::InvalidHeader(format!("column {} has no name", i + 1))
        }
        SchemaViolation::DuplicateHeader(name) => {
            CsvError::InvalidHeader(format!("column '{}' appears more than once", name))
        }
        SchemaViolation::MissingColumn(name) => CsvError::MissingColumn(name.to_string()),
        SchemaViolation::RowWidth { row, expected, got } => CsvError::Parse {
            line: lines.get(row).copied().unwrap_or(0),
            message: format!("expected {} fields, found {}", expected, got),
        },
        SchemaViolation::NonNumericAge { row, value } => CsvError::InvalidValue {
            line: lines.get(row).copied().unwrap_or(0),
            column: crate::models::AGE_COLUMN.to_string(),
            value,
        },
    })
}

/// Decode and parse a downloaded payload.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let dataset = parse_csv(&content)?;

    Ok(ParseResult { dataset, encoding })
}
