//! Tabular record conversion.
//!
//! Serializes an ordered sequence of records into CSV, JSON or XLSX bytes.
//!
//! ## Formats
//!
//! - **csv**: header row, no index column, missing fields left empty.
//! - **json**: array of objects, every column present, missing fields `null`.
//! - **xlsx**: single worksheet with a bold header row.
//!
//! Columns are the union of all record fields in first-seen order.
//!
//! ## Adding a New Format
//!
//! 1. Implement the `Converter` trait in a new file
//! 2. Add a `Format` variant and route it in `Format::converter`

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::{ConvertError, Result};

mod csv;
mod json;
mod xlsx;

pub use self::csv::Csv;
pub use self::json::Json;
pub use self::xlsx::Xlsx;

/// A single record: field name to scalar value, in insertion order.
pub type Record = Map<String, Value>;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Json,
    Xlsx,
}

impl Format {
    /// All formats, in display order.
    pub const ALL: [Format; 3] = [Format::Csv, Format::Json, Format::Xlsx];

    /// Format tag, also used as the file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }

    /// MIME type of the produced bytes.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Converter implementing this format.
    pub fn converter(&self) -> Box<dyn Converter> {
        match self {
            Self::Csv => Box::new(Csv),
            Self::Json => Box::new(Json),
            Self::Xlsx => Box::new(Xlsx),
        }
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(ConvertError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Record serializer for one output format.
pub trait Converter {
    /// Serialize `records` into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError` if the underlying encoder fails.
    fn convert(&self, records: &[Record]) -> Result<Vec<u8>>;

    /// Format produced by this converter.
    fn format(&self) -> Format;
}

/// Converted bytes tagged with the format that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPayload {
    format: Format,
    data: Vec<u8>,
}

impl ConvertedPayload {
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Convert records using the converter registered for `format_tag`.
///
/// # Errors
///
/// Returns `ConvertError::UnknownFormat` for tags other than
/// `csv`, `json` and `xlsx`; no buffer is produced in that case.
pub fn convert(format_tag: &str, records: &[Record]) -> Result<ConvertedPayload> {
    let format: Format = format_tag.parse()?;
    convert_to(format, records)
}

/// Convert records into an already-parsed format.
pub fn convert_to(format: Format, records: &[Record]) -> Result<ConvertedPayload> {
    let data = format.converter().convert(records)?;
    debug!(
        format = %format,
        records = records.len(),
        bytes = data.len(),
        "converted records"
    );
    Ok(ConvertedPayload { format, data })
}

/// Union of record fields in first-seen order.
pub fn columns(records: &[Record]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                columns.push(key);
            }
        }
    }
    columns
}

/// Parse a JSON array of objects into records.
///
/// # Errors
///
/// Returns `ConvertError::InvalidRecords` if the document is not an array
/// of objects.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(json).map_err(ConvertError::Json)?;
    let Value::Array(items) = value else {
        return Err(ConvertError::InvalidRecords("top-level value is not an array".into()).into());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(ConvertError::InvalidRecords(format!("item {} is not an object", i)).into()),
        })
        .collect()
}

/// Read records from a JSON file.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let contents = std::fs::read_to_string(path)?;
    parse_records(&contents)
}

/// Text form of a cell value. `None` for null.
pub(crate) fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // nested values are written as compact JSON
        nested => Some(nested.to_string()),
    }
}
