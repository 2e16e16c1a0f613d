//! JSON converter.

use serde_json::Value;

use super::{columns, Converter, Format, Record};
use crate::error::{ConvertError, Result};

/// JSON array of records, each carrying every column.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Converter for Json {
    fn convert(&self, records: &[Record]) -> Result<Vec<u8>> {
        let columns = columns(records);

        let rows: Vec<Record> = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        let value = record.get(*column).cloned().unwrap_or(Value::Null);
                        (column.to_string(), value)
                    })
                    .collect()
            })
            .collect();

        serde_json::to_vec(&rows).map_err(|e| ConvertError::Json(e).into())
    }

    fn format(&self) -> Format {
        Format::Json
    }
}
