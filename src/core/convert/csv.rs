//! CSV converter.

use super::{cell_text, columns, Converter, Format, Record};
use crate::error::{ConvertError, Result};

/// CSV with a header row and no index column.
#[derive(Debug, Clone, Copy, Default)]
pub struct Csv;

impl Converter for Csv {
    fn convert(&self, records: &[Record]) -> Result<Vec<u8>> {
        let columns = columns(records);
        // records without fields have nothing to tabulate
        if columns.is_empty() {
            return Ok(Vec::new());
        }

        let mut writer = ::csv::Writer::from_writer(Vec::new());
        writer.write_record(&columns).map_err(ConvertError::Csv)?;

        for record in records {
            let row: Vec<String> = columns
                .iter()
                .map(|column| record.get(*column).and_then(cell_text).unwrap_or_default())
                .collect();
            writer.write_record(&row).map_err(ConvertError::Csv)?;
        }

        writer
            .into_inner()
            .map_err(|e| ConvertError::Csv(e.into_error().into()).into())
    }

    fn format(&self) -> Format {
        Format::Csv
    }
}
