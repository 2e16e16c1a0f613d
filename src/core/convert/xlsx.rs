//! XLSX converter.
//!
//! Writes a single worksheet: bold header row followed by one row per
//! record. Numbers and booleans keep their cell types; nulls and missing
//! fields leave the cell blank.

use rust_xlsxwriter::{Format as CellFormat, Workbook};
use serde_json::Value;

use super::{cell_text, columns, Converter, Format, Record};
use crate::error::{ConvertError, Result};

/// Single-sheet Excel workbook.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xlsx;

impl Converter for Xlsx {
    fn convert(&self, records: &[Record]) -> Result<Vec<u8>> {
        let columns = columns(records);
        let width = u16::try_from(columns.len())
            .map_err(|_| ConvertError::TooManyColumns(columns.len()))?;
        let height = u32::try_from(records.len())
            .map_err(|_| ConvertError::TooManyRows(records.len()))?;

        let mut workbook = Workbook::new();
        let header = CellFormat::new().set_bold();

        let sheet = workbook.add_worksheet();

        for (col, name) in (0..width).zip(&columns) {
            sheet
                .write_string_with_format(0, col, *name, &header)
                .map_err(ConvertError::Xlsx)?;
        }

        for (row, record) in (1..=height).zip(records) {
            for (col, name) in (0..width).zip(&columns) {
                match record.get(*name) {
                    None | Some(Value::Null) => {}
                    Some(Value::Bool(b)) => {
                        sheet.write_boolean(row, col, *b).map_err(ConvertError::Xlsx)?;
                    }
                    Some(Value::Number(n)) => match n.as_f64() {
                        Some(f) => {
                            sheet.write_number(row, col, f).map_err(ConvertError::Xlsx)?;
                        }
                        None => {
                            sheet
                                .write_string(row, col, n.to_string())
                                .map_err(ConvertError::Xlsx)?;
                        }
                    },
                    Some(other) => {
                        let text = cell_text(other).unwrap_or_default();
                        sheet.write_string(row, col, text).map_err(ConvertError::Xlsx)?;
                    }
                }
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| ConvertError::Xlsx(e).into())
    }

    fn format(&self) -> Format {
        Format::Xlsx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::convert::parse_records;

    #[test]
    fn test_xlsx_is_zip_container() {
        let records = parse_records(r#"[{"a": 1, "b": "x"}, {"a": 2.5, "c": false}]"#).unwrap();
        let bytes = Xlsx.convert(&records).unwrap();
        // xlsx is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_xlsx_rejects_columns_past_u16() {
        let mut record = Record::new();
        for i in 0..=usize::from(u16::MAX) {
            record.insert(format!("c{i}"), Value::Null);
        }
        let err = Xlsx.convert(&[record]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Convert(ConvertError::TooManyColumns(65536))
        ));
    }

    #[test]
    fn test_xlsx_empty_records() {
        let bytes = Xlsx.convert(&[]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
