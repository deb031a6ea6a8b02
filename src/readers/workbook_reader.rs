use crate::error::{Result, ViewerError};
use crate::models::{CellValue, Record};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Reads the first sheet of an Excel/ODS workbook; the first row is the header
pub struct WorkbookReader {
    sheet_index: usize,
}

impl WorkbookReader {
    pub fn new() -> Self {
        Self { sheet_index: 0 }
    }

    pub fn with_sheet_index(sheet_index: usize) -> Self {
        Self { sheet_index }
    }

    /// Read all data rows of the configured sheet
    pub fn read_records(&self, path: &Path) -> Result<Vec<Record>> {
        let mut workbook = open_workbook_auto(path)?;

        let range = workbook
            .worksheet_range_at(self.sheet_index)
            .ok_or_else(|| ViewerError::EmptyFile {
                name: path.display().to_string(),
            })??;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Vec::new());
        };

        let columns: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(idx, cell))
            .collect();
        let columns = Arc::new(columns);

        let records: Vec<Record> = rows
            .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
            .filter(|values| values.iter().any(CellValue::is_present))
            .map(|values| Record::new(Arc::clone(&columns), values))
            .collect();

        debug!(
            "Parsed {} workbook rows ({} columns) from sheet {}",
            records.len(),
            columns.len(),
            self.sheet_index
        );

        Ok(records)
    }
}

impl Default for WorkbookReader {
    fn default() -> Self {
        Self::new()
    }
}

fn header_name(idx: usize, cell: &Data) -> String {
    let name = cell.to_string();
    let name = name.trim();
    if name.is_empty() {
        format!("__EMPTY_{}", idx)
    } else {
        name.to_string()
    }
}

/// Map a calamine cell onto the record value model
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_mapping() {
        assert_eq!(cell_value(&Data::Float(51.5)), CellValue::Number(51.5));
        assert_eq!(cell_value(&Data::Int(5000)), CellValue::Number(5000.0));
        assert_eq!(cell_value(&Data::String("  ".to_string())), CellValue::Empty);
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            cell_value(&Data::String("Yamnaya".to_string())),
            CellValue::Text("Yamnaya".to_string())
        );
    }

    #[test]
    fn test_blank_header_gets_placeholder() {
        assert_eq!(header_name(3, &Data::Empty), "__EMPTY_3");
        assert_eq!(header_name(0, &Data::String(" Lat. ".to_string())), "Lat.");
    }

    #[test]
    fn test_missing_workbook_is_error() {
        let reader = WorkbookReader::new();
        assert!(reader.read_records(Path::new("does/not/exist.xlsx")).is_err());
    }
}
