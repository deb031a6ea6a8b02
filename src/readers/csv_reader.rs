use crate::error::Result;
use crate::models::{CellValue, Record};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Reads comma-separated files whose first row is the header
pub struct CsvRecordReader {
    delimiter: u8,
    skip_blank_rows: bool,
}

impl CsvRecordReader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            skip_blank_rows: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_skip_blank_rows(mut self, skip_blank_rows: bool) -> Self {
        self.skip_blank_rows = skip_blank_rows;
        self
    }

    /// Read all records from a CSV file
    pub fn read_records(&self, path: &Path) -> Result<Vec<Record>> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let text = decode_text(&bytes);
        self.parse_str(&text)
    }

    /// Parse CSV text that has already been decoded
    pub fn parse_str(&self, text: &str) -> Result<Vec<Record>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let columns = Arc::new(columns);

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in csv_reader.records() {
            let row = row?;

            if self.skip_blank_rows && row.iter().all(|field| field.trim().is_empty()) {
                skipped += 1;
                continue;
            }

            let values = row.iter().map(CellValue::from_text).collect();
            records.push(Record::new(Arc::clone(&columns), values));
        }

        debug!(
            "Parsed {} CSV rows ({} columns, {} blank rows skipped)",
            records.len(),
            columns.len(),
            skipped
        );

        Ok(records)
    }
}

impl Default for CsvRecordReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode raw bytes: BOM first, then UTF-8, then Windows-1252 for legacy exports
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text;
    }

    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if !had_errors {
        return text;
    }

    debug!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_header_and_rows() -> Result<()> {
        let reader = CsvRecordReader::new();
        let records = reader.parse_str("Genetic ID,Lat.,Long.\nI0001,10,20\n\nI0002,,\n")?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("Genetic ID").as_deref(), Some("I0001"));
        assert!(records[1].has_column("Lat."));
        assert!(records[1].text("Lat.").is_none());

        Ok(())
    }

    #[test]
    fn test_short_rows_are_padded() -> Result<()> {
        let records = CsvRecordReader::new().parse_str("a,b,c\n1\n")?;

        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0].get("c"), Some(&CellValue::Empty));

        Ok(())
    }

    #[test]
    fn test_read_file_with_bom() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"\xEF\xBB\xBFLat.,Long.,Locality\n")?;
        temp_file.write_all(b"51.5,-0.12,London\n")?;

        let records = CsvRecordReader::new().read_records(temp_file.path())?;

        assert_eq!(records.len(), 1);
        assert!(records[0].has_column("Lat."));
        assert_eq!(records[0].text("Locality").as_deref(), Some("London"));

        Ok(())
    }

    #[test]
    fn test_legacy_encoding_fallback() {
        let text = decode_text(b"Locality\nK\xF6ln\n");
        assert_eq!(text, "Locality\nKöln\n");
    }

    #[test]
    fn test_semicolon_delimiter() -> Result<()> {
        let records = CsvRecordReader::new()
            .with_delimiter(b';')
            .parse_str("Lat;Long\n1,5;2\n")?;

        assert_eq!(records[0].text("Lat").as_deref(), Some("1,5"));

        Ok(())
    }
}
