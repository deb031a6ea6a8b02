use crate::error::{Result, ViewerError};
use crate::models::Record;
use crate::readers::{CsvRecordReader, WorkbookReader};
use crate::utils::constants::{CSV_EXTENSIONS, WORKBOOK_EXTENSIONS};
use crate::utils::filename::{display_name, file_extension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = file_extension(path);

        if CSV_EXTENSIONS.contains(&extension.as_str()) {
            Ok(SourceFormat::Csv)
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            Ok(SourceFormat::Workbook)
        } else {
            Err(ViewerError::UnsupportedFormat(format!(
                "'{}' (expected .csv, .xlsx or .xls)",
                path.display()
            )))
        }
    }
}

/// Parsed rows of one file, ready to be handed to the session
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub name: String,
    pub records: Vec<Record>,
}

/// Dispatches a file to the matching reader
pub struct RecordLoader;

impl RecordLoader {
    /// Parse a file synchronously
    pub fn load(path: &Path) -> Result<ParsedFile> {
        let format = SourceFormat::from_path(path)?;
        debug!("Reading {} as {:?}", path.display(), format);

        let records = match format {
            SourceFormat::Csv => CsvRecordReader::new().read_records(path)?,
            SourceFormat::Workbook => WorkbookReader::new().read_records(path)?,
        };

        info!("Parsed {} records from {}", records.len(), path.display());

        Ok(ParsedFile {
            name: display_name(path),
            records,
        })
    }

    /// Parse a file on the blocking pool so the caller's task stays responsive
    pub async fn load_async(path: PathBuf) -> Result<ParsedFile> {
        tokio::task::spawn_blocking(move || Self::load(&path)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a.CSV")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a.xlsx")).unwrap(),
            SourceFormat::Workbook
        );
        assert!(SourceFormat::from_path(Path::new("a.txt")).is_err());
    }

    #[tokio::test]
    async fn test_load_async_csv() -> Result<()> {
        let mut temp_file = Builder::new().suffix(".csv").tempfile()?;
        writeln!(temp_file, "Genetic ID,Lat.,Long.")?;
        writeln!(temp_file, "I0001,10,20")?;

        let parsed = RecordLoader::load_async(temp_file.path().to_path_buf()).await?;

        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.name.ends_with(".csv"));

        Ok(())
    }
}
