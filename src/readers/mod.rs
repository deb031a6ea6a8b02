pub mod csv_reader;
pub mod record_loader;
pub mod workbook_reader;

pub use csv_reader::CsvRecordReader;
pub use record_loader::{ParsedFile, RecordLoader, SourceFormat};
pub use workbook_reader::WorkbookReader;
