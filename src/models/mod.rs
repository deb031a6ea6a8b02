pub mod fields;
pub mod file_entry;
pub mod options;
pub mod record;

pub use fields::{CanonicalFields, LatLng};
pub use file_entry::{AgeRange, FileEntry, FileSummary};
pub use options::{
    DisplayOptions, DisplayOptionsPatch, FilterCriteria, LabelField, Language, PageSize, Theme,
};
pub use record::{CellValue, Record};
