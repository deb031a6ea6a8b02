use thiserror::Error;

pub type Result<T> = std::result::Result<T, ViewerError>;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook parsing error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template rendering error: {0}")]
    Template(#[from] askama::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("File '{name}' contains no data rows")]
    EmptyFile { name: String },

    #[error("File '{name}' must contain Lat./Lat and Long./Long columns")]
    MissingCoordinateColumns { name: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("No file is currently active")]
    NoActiveFile,

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
