use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Generate default map filename with format: adna-map-{YYMMDD}.{extension}
pub fn generate_default_map_filename(extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("adna-map-{:02}{:02}{:02}.{}", year, month, day, extension);
    PathBuf::from("output").join(filename)
}

/// Lower-cased extension of a path, empty when there is none
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Name shown in the loaded-files listing
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
