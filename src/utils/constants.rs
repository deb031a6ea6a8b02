/// Default age domain (years BP) when a file has no positive ages
pub const DEFAULT_MIN_AGE: f64 = 0.0;
pub const DEFAULT_MAX_AGE: f64 = 100_000.0;

/// Age color palette, green (young) to red (old)
pub const AGE_PALETTE: [&str; 6] = [
    "#1a9850", "#91cf60", "#d9ef8b", "#fee08b", "#fc8d59", "#d73027",
];

/// Marker color for records without a positive age
pub const UNKNOWN_AGE_COLOR: &str = "#808080";

/// Number of palette buckets used by default; the last palette entry stays unused
pub const DEFAULT_COLOR_DIVISIONS: usize = 5;

/// Supported input extensions
pub const CSV_EXTENSIONS: &[&str] = &["csv"];
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Map defaults
pub const DEFAULT_MAP_CENTER: (f64, f64) = (30.0, 20.0);
pub const DEFAULT_MAP_ZOOM: u8 = 2;
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Environment prefix for settings overrides
pub const ENV_PREFIX: &str = "ADNA_VIEWER";

/// Reader defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
