pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;
pub mod translations;

pub use constants::*;
pub use coordinates::{format_lat_lng, parse_coordinate, parse_leading_number};
pub use filename::{display_name, file_extension, generate_default_map_filename};
pub use progress::ProgressReporter;
pub use translations::{tr, MessageKey, Translations};
