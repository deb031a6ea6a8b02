pub mod age_range;
pub mod color_mapper;
pub mod field_resolver;
pub mod filter_engine;
pub mod info_panel;
pub mod load_report;

pub use age_range::{compute_range, AgeRangeCalculator};
pub use color_mapper::{color_for, ColorMapper, ColorToken, LegendEntry};
pub use field_resolver::resolve;
pub use filter_engine::{filter, FilterEngine};
pub use info_panel::{IndividualInfo, InfoRow, PopupContent};
pub use load_report::{LoadReport, LoadReporter};
