use crate::models::fields::{
    AGE_COLUMNS, COUNTRY_COLUMN, CULTURE_COLUMN, GENETIC_ID_COLUMNS, GENETIC_ID_MARKER,
    GROUP_ID_COLUMN, LATITUDE_COLUMNS, LOCALITY_COLUMN, LONGITUDE_COLUMNS, MASTER_ID_COLUMN,
    NOT_AVAILABLE_TEXT, PUBLICATION_COLUMN, SEX_COLUMN, UNKNOWN_TEXT,
};
use crate::models::{CanonicalFields, CellValue, LatLng, Record};
use crate::utils::coordinates::{parse_coordinate, parse_leading_number, validate_coordinates};
use std::borrow::Cow;

/// First present, non-empty value among the candidate columns
pub fn first_present<'a>(record: &'a Record, candidates: &[&str]) -> Option<Cow<'a, str>> {
    candidates.iter().find_map(|name| record.text(name))
}

/// First candidate column that exists in the record header, whatever its value
pub fn first_declared<'c>(record: &Record, candidates: &[&'c str]) -> Option<&'c str> {
    candidates.iter().copied().find(|name| record.has_column(name))
}

/// Whether the record declares both a latitude and a longitude column
pub fn has_coordinate_columns(record: &Record) -> bool {
    first_declared(record, LATITUDE_COLUMNS).is_some()
        && first_declared(record, LONGITUDE_COLUMNS).is_some()
}

/// Columns shown in the fixed part of the popup and info panel
pub fn is_core_column(name: &str) -> bool {
    LATITUDE_COLUMNS.contains(&name)
        || LONGITUDE_COLUMNS.contains(&name)
        || AGE_COLUMNS.contains(&name)
        || name.contains(GENETIC_ID_MARKER)
        || [
            MASTER_ID_COLUMN,
            GROUP_ID_COLUMN,
            LOCALITY_COLUMN,
            PUBLICATION_COLUMN,
        ]
        .contains(&name)
}

fn cell_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Empty => None,
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => parse_leading_number(s),
    }
}

fn first_present_cell<'a>(record: &'a Record, candidates: &[&str]) -> Option<&'a CellValue> {
    candidates
        .iter()
        .filter_map(|name| record.get(name))
        .find(|cell| cell.is_present())
}

/// Age in years BP; absent, unparseable or NaN ages resolve to 0
pub fn resolve_age(record: &Record) -> f64 {
    first_present_cell(record, AGE_COLUMNS)
        .and_then(cell_number)
        .filter(|age| age.is_finite())
        .unwrap_or(0.0)
}

fn resolve_coordinate(record: &Record, candidates: &[&str]) -> Option<f64> {
    let value = match first_present_cell(record, candidates)? {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => parse_coordinate(s).ok()?,
        CellValue::Empty => return None,
    };

    // Zero doubles as the "no coordinate" sentinel in the source tables
    if value == 0.0 || !value.is_finite() {
        None
    } else {
        Some(value)
    }
}

/// Map position, `None` when either coordinate is missing, zero or off the globe
pub fn resolve_position(record: &Record) -> Option<LatLng> {
    let lat = resolve_coordinate(record, LATITUDE_COLUMNS)?;
    let lng = resolve_coordinate(record, LONGITUDE_COLUMNS)?;
    validate_coordinates(lat, lng).ok()?;
    Some(LatLng::new(lat, lng))
}

pub fn resolve_genetic_id(record: &Record) -> String {
    first_present(record, GENETIC_ID_COLUMNS)
        .map(Cow::into_owned)
        .unwrap_or_else(|| UNKNOWN_TEXT.to_string())
}

fn text_or_na(record: &Record, column: &str) -> String {
    record
        .text(column)
        .map(Cow::into_owned)
        .unwrap_or_else(|| NOT_AVAILABLE_TEXT.to_string())
}

/// Resolve the canonical view of a record. Pure: the same record always
/// resolves to the same fields.
pub fn resolve(record: &Record) -> CanonicalFields {
    let extra = record
        .iter()
        .filter(|(name, _)| !is_core_column(name))
        .filter_map(|(name, value)| value.as_text().map(|v| (name.to_string(), v.into_owned())))
        .collect();

    CanonicalFields {
        genetic_id: resolve_genetic_id(record),
        master_id: text_or_na(record, MASTER_ID_COLUMN),
        group_id: text_or_na(record, GROUP_ID_COLUMN),
        locality: text_or_na(record, LOCALITY_COLUMN),
        publication: text_or_na(record, PUBLICATION_COLUMN),
        country: text_or_na(record, COUNTRY_COLUMN),
        culture: text_or_na(record, CULTURE_COLUMN),
        sex: text_or_na(record, SEX_COLUMN),
        age: resolve_age(record),
        position: resolve_position(record),
        extra,
    }
}
