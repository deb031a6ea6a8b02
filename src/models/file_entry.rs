use crate::models::Record;
use serde::Serialize;

/// Numeric age domain (years BP) of a loaded file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeRange {
    pub min: f64,
    pub max: f64,
}

impl AgeRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: f64) -> bool {
        age >= self.min && age <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// One loaded file with its computed age bounds. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub records: Vec<Record>,
    pub age_range: AgeRange,
}

impl FileEntry {
    pub fn new(name: String, records: Vec<Record>, age_range: AgeRange) -> Self {
        Self {
            name,
            records,
            age_range,
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Row shown in the loaded-files listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub index: usize,
    pub name: String,
    pub record_count: usize,
    pub min_age: i64,
    pub max_age: i64,
    pub active: bool,
}

impl FileSummary {
    pub fn from_entry(index: usize, entry: &FileEntry, active: bool) -> Self {
        Self {
            index,
            name: entry.name.clone(),
            record_count: entry.record_count(),
            min_age: entry.age_range.min.round() as i64,
            max_age: entry.age_range.max.round() as i64,
            active,
        }
    }

    /// One listing line, e.g. `aadr.csv: 120 records | 3000-7000 BP`
    pub fn line(&self, records_label: &str) -> String {
        format!(
            "{}{}: {} {} | {}-{} BP",
            if self.active { "* " } else { "  " },
            self.name,
            self.record_count,
            records_label,
            self.min_age,
            self.max_age
        )
    }
}
