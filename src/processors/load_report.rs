use crate::models::fields::{AGE_COLUMNS, GENETIC_ID_COLUMNS, LATITUDE_COLUMNS, LONGITUDE_COLUMNS};
use crate::models::{AgeRange, Record};
use crate::processors::age_range::AgeRangeCalculator;
use crate::processors::field_resolver::{first_declared, resolve_age, resolve_position};

/// What a freshly parsed file looks like before it is committed to a session
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub file_name: String,
    pub total_records: usize,
    pub mappable_records: usize,
    pub unknown_age_records: usize,
    pub age_range: AgeRange,
    pub latitude_column: Option<String>,
    pub longitude_column: Option<String>,
    pub age_column: Option<String>,
    pub genetic_id_column: Option<String>,
}

impl LoadReport {
    pub fn has_coordinate_columns(&self) -> bool {
        self.latitude_column.is_some() && self.longitude_column.is_some()
    }

    pub fn unmappable_records(&self) -> usize {
        self.total_records - self.mappable_records
    }
}

pub struct LoadReporter {
    calculator: AgeRangeCalculator,
}

impl LoadReporter {
    pub fn new() -> Self {
        Self {
            calculator: AgeRangeCalculator::new(),
        }
    }

    pub fn with_calculator(calculator: AgeRangeCalculator) -> Self {
        Self { calculator }
    }

    /// Inspect a record set. Column variants are taken from the first record.
    pub fn inspect(&self, file_name: &str, records: &[Record]) -> LoadReport {
        let first = records.first();
        let declared = |candidates: &[&str]| -> Option<String> {
            first
                .and_then(|r| first_declared(r, candidates))
                .map(str::to_string)
        };

        LoadReport {
            file_name: file_name.to_string(),
            total_records: records.len(),
            mappable_records: records
                .iter()
                .filter(|r| resolve_position(r).is_some())
                .count(),
            unknown_age_records: records.iter().filter(|r| resolve_age(r) <= 0.0).count(),
            age_range: self.calculator.compute_range(records),
            latitude_column: declared(LATITUDE_COLUMNS),
            longitude_column: declared(LONGITUDE_COLUMNS),
            age_column: declared(AGE_COLUMNS),
            genetic_id_column: declared(GENETIC_ID_COLUMNS),
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &LoadReport) -> String {
        let pct = |n: usize| {
            if report.total_records == 0 {
                0.0
            } else {
                100.0 * n as f64 / report.total_records as f64
            }
        };
        let column = |c: &Option<String>| c.clone().unwrap_or_else(|| "(missing)".to_string());

        let mut summary = String::new();

        summary.push_str(&format!("=== Load Report: {} ===\n", report.file_name));
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Mappable Records: {} ({:.1}%)\n",
            report.mappable_records,
            pct(report.mappable_records)
        ));
        summary.push_str(&format!(
            "Unmappable Records: {} ({:.1}%)\n",
            report.unmappable_records(),
            pct(report.unmappable_records())
        ));
        summary.push_str(&format!(
            "Unknown Age Records: {} ({:.1}%)\n",
            report.unknown_age_records,
            pct(report.unknown_age_records)
        ));
        summary.push_str(&format!(
            "Age Range: {}-{} BP\n",
            report.age_range.min.round() as i64,
            report.age_range.max.round() as i64
        ));
        summary.push_str("\nResolved Columns:\n");
        summary.push_str(&format!("  Latitude:   {}\n", column(&report.latitude_column)));
        summary.push_str(&format!("  Longitude:  {}\n", column(&report.longitude_column)));
        summary.push_str(&format!("  Age:        {}\n", column(&report.age_column)));
        summary.push_str(&format!("  Genetic ID: {}\n", column(&report.genetic_id_column)));

        summary
    }
}

impl Default for LoadReporter {
    fn default() -> Self {
        Self::new()
    }
}
