use crate::models::{FilterCriteria, Record};
use crate::processors::field_resolver::{resolve, resolve_age};
use rayon::prelude::*;
use tracing::debug;

/// Produces the visible subset of a record set
pub struct FilterEngine {
    search_term: String,
    min_age: f64,
    max_age: f64,
}

impl FilterEngine {
    pub fn new(criteria: &FilterCriteria) -> Self {
        Self {
            search_term: criteria.search_term.to_lowercase(),
            min_age: criteria.min_age,
            max_age: criteria.max_age,
        }
    }

    /// Whether a single record passes both the age and the text filter
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_age(record) && self.matches_search(record)
    }

    fn matches_age(&self, record: &Record) -> bool {
        let age = resolve_age(record);
        age >= self.min_age && age <= self.max_age
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.search_term.is_empty() {
            return true;
        }

        let raw_hit = record
            .iter()
            .filter_map(|(_, value)| value.as_text())
            .any(|text| self.contains_term(&text));

        // Resolved values cover fallbacks such as "Unknown" for a missing id
        raw_hit
            || resolve(record)
                .display_values()
                .iter()
                .any(|text| self.contains_term(text))
    }

    fn contains_term(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.search_term)
    }

    /// Indices of matching records, in original order
    pub fn filter_indices(&self, records: &[Record]) -> Vec<usize> {
        let indices: Vec<usize> = records
            .par_iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(idx, _)| idx)
            .collect();

        debug!(
            "Filter '{}' [{}, {}] kept {}/{} records",
            self.search_term,
            self.min_age,
            self.max_age,
            indices.len(),
            records.len()
        );

        indices
    }
}

/// Matching records, preserving order. Always evaluated against the full set
/// passed in, never against a previous result.
pub fn filter<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    FilterEngine::new(criteria)
        .filter_indices(records)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}
