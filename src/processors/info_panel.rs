use crate::models::fields::{
    AGE_COLUMNS, GROUP_ID_COLUMN, LOCALITY_COLUMN, MASTER_ID_COLUMN, NOT_AVAILABLE_TEXT,
    PUBLICATION_COLUMN,
};
use crate::models::record::format_number;
use crate::models::{CanonicalFields, Language, Record};
use crate::processors::field_resolver::{first_present, is_core_column, resolve_genetic_id};
use crate::utils::translations::{tr, MessageKey};
use serde::Serialize;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoRow {
    pub label: String,
    pub value: String,
}

impl InfoRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Summary attached to a map marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupContent {
    pub title: String,
    pub rows: Vec<InfoRow>,
}

impl PopupContent {
    pub fn from_fields(fields: &CanonicalFields, language: Language) -> Self {
        let age = if fields.age != 0.0 {
            format_number(fields.age)
        } else {
            NOT_AVAILABLE_TEXT.to_string()
        };

        Self {
            title: fields.genetic_id.clone(),
            rows: vec![
                InfoRow::new(tr(language, MessageKey::MasterId), &fields.master_id),
                InfoRow::new(tr(language, MessageKey::GroupId), &fields.group_id),
                InfoRow::new(tr(language, MessageKey::Locality), &fields.locality),
                InfoRow::new(tr(language, MessageKey::Age), age),
                InfoRow::new(tr(language, MessageKey::Publication), &fields.publication),
            ],
        }
    }
}

/// Full field set of a selected record, as shown in the Individual Info panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndividualInfo {
    pub heading: String,
    pub rows: Vec<InfoRow>,
}

impl IndividualInfo {
    /// Six canonical rows, then every other non-empty column in source order
    pub fn from_record(record: &Record, language: Language) -> Self {
        let text_or_na = |column: &str| -> String {
            record
                .text(column)
                .map(Cow::into_owned)
                .unwrap_or_else(|| NOT_AVAILABLE_TEXT.to_string())
        };

        let age = first_present(record, AGE_COLUMNS)
            .map(Cow::into_owned)
            .unwrap_or_else(|| NOT_AVAILABLE_TEXT.to_string());

        let mut rows = vec![
            InfoRow::new(
                tr(language, MessageKey::GeneticId),
                resolve_genetic_id(record),
            ),
            InfoRow::new(tr(language, MessageKey::MasterId), text_or_na(MASTER_ID_COLUMN)),
            InfoRow::new(tr(language, MessageKey::GroupId), text_or_na(GROUP_ID_COLUMN)),
            InfoRow::new(tr(language, MessageKey::Locality), text_or_na(LOCALITY_COLUMN)),
            InfoRow::new(tr(language, MessageKey::Age), age),
            InfoRow::new(
                tr(language, MessageKey::Publication),
                text_or_na(PUBLICATION_COLUMN),
            ),
        ];

        rows.extend(
            record
                .iter()
                .filter(|(name, _)| !is_core_column(name))
                .filter_map(|(name, value)| value.as_text().map(|v| InfoRow::new(name, v))),
        );

        Self {
            heading: tr(language, MessageKey::InfoTitle).to_string(),
            rows,
        }
    }

    /// Plain-text rendering, one `label: value` per line
    pub fn to_text(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0)
            .min(40);

        let mut text = format!("=== {} ===\n", self.heading);
        for row in &self.rows {
            text.push_str(&format!("{:<width$}  {}\n", row.label, row.value, width = width));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use crate::processors::field_resolver::resolve;
    use pretty_assertions::assert_eq;

    fn sample() -> Record {
        Record::from_pairs([
            ("Genetic ID", CellValue::from_text("I0001")),
            ("Lat.", CellValue::Number(10.0)),
            ("Long.", CellValue::Number(20.0)),
            ("Country", CellValue::from_text("Russia")),
            (AGE_COLUMNS[0], CellValue::from_text("5000")),
            ("Culture", CellValue::Empty),
            ("Sex", CellValue::from_text("M")),
        ])
    }

    #[test]
    fn test_popup_rows() {
        let popup = PopupContent::from_fields(&resolve(&sample()), Language::En);

        assert_eq!(popup.title, "I0001");
        assert_eq!(popup.rows[3], InfoRow::new("Age (BP)", "5000"));
        assert_eq!(popup.rows[0], InfoRow::new("Master ID", "N/A"));
    }

    #[test]
    fn test_popup_unknown_age() {
        let record = Record::from_pairs([("Lat.", "1")]);
        let popup = PopupContent::from_fields(&resolve(&record), Language::Zh);

        assert_eq!(popup.title, "Unknown");
        assert_eq!(popup.rows[3], InfoRow::new("年代 (BP)", "N/A"));
    }

    #[test]
    fn test_individual_info_extra_columns() {
        let info = IndividualInfo::from_record(&sample(), Language::En);
        let labels: Vec<&str> = info.rows.iter().map(|r| r.label.as_str()).collect();

        assert_eq!(
            labels,
            [
                "Genetic ID",
                "Master ID",
                "Group ID",
                "Locality",
                "Age (BP)",
                "Publication",
                "Country",
                "Sex"
            ]
        );
        assert!(info.to_text().contains("Russia"));
    }
}
