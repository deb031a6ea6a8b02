use crate::error::{Result, ViewerError};
use crate::models::AgeRange;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Search text plus inclusive age interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub min_age: f64,
    pub max_age: f64,
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, min_age: f64, max_age: f64) -> Self {
        Self {
            search_term: search_term.into(),
            min_age,
            max_age,
        }
    }

    /// Empty search over a file's range. The lower bound never sits above
    /// zero, so unknown ages stay visible.
    pub fn for_range(range: AgeRange) -> Self {
        Self::new("", range.min.min(0.0), range.max)
    }

    pub fn with_search(mut self, search_term: impl Into<String>) -> Self {
        self.search_term = search_term.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }
}

impl FromStr for Language {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "zh" | "chinese" | "中" => Ok(Language::Zh),
            other => Err(ViewerError::InvalidOption(format!(
                "Unknown language '{}'. Expected 'en' or 'zh'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ViewerError::InvalidOption(format!(
                "Unknown theme '{}'. Expected 'light' or 'dark'",
                other
            ))),
        }
    }
}

/// Paper size used by the print stylesheet of the HTML export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    A3,
    Letter,
    Legal,
}

impl PageSize {
    /// Value for the CSS `@page { size: ... }` rule
    pub fn css(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4 landscape",
            PageSize::A3 => "A3 landscape",
            PageSize::Letter => "letter landscape",
            PageSize::Legal => "legal landscape",
        }
    }
}

impl FromStr for PageSize {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "a3" => Ok(PageSize::A3),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => Err(ViewerError::InvalidOption(format!(
                "Unknown page size '{}'. Expected a4, a3, letter or legal",
                other
            ))),
        }
    }
}

/// What text, if any, is drawn next to each marker
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum LabelField {
    #[default]
    None,
    LatLng,
    Column(String),
}

impl FromStr for LabelField {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "none" => Ok(LabelField::None),
            "latlng" | "lat-lng" => Ok(LabelField::LatLng),
            _ => Ok(LabelField::Column(trimmed.to_string())),
        }
    }
}

/// Rendering-only options; never affect which records are filtered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayOptions {
    pub label_field: LabelField,
    pub clustering_enabled: bool,
    pub language: Language,
    pub theme: Theme,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            label_field: LabelField::None,
            clustering_enabled: true,
            language: Language::En,
            theme: Theme::Light,
        }
    }
}

impl DisplayOptions {
    /// Overwrite only the fields the patch sets
    pub fn merge(&mut self, patch: DisplayOptionsPatch) {
        if let Some(label_field) = patch.label_field {
            self.label_field = label_field;
        }
        if let Some(clustering_enabled) = patch.clustering_enabled {
            self.clustering_enabled = clustering_enabled;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
    }
}

/// Partial update of [`DisplayOptions`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayOptionsPatch {
    pub label_field: Option<LabelField>,
    pub clustering_enabled: Option<bool>,
    pub language: Option<Language>,
    pub theme: Option<Theme>,
}

impl DisplayOptionsPatch {
    pub fn label_field(mut self, label_field: LabelField) -> Self {
        self.label_field = Some(label_field);
        self
    }

    pub fn clustering(mut self, enabled: bool) -> Self {
        self.clustering_enabled = Some(enabled);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_field_parsing() {
        assert_eq!("none".parse::<LabelField>().unwrap(), LabelField::None);
        assert_eq!("latLng".parse::<LabelField>().unwrap(), LabelField::LatLng);
        assert_eq!(
            "Group ID".parse::<LabelField>().unwrap(),
            LabelField::Column("Group ID".to_string())
        );
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut options = DisplayOptions::default();
        options.merge(DisplayOptionsPatch::default().language(Language::Zh));

        assert_eq!(options.language, Language::Zh);
        assert!(options.clustering_enabled);
        assert_eq!(options.theme, Theme::Light);
    }

    #[test]
    fn test_invalid_language() {
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::En.toggled(), Language::Zh);
    }
}
