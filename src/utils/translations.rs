use crate::error::Result;
use crate::models::Language;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

const TRANSLATIONS_JSON: &str = include_str!("translations.json");

static GLOBAL: OnceLock<Translations> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
    Title,
    UploadTitle,
    FileLabel,
    FileFormatInfo,
    FileRequirementInfo,
    LoadedFiles,
    Records,
    SearchTitle,
    SearchPlaceholder,
    AgeFilterTitle,
    InfoTitle,
    WelcomeTitle,
    WelcomeText,
    WelcomeFormat,
    GeneticId,
    MasterId,
    GroupId,
    Locality,
    Age,
    Publication,
    Loading,
    EmptyFile,
    MissingCoordinates,
    NoMarkers,
    Mappable,
    UnknownAge,
}

impl MessageKey {
    pub const ALL: [MessageKey; 26] = [
        MessageKey::Title,
        MessageKey::UploadTitle,
        MessageKey::FileLabel,
        MessageKey::FileFormatInfo,
        MessageKey::FileRequirementInfo,
        MessageKey::LoadedFiles,
        MessageKey::Records,
        MessageKey::SearchTitle,
        MessageKey::SearchPlaceholder,
        MessageKey::AgeFilterTitle,
        MessageKey::InfoTitle,
        MessageKey::WelcomeTitle,
        MessageKey::WelcomeText,
        MessageKey::WelcomeFormat,
        MessageKey::GeneticId,
        MessageKey::MasterId,
        MessageKey::GroupId,
        MessageKey::Locality,
        MessageKey::Age,
        MessageKey::Publication,
        MessageKey::Loading,
        MessageKey::EmptyFile,
        MessageKey::MissingCoordinates,
        MessageKey::NoMarkers,
        MessageKey::Mappable,
        MessageKey::UnknownAge,
    ];
}

/// Bilingual label table, keyed by language and message key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    tables: HashMap<Language, HashMap<MessageKey, String>>,
}

impl Translations {
    /// Parse the embedded table
    pub fn load() -> Result<Self> {
        Ok(serde_json::from_str(TRANSLATIONS_JSON)?)
    }

    /// Shared table, parsed on first use
    pub fn global() -> &'static Translations {
        GLOBAL.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to parse translation table: {}", e);
                Self::default()
            })
        })
    }

    /// Look up a label, falling back to English and then to the key itself
    pub fn get(&self, language: Language, key: MessageKey) -> &str {
        self.lookup(language, key)
            .or_else(|| self.lookup(Language::En, key))
            .unwrap_or_else(|| key_name(key))
    }

    fn lookup(&self, language: Language, key: MessageKey) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|table| table.get(&key))
            .map(String::as_str)
    }
}

/// Shorthand for `Translations::global().get(..)`
pub fn tr(language: Language, key: MessageKey) -> &'static str {
    Translations::global().get(language, key)
}

fn key_name(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "title",
        MessageKey::UploadTitle => "uploadTitle",
        MessageKey::FileLabel => "fileLabel",
        MessageKey::FileFormatInfo => "fileFormatInfo",
        MessageKey::FileRequirementInfo => "fileRequirementInfo",
        MessageKey::LoadedFiles => "loadedFiles",
        MessageKey::Records => "records",
        MessageKey::SearchTitle => "searchTitle",
        MessageKey::SearchPlaceholder => "searchPlaceholder",
        MessageKey::AgeFilterTitle => "ageFilterTitle",
        MessageKey::InfoTitle => "infoTitle",
        MessageKey::WelcomeTitle => "welcomeTitle",
        MessageKey::WelcomeText => "welcomeText",
        MessageKey::WelcomeFormat => "welcomeFormat",
        MessageKey::GeneticId => "geneticId",
        MessageKey::MasterId => "masterId",
        MessageKey::GroupId => "groupId",
        MessageKey::Locality => "locality",
        MessageKey::Age => "age",
        MessageKey::Publication => "publication",
        MessageKey::Loading => "loading",
        MessageKey::EmptyFile => "emptyFile",
        MessageKey::MissingCoordinates => "missingCoordinates",
        MessageKey::NoMarkers => "noMarkers",
        MessageKey::Mappable => "mappable",
        MessageKey::UnknownAge => "unknownAge",
    }
}
