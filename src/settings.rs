use crate::error::{Result, ViewerError};
use crate::models::{AgeRange, DisplayOptions, LabelField, Language, PageSize, Theme};
use crate::processors::{AgeRangeCalculator, ColorMapper};
use crate::utils::constants::{
    DEFAULT_COLOR_DIVISIONS, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE, DEFAULT_TILE_URL, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Startup settings: built-in defaults, then an optional file, then
/// `ADNA_VIEWER_*` environment variables.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ViewerSettings {
    pub language: Language,

    pub theme: Theme,

    pub clustering: bool,

    #[validate(range(min = 1, max = 6))]
    pub color_divisions: usize,

    #[validate(range(min = 0.0))]
    pub default_min_age: f64,

    #[validate(range(min = 0.0))]
    pub default_max_age: f64,

    #[validate(length(min = 1))]
    pub tile_url: String,

    pub page_size: PageSize,
}

impl ViewerSettings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("language", "en")?
            .set_default("theme", "light")?
            .set_default("clustering", true)?
            .set_default("color_divisions", DEFAULT_COLOR_DIVISIONS as i64)?
            .set_default("default_min_age", DEFAULT_MIN_AGE)?
            .set_default("default_max_age", DEFAULT_MAX_AGE)?
            .set_default("tile_url", DEFAULT_TILE_URL)?
            .set_default("page_size", "a4")?;

        if let Some(path) = path {
            debug!("Reading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: ViewerSettings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        if settings.default_min_age > settings.default_max_age {
            return Err(ViewerError::InvalidOption(format!(
                "default_min_age ({}) is greater than default_max_age ({})",
                settings.default_min_age, settings.default_max_age
            )));
        }

        Ok(settings)
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            label_field: LabelField::None,
            clustering_enabled: self.clustering,
            language: self.language,
            theme: self.theme,
        }
    }

    pub fn age_calculator(&self) -> AgeRangeCalculator {
        AgeRangeCalculator::with_default_range(AgeRange::new(
            self.default_min_age,
            self.default_max_age,
        ))
    }

    pub fn color_mapper(&self) -> ColorMapper {
        ColorMapper::with_divisions(self.color_divisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() -> Result<()> {
        let settings = ViewerSettings::load(None)?;

        assert_eq!(settings.color_divisions, 5);
        assert_eq!(settings.default_max_age, 100_000.0);
        assert_eq!(settings.page_size, PageSize::A4);
        assert!(settings.display_options().clustering_enabled);

        Ok(())
    }

    #[test]
    fn test_file_overrides() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "language = \"zh\"")?;
        writeln!(file, "theme = \"dark\"")?;
        writeln!(file, "color_divisions = 6")?;

        let settings = ViewerSettings::load(Some(file.path()))?;

        assert_eq!(settings.language, Language::Zh);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.color_mapper().divisions(), 6);

        Ok(())
    }

    #[test]
    fn test_invalid_divisions_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "color_divisions = 9")?;

        assert!(ViewerSettings::load(Some(file.path())).is_err());

        Ok(())
    }
}
