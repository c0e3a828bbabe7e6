//! Run configuration.
//!
//! The config is an explicit immutable value handed to [`run_pipeline`];
//! nothing reads ambient state. A TOML file may set any subset of fields
//! and the rest take the documented defaults.
//!
//! [`run_pipeline`]: crate::run_pipeline

use std::collections::BTreeSet;
use std::path::Path;

use conflict_panel_classify::DEFAULT_INTENSITY_BANDS;
use conflict_panel_conflict_models::{CONFLICT_ONSET_YEAR, NORTHEAST_REGIONS};
use conflict_panel_exposure_models::SchoolAgeBounds;
use serde::Deserialize;
use thiserror::Error;

/// Failure to load a run configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file's contents are not a valid config.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything a pipeline run can be told.
///
/// In TOML:
///
/// ```toml
/// northeast_regions = ["Adamawa", "Bauchi", "Borno", "Gombe", "Taraba", "Yobe"]
/// conflict_onset_year = 2009
/// intensity_bands = 4
///
/// [school_age]
/// start_age = 6
/// end_age = 18
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Age bounds of the school-age exposure window.
    pub school_age: SchoolAgeBounds,
    /// Regions forming the treated Northeast group.
    pub northeast_regions: BTreeSet<String>,
    /// Year the insurgency is considered to start.
    pub conflict_onset_year: i32,
    /// Explicit birth-year cutoff for the post-insurgency cohort. When
    /// unset, derived as onset year minus the school-age end (anyone
    /// already past school age at onset counts as pre).
    pub birth_year_cutoff: Option<i32>,
    /// Requested number of intensity bands; classification may degrade
    /// below this on sparse data.
    pub intensity_bands: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            school_age: SchoolAgeBounds::default(),
            northeast_regions: NORTHEAST_REGIONS.iter().map(ToString::to_string).collect(),
            conflict_onset_year: CONFLICT_ONSET_YEAR,
            birth_year_cutoff: None,
            intensity_bands: DEFAULT_INTENSITY_BANDS,
        }
    }
}

impl PipelineConfig {
    /// Effective birth-year cutoff for the post-insurgency cohort.
    #[must_use]
    pub fn birth_cutoff(&self) -> i32 {
        self.birth_year_cutoff
            .unwrap_or(self.conflict_onset_year - self.school_age.end_age)
    }

    /// Parses a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed or a field
    /// has the wrong type.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(raw)?)
    }

    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents do not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cutoff_derives_from_onset_and_school_end() {
        let config = PipelineConfig::default();
        assert_eq!(config.conflict_onset_year, 2009);
        assert_eq!(config.birth_cutoff(), 1991);
        assert_eq!(config.intensity_bands, 4);
        assert!(config.northeast_regions.contains("Borno"));
        assert_eq!(config.northeast_regions.len(), 6);
    }

    #[test]
    fn explicit_cutoff_wins_over_derivation() {
        let config = PipelineConfig {
            birth_year_cutoff: Some(1989),
            ..PipelineConfig::default()
        };
        assert_eq!(config.birth_cutoff(), 1989);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_unset_fields() {
        let config = PipelineConfig::from_toml_str(
            "intensity_bands = 3\n\n[school_age]\nstart_age = 7\nend_age = 15\n",
        )
        .unwrap();

        assert_eq!(config.intensity_bands, 3);
        assert_eq!(config.school_age.start_age, 7);
        assert_eq!(config.school_age.end_age, 15);
        assert_eq!(config.conflict_onset_year, 2009);
        assert_eq!(config.birth_cutoff(), 1994);
        assert!(config.northeast_regions.contains("Yobe"));
    }

    #[test]
    fn empty_toml_is_the_default_config() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn rejects_mistyped_fields() {
        assert!(PipelineConfig::from_toml_str("intensity_bands = \"many\"").is_err());
    }
}
