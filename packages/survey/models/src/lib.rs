#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Survey respondent record types.
//!
//! Mirrors the event model split: [`RawRespondent`] is the all-optional
//! stringly shape read from a survey extract, [`Respondent`] the validated
//! shape the exposure join consumes. Demographic columns the pipeline does
//! not interpret are carried through untouched in `demographics`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Highest years-of-schooling value kept after clamping.
pub const MAX_YEARS_OF_SCHOOLING: u8 = 20;

/// A survey respondent row as it arrives from a source table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRespondent {
    /// Stable respondent identifier, if the extract carries one.
    #[serde(default)]
    pub respondent_id: Option<String>,
    /// Region of residence (state).
    #[serde(default)]
    pub region: Option<String>,
    /// Sub-region of residence (LGA), often absent in survey extracts.
    #[serde(default)]
    pub sub_region: Option<String>,
    /// Year of birth, kept as text until validation.
    #[serde(default)]
    pub birth_year: Option<String>,
    /// Year the respondent was interviewed.
    #[serde(default)]
    pub survey_year: Option<String>,
    /// Completed years of schooling.
    #[serde(default)]
    pub years_of_schooling: Option<String>,
    /// Demographic columns passed through without interpretation.
    #[serde(default)]
    pub demographics: BTreeMap<String, String>,
}

/// A validated survey respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Respondent {
    /// Respondent identifier (source-provided or positional).
    pub respondent_id: String,
    /// Standardized region of residence.
    pub region: String,
    /// Standardized sub-region of residence, when the extract has one.
    pub sub_region: Option<String>,
    pub birth_year: i32,
    pub survey_year: i32,
    /// Completed years of schooling, clamped to `0..=MAX_YEARS_OF_SCHOOLING`.
    pub years_of_schooling: u8,
    /// Demographic columns passed through without interpretation.
    pub demographics: BTreeMap<String, String>,
}

/// Why a respondent row was dropped during normalization.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RespondentDropReason {
    /// Row had no region value; no exposure window can be located.
    MissingRegion,
    /// Birth year missing or not a plausible integer.
    InvalidBirthYear,
    /// Survey year missing or not a plausible integer.
    InvalidSurveyYear,
    /// Years of schooling missing or unparseable.
    InvalidSchooling,
}

impl RespondentDropReason {
    /// Returns all drop reasons.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MissingRegion,
            Self::InvalidBirthYear,
            Self::InvalidSurveyYear,
            Self::InvalidSchooling,
        ]
    }
}
