#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! School-age exposure windows, per-respondent exposure features, and the
//! final output panel row.

use conflict_panel_survey_models::Respondent;
use serde::{Deserialize, Serialize};

/// Age bounds of the school-age window, in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolAgeBounds {
    pub start_age: i32,
    pub end_age: i32,
}

impl Default for SchoolAgeBounds {
    fn default() -> Self {
        Self {
            start_age: 6,
            end_age: 18,
        }
    }
}

/// Half-open interval of calendar years `[start, end)` over which a
/// respondent's exposure is accumulated.
///
/// The end is clipped to the survey year: exposure after the interview
/// cannot have affected the observed outcome. A window can be empty (a
/// respondent surveyed before reaching school age) and then contributes
/// zero exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureWindow {
    start: i32,
    end: i32,
}

impl ExposureWindow {
    /// Creates the window `[start, end)`, clamping a backwards interval to
    /// the empty window at `start`.
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self {
            start,
            end: if end < start { start } else { end },
        }
    }

    /// Computes a respondent's school-age window from the configured age
    /// bounds, clipped to their survey year.
    #[must_use]
    pub const fn school_age(birth_year: i32, survey_year: i32, bounds: SchoolAgeBounds) -> Self {
        let start = birth_year + bounds.start_age;
        let end = birth_year + bounds.end_age;
        Self::new(start, if end < survey_year { end } else { survey_year })
    }

    /// First year inside the window.
    #[must_use]
    pub const fn start(self) -> i32 {
        self.start
    }

    /// First year past the window.
    #[must_use]
    pub const fn end(self) -> i32 {
        self.end
    }

    /// Number of calendar years covered.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.abs_diff(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn contains(self, year: i32) -> bool {
        self.start <= year && year < self.end
    }

    /// Iterates the covered calendar years in ascending order.
    pub fn years(self) -> impl Iterator<Item = i32> {
        self.start..self.end
    }
}

/// Conflict exposure accumulated over one respondent's school-age window.
///
/// Every field is well-defined for every respondent: an empty window or a
/// location absent from the panel yields the all-zero default, never a null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureFeatures {
    /// Violent events summed over the window.
    pub violent_events_school_age: u64,
    /// All fatalities summed over the window.
    pub fatalities_school_age: u64,
    /// Boko Haram events summed over the window.
    pub boko_haram_events_school_age: u64,
    /// Window years in which the location recorded any event.
    pub years_exposed_school_age: u32,
    /// Whether any window year was banded high conflict.
    pub high_conflict_school_age: bool,
    /// Whether any violent event fell inside the window.
    pub exposed_during_school_age: bool,
    /// Mean yearly violent events over the window (0.0 when empty).
    pub conflict_exposure_index: f64,
}

/// One row of the final analysis panel: respondent, exposure, and cohort
/// treatment indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRow {
    #[serde(flatten)]
    pub respondent: Respondent,
    #[serde(flatten)]
    pub exposure: ExposureFeatures,
    /// Region belongs to the Northeast treatment group.
    pub northeast: bool,
    /// Born at or after the cohort treatment cutoff.
    pub post_boko_haram: bool,
    /// Complement of `post_boko_haram`.
    pub pre_boko_haram: bool,
    /// Difference-in-differences interaction term.
    pub northeast_x_post2009: bool,
}
