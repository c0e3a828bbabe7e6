#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Assembles the final analysis panel: one row per respondent, their
//! exposure features, and the cohort treatment indicators.
//!
//! The assembly is strictly 1:1. Respondents whose location matched no
//! panel data arrive here with all-zero features and are kept; losing rows
//! at this stage would silently bias the downstream comparison, so the row
//! count is asserted rather than trusted.

use std::collections::BTreeSet;

use conflict_panel_exposure_models::{ExposureFeatures, PanelRow};
use conflict_panel_survey_models::Respondent;

/// Attaches exposure features and treatment indicators to each respondent.
///
/// `exposures` must be positionally aligned with `respondents` (the
/// pipeline produces them by mapping over the same order).
///
/// # Panics
///
/// Panics if the two inputs differ in length, or if the output row count
/// would differ from the respondent input count.
#[must_use]
pub fn assemble_panel(
    respondents: Vec<Respondent>,
    exposures: Vec<ExposureFeatures>,
    northeast_regions: &BTreeSet<String>,
    birth_year_cutoff: i32,
) -> Vec<PanelRow> {
    assert_eq!(
        respondents.len(),
        exposures.len(),
        "exposure features must align 1:1 with respondents"
    );
    let expected_rows = respondents.len();

    let rows: Vec<PanelRow> = respondents
        .into_iter()
        .zip(exposures)
        .map(|(respondent, exposure)| {
            let northeast = northeast_regions.contains(respondent.region.as_str());
            let post_boko_haram = respondent.birth_year >= birth_year_cutoff;
            PanelRow {
                respondent,
                exposure,
                northeast,
                post_boko_haram,
                pre_boko_haram: !post_boko_haram,
                northeast_x_post2009: northeast && post_boko_haram,
            }
        })
        .collect();

    assert_eq!(
        rows.len(),
        expected_rows,
        "panel assembly must preserve the respondent row count"
    );
    log::info!("Assembled {} panel row(s)", rows.len());
    rows
}
