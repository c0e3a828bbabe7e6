//! Run-level data-quality accounting.

use std::collections::BTreeMap;

use conflict_panel_classify::BandingOutcome;
use conflict_panel_event_models::EventDropReason;
use conflict_panel_survey_models::RespondentDropReason;
use serde::Serialize;

/// What one pipeline run did to its inputs.
///
/// Returned alongside the panel and logged at completion, so an analyst
/// can judge data completeness without re-running the stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub events_in: usize,
    pub events_kept: usize,
    /// Dropped event rows per reason.
    pub event_drops: BTreeMap<EventDropReason, usize>,
    /// Event rows whose negative fatality value was coerced to zero.
    pub negative_fatalities_zeroed: usize,
    pub respondents_in: usize,
    pub respondents_kept: usize,
    /// Dropped respondent rows per reason.
    pub respondent_drops: BTreeMap<RespondentDropReason, usize>,
    /// Respondent rows whose schooling value was clamped into range.
    pub schooling_clamped: usize,
    /// Respondent rows that received a generated positional identifier.
    pub generated_ids: usize,
    /// Location-year cells in the aggregated panel.
    pub location_years: usize,
    /// How many intensity bands classification actually formed.
    pub banding: BandingOutcome,
    /// Respondents whose location matched no panel data anywhere in their
    /// window.
    pub respondents_without_panel_data: usize,
    /// Location-years whose Boko Haram fatality total exceeds their
    /// violent fatality total. Left as-is; see the aggregate crate.
    pub boko_haram_exceeds_violent: usize,
}

impl RunSummary {
    /// Logs the summary, warnings first.
    pub fn log_report(&self) {
        if self.respondents_without_panel_data > 0 {
            log::warn!(
                "{} respondent(s) had no panel data anywhere in their window",
                self.respondents_without_panel_data
            );
        }
        if self.boko_haram_exceeds_violent > 0 {
            log::warn!(
                "{} location-year(s) attribute more Boko Haram fatalities than violent fatalities",
                self.boko_haram_exceeds_violent
            );
        }
        log::info!(
            "Run summary: {}/{} events kept, {}/{} respondents kept, {} location-year(s), banding: {}",
            self.events_kept,
            self.events_in,
            self.respondents_kept,
            self.respondents_in,
            self.location_years,
            self.banding
        );
    }
}
