#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Staged construction of the conflict exposure panel.
//!
//! The stages run in a fixed order — normalize, aggregate, classify, join,
//! assemble — each fully materialized before the next, single-threaded,
//! with ownership handed from stage to stage. Row-level problems never
//! abort a run; they are absorbed into the [`RunSummary`] returned with
//! the panel. Anything fatal (unreadable files, missing columns) belongs
//! to the I/O layer in front of this crate.

pub mod config;
pub mod summary;

use std::time::Instant;

use conflict_panel_aggregate::{
    add_cumulative_measures, aggregate_location_years, boko_haram_exceeds_violent,
};
use conflict_panel_assemble::assemble_panel;
use conflict_panel_classify::{BandingOutcome, assign_intensity_bands};
use conflict_panel_event_models::{CleanEvent, RawEvent};
use conflict_panel_exposure::school_age_exposure;
use conflict_panel_exposure_models::{ExposureFeatures, PanelRow};
use conflict_panel_normalize::{normalize_events, normalize_respondents};
use conflict_panel_panel_models::{ConflictPanel, LocationYearRecord};
use conflict_panel_survey_models::RawRespondent;

pub use crate::config::{ConfigError, PipelineConfig};
pub use crate::summary::RunSummary;

/// Everything one full run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// The banded location-year panel the join ran against, in key order.
    pub location_years: Vec<LocationYearRecord>,
    /// One panel row per kept respondent.
    pub rows: Vec<PanelRow>,
    /// Data-quality report for the run.
    pub summary: RunSummary,
}

/// Runs the full pipeline over in-memory raw tables.
///
/// Returns one panel row per kept respondent, the location-year panel the
/// rows were joined against, and the run's data-quality summary. The
/// function is total: dirty rows are dropped or coerced and counted, sparse
/// data degrades the banding, and unmatched locations yield zero features,
/// none of which is an error.
#[must_use]
pub fn run_pipeline(
    events: Vec<RawEvent>,
    respondents: Vec<RawRespondent>,
    config: &PipelineConfig,
) -> PipelineOutput {
    let started = Instant::now();
    log::info!(
        "Pipeline starting: {} event row(s), {} respondent row(s)",
        events.len(),
        respondents.len()
    );

    let (clean_events, event_report) = normalize_events(events);
    let (clean_respondents, respondent_report) = normalize_respondents(respondents);

    let (records, banding) = build_location_years(&clean_events, config.intensity_bands);
    let exceeds = boko_haram_exceeds_violent(&records);
    let location_years = records.len();
    let panel = ConflictPanel::new(records);

    let join_started = Instant::now();
    let mut unmatched = 0;
    let exposures: Vec<ExposureFeatures> = clean_respondents
        .iter()
        .map(|respondent| {
            let exposure = school_age_exposure(respondent, &panel, config.school_age);
            if exposure.is_unmatched() {
                unmatched += 1;
            }
            exposure.features
        })
        .collect();
    log::info!(
        "Joined {} respondent(s) against the panel in {:.2}s",
        exposures.len(),
        join_started.elapsed().as_secs_f64()
    );

    let rows = assemble_panel(
        clean_respondents,
        exposures,
        &config.northeast_regions,
        config.birth_cutoff(),
    );

    let summary = RunSummary {
        events_in: event_report.rows_in,
        events_kept: event_report.rows_kept,
        event_drops: event_report.dropped,
        negative_fatalities_zeroed: event_report.negative_fatalities_zeroed,
        respondents_in: respondent_report.rows_in,
        respondents_kept: respondent_report.rows_kept,
        respondent_drops: respondent_report.dropped,
        schooling_clamped: respondent_report.schooling_clamped,
        generated_ids: respondent_report.generated_ids,
        location_years,
        banding,
        respondents_without_panel_data: unmatched,
        boko_haram_exceeds_violent: exceeds,
    };
    summary.log_report();
    log::info!(
        "Pipeline finished in {:.2}s",
        started.elapsed().as_secs_f64()
    );

    PipelineOutput {
        location_years: panel.into_records(),
        rows,
        summary,
    }
}

/// Aggregates events into the banded location-year panel.
///
/// The events-only path: grouping, cumulative measures, then intensity
/// banding. Used by the full run and by the standalone aggregation
/// command.
#[must_use]
pub fn build_location_years(
    events: &[CleanEvent],
    requested_bands: usize,
) -> (Vec<LocationYearRecord>, BandingOutcome) {
    let started = Instant::now();

    let mut records = aggregate_location_years(events);
    add_cumulative_measures(&mut records);
    let banding = assign_intensity_bands(&mut records, requested_bands);

    log::info!(
        "Aggregated {} event(s) into {} location-year(s) in {:.2}s",
        events.len(),
        records.len(),
        started.elapsed().as_secs_f64()
    );
    (records, banding)
}
