#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Normalizes raw source rows into the canonical event and respondent
//! schemas.
//!
//! Row-level problems are never fatal here: a row missing something the
//! pipeline cannot work around is dropped and counted per reason, a value
//! that can be coerced is coerced and counted. The reports returned
//! alongside the cleaned tables feed the run summary.

pub mod parsing;
pub mod regions;

use std::collections::BTreeMap;

use chrono::Datelike;
use conflict_panel_conflict_models::{is_boko_haram_actor, is_violent_type};
use conflict_panel_event_models::{
    CleanEvent, EventDropReason, RawEvent, UNKNOWN_EVENT_TYPE, UNKNOWN_SUB_REGION,
};
use conflict_panel_survey_models::{
    MAX_YEARS_OF_SCHOOLING, RawRespondent, Respondent, RespondentDropReason,
};
use serde::Serialize;

use crate::parsing::{parse_event_date, parse_fatalities, parse_schooling, parse_year};
use crate::regions::standardize_region_name;

/// Accounting for one pass of event normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventNormalizeReport {
    pub rows_in: usize,
    pub rows_kept: usize,
    /// Dropped row count per reason.
    pub dropped: BTreeMap<EventDropReason, usize>,
    /// Rows whose negative fatality value was coerced to zero.
    pub negative_fatalities_zeroed: usize,
}

impl EventNormalizeReport {
    #[must_use]
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}

/// Accounting for one pass of respondent normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentNormalizeReport {
    pub rows_in: usize,
    pub rows_kept: usize,
    /// Dropped row count per reason.
    pub dropped: BTreeMap<RespondentDropReason, usize>,
    /// Rows whose years-of-schooling value was clamped into range.
    pub schooling_clamped: usize,
    /// Rows that received a generated positional identifier.
    pub generated_ids: usize,
}

impl RespondentNormalizeReport {
    #[must_use]
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}

/// Normalizes raw event rows into [`CleanEvent`]s.
///
/// Rows without a region or a parseable date are dropped and counted;
/// everything else is coerced into shape. Classification flags are
/// precomputed here so downstream stages never re-inspect raw strings.
#[must_use]
pub fn normalize_events(rows: Vec<RawEvent>) -> (Vec<CleanEvent>, EventNormalizeReport) {
    let mut report = EventNormalizeReport {
        rows_in: rows.len(),
        ..EventNormalizeReport::default()
    };
    let mut cleaned = Vec::with_capacity(rows.len());

    for raw in rows {
        let Some(region_raw) = non_empty(raw.region) else {
            *report.dropped.entry(EventDropReason::MissingRegion).or_default() += 1;
            continue;
        };
        let Some(event_date) = raw.event_date.as_deref().and_then(parse_event_date) else {
            *report.dropped.entry(EventDropReason::UnparseableDate).or_default() += 1;
            continue;
        };

        let sub_region =
            non_empty(raw.sub_region).unwrap_or_else(|| UNKNOWN_SUB_REGION.to_string());
        let event_type =
            non_empty(raw.event_type).unwrap_or_else(|| UNKNOWN_EVENT_TYPE.to_string());
        let (fatalities, was_negative) = parse_fatalities(raw.fatalities.as_deref());
        if was_negative {
            report.negative_fatalities_zeroed += 1;
        }

        let is_violent = is_violent_type(&event_type);
        let is_boko_haram = raw.actor1.as_deref().is_some_and(is_boko_haram_actor)
            || raw.actor2.as_deref().is_some_and(is_boko_haram_actor);

        cleaned.push(CleanEvent {
            region: standardize_region_name(&region_raw),
            sub_region,
            event_date,
            year: event_date.year(),
            event_type,
            fatalities,
            is_violent,
            is_boko_haram,
        });
    }

    report.rows_kept = cleaned.len();
    log_event_report(&report);
    (cleaned, report)
}

/// Normalizes raw respondent rows into [`Respondent`]s.
///
/// Rows missing a region, birth year, survey year, or schooling value are
/// dropped and counted. Schooling is clamped into `0..=20`; rows without an
/// identifier receive a deterministic positional one.
#[must_use]
pub fn normalize_respondents(
    rows: Vec<RawRespondent>,
) -> (Vec<Respondent>, RespondentNormalizeReport) {
    let mut report = RespondentNormalizeReport {
        rows_in: rows.len(),
        ..RespondentNormalizeReport::default()
    };
    let mut cleaned = Vec::with_capacity(rows.len());

    for (index, raw) in rows.into_iter().enumerate() {
        let Some(region_raw) = non_empty(raw.region) else {
            *report
                .dropped
                .entry(RespondentDropReason::MissingRegion)
                .or_default() += 1;
            continue;
        };
        let Some(birth_year) = parse_year(raw.birth_year.as_deref()) else {
            *report
                .dropped
                .entry(RespondentDropReason::InvalidBirthYear)
                .or_default() += 1;
            continue;
        };
        let Some(survey_year) = parse_year(raw.survey_year.as_deref()) else {
            *report
                .dropped
                .entry(RespondentDropReason::InvalidSurveyYear)
                .or_default() += 1;
            continue;
        };
        let Some((years_of_schooling, clamped)) =
            parse_schooling(raw.years_of_schooling.as_deref(), MAX_YEARS_OF_SCHOOLING)
        else {
            *report
                .dropped
                .entry(RespondentDropReason::InvalidSchooling)
                .or_default() += 1;
            continue;
        };
        if clamped {
            report.schooling_clamped += 1;
        }

        let respondent_id = non_empty(raw.respondent_id).unwrap_or_else(|| {
            report.generated_ids += 1;
            format!("r{:06}", index + 1)
        });

        cleaned.push(Respondent {
            respondent_id,
            region: standardize_region_name(&region_raw),
            sub_region: non_empty(raw.sub_region),
            birth_year,
            survey_year,
            years_of_schooling,
            demographics: raw.demographics,
        });
    }

    report.rows_kept = cleaned.len();
    log_respondent_report(&report);
    (cleaned, report)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn log_event_report(report: &EventNormalizeReport) {
    for (reason, count) in &report.dropped {
        log::warn!("Dropped {count} event row(s): {reason}");
    }
    if report.negative_fatalities_zeroed > 0 {
        log::warn!(
            "Zeroed {} negative fatality value(s)",
            report.negative_fatalities_zeroed
        );
    }
    log::info!(
        "Normalized {}/{} event rows",
        report.rows_kept,
        report.rows_in
    );
}

fn log_respondent_report(report: &RespondentNormalizeReport) {
    for (reason, count) in &report.dropped {
        log::warn!("Dropped {count} respondent row(s): {reason}");
    }
    if report.schooling_clamped > 0 {
        log::warn!(
            "Clamped {} years-of-schooling value(s) into 0..={MAX_YEARS_OF_SCHOOLING}",
            report.schooling_clamped
        );
    }
    log::info!(
        "Normalized {}/{} respondent rows",
        report.rows_kept,
        report.rows_in
    );
}
