//! CSV readers for the event and respondent source tables.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use conflict_panel_event_models::RawEvent;
use conflict_panel_survey_models::RawRespondent;

use crate::TableError;

/// Candidate header names per canonical event column, tried in order.
const EVENT_REGION: &[&str] = &["region", "admin1", "state"];
const EVENT_SUB_REGION: &[&str] = &["sub_region", "admin2", "lga"];
const EVENT_DATE: &[&str] = &["event_date", "date"];
const EVENT_TYPE: &[&str] = &["event_type", "type"];
const EVENT_FATALITIES: &[&str] = &["fatalities"];
const EVENT_ACTOR1: &[&str] = &["actor1"];
const EVENT_ACTOR2: &[&str] = &["actor2"];

/// Candidate header names per canonical respondent column, tried in order.
const RESPONDENT_ID: &[&str] = &["respondent_id", "case_id", "caseid"];
const RESPONDENT_REGION: &[&str] = &["region", "state"];
const RESPONDENT_SUB_REGION: &[&str] = &["sub_region", "lga"];
const RESPONDENT_BIRTH_YEAR: &[&str] = &["birth_year", "year_of_birth"];
const RESPONDENT_SURVEY_YEAR: &[&str] = &["survey_year", "interview_year"];
const RESPONDENT_SCHOOLING: &[&str] = &["years_of_schooling", "years_schooling", "education_years"];

/// Reads raw event rows from one or more CSV files, concatenated in path
/// order.
///
/// # Errors
///
/// Returns [`TableError`] if a file cannot be opened or parsed, or if any
/// file is missing a required column.
pub fn read_events(paths: &[impl AsRef<Path>]) -> Result<Vec<RawEvent>, TableError> {
    let mut rows = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let file = File::open(path)?;
        rows.extend(read_events_from(file, &path.display().to_string())?);
    }
    Ok(rows)
}

/// Reads raw event rows from a CSV byte stream. `label` names the stream
/// in errors and logs.
///
/// # Errors
///
/// Returns [`TableError`] if the stream cannot be parsed as CSV or the
/// header is missing a required column.
pub fn read_events_from<R: Read>(reader: R, label: &str) -> Result<Vec<RawEvent>, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let region = resolve_column(&headers, EVENT_REGION);
    let event_date = resolve_column(&headers, EVENT_DATE);
    let event_type = resolve_column(&headers, EVENT_TYPE);
    require_columns(
        "event",
        label,
        &[
            (region, EVENT_REGION[0]),
            (event_date, EVENT_DATE[0]),
            (event_type, EVENT_TYPE[0]),
        ],
    )?;

    let sub_region = resolve_column(&headers, EVENT_SUB_REGION);
    let fatalities = resolve_column(&headers, EVENT_FATALITIES);
    let actor1 = resolve_column(&headers, EVENT_ACTOR1);
    let actor2 = resolve_column(&headers, EVENT_ACTOR2);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(RawEvent {
            region: field(&record, region),
            sub_region: field(&record, sub_region),
            event_date: field(&record, event_date),
            event_type: field(&record, event_type),
            fatalities: field(&record, fatalities),
            actor1: field(&record, actor1),
            actor2: field(&record, actor2),
        });
    }

    log::info!("Read {} event row(s) from {label}", rows.len());
    Ok(rows)
}

/// Reads raw respondent rows from a CSV file.
///
/// # Errors
///
/// Returns [`TableError`] if the file cannot be opened or parsed, or is
/// missing a required column.
pub fn read_respondents(path: impl AsRef<Path>) -> Result<Vec<RawRespondent>, TableError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_respondents_from(file, &path.display().to_string())
}

/// Reads raw respondent rows from a CSV byte stream.
///
/// Columns not claimed by a canonical mapping are carried through as
/// demographic pass-through fields, keyed by their header name.
///
/// # Errors
///
/// Returns [`TableError`] if the stream cannot be parsed as CSV or the
/// header is missing a required column.
pub fn read_respondents_from<R: Read>(
    reader: R,
    label: &str,
) -> Result<Vec<RawRespondent>, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let region = resolve_column(&headers, RESPONDENT_REGION);
    let birth_year = resolve_column(&headers, RESPONDENT_BIRTH_YEAR);
    let survey_year = resolve_column(&headers, RESPONDENT_SURVEY_YEAR);
    let schooling = resolve_column(&headers, RESPONDENT_SCHOOLING);
    require_columns(
        "respondent",
        label,
        &[
            (region, RESPONDENT_REGION[0]),
            (birth_year, RESPONDENT_BIRTH_YEAR[0]),
            (survey_year, RESPONDENT_SURVEY_YEAR[0]),
            (schooling, RESPONDENT_SCHOOLING[0]),
        ],
    )?;

    let respondent_id = resolve_column(&headers, RESPONDENT_ID);
    let sub_region = resolve_column(&headers, RESPONDENT_SUB_REGION);

    let claimed: Vec<usize> = [
        respondent_id,
        region,
        sub_region,
        birth_year,
        survey_year,
        schooling,
    ]
    .into_iter()
    .flatten()
    .collect();
    let demographic_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| !claimed.contains(index))
        .map(|(index, name)| (index, name.clone()))
        .collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let mut demographics = BTreeMap::new();
        for (index, name) in &demographic_columns {
            let value = record.get(*index).unwrap_or("").trim().to_owned();
            demographics.insert(name.clone(), value);
        }
        rows.push(RawRespondent {
            respondent_id: field(&record, respondent_id),
            region: field(&record, region),
            sub_region: field(&record, sub_region),
            birth_year: field(&record, birth_year),
            survey_year: field(&record, survey_year),
            years_of_schooling: field(&record, schooling),
            demographics,
        });
    }

    log::info!("Read {} respondent row(s) from {label}", rows.len());
    Ok(rows)
}

/// Resolves the first matching candidate header, case-insensitively.
fn resolve_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(candidate))
    })
}

fn require_columns(
    table: &'static str,
    path: &str,
    resolved: &[(Option<usize>, &str)],
) -> Result<(), TableError> {
    let missing: Vec<String> = resolved
        .iter()
        .filter(|(index, _)| index.is_none())
        .map(|(_, name)| (*name).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TableError::MissingColumns {
            table,
            path: path.to_string(),
            columns: missing,
        })
    }
}

fn field(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
