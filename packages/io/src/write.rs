//! CSV writers for the aggregated location-year table, the final analysis
//! panel, and raw input tables produced by the synthetic data generator.
//!
//! Output is fully deterministic: records arrive sorted, demographic
//! columns are emitted in sorted order, and booleans are written as 0/1 so
//! the tables load cleanly into statistical tooling. Raw tables use the
//! canonical header names the readers resolve first, so written files feed
//! straight back into [`crate::read`].

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

use conflict_panel_event_models::RawEvent;
use conflict_panel_exposure_models::PanelRow;
use conflict_panel_panel_models::LocationYearRecord;
use conflict_panel_survey_models::RawRespondent;

use crate::TableError;

const LOCATION_YEAR_HEADER: &[&str] = &[
    "region",
    "sub_region",
    "year",
    "total_events",
    "total_fatalities",
    "violent_events",
    "violent_fatalities",
    "boko_haram_events",
    "boko_haram_fatalities",
    "battles",
    "explosions_remote_violence",
    "violence_against_civilians",
    "any_conflict",
    "any_violent_conflict",
    "any_boko_haram",
    "conflict_intensity",
    "high_conflict",
    "cum_violent_events",
    "cum_fatalities",
    "cum_boko_haram_events",
    "years_since_first_conflict",
    "ever_exposed",
];

const PANEL_RESPONDENT_HEADER: &[&str] = &[
    "respondent_id",
    "region",
    "sub_region",
    "birth_year",
    "survey_year",
    "years_of_schooling",
];

const PANEL_FEATURE_HEADER: &[&str] = &[
    "violent_events_school_age",
    "fatalities_school_age",
    "boko_haram_events_school_age",
    "years_exposed_school_age",
    "high_conflict_school_age",
    "exposed_during_school_age",
    "conflict_exposure_index",
    "northeast",
    "post_boko_haram",
    "pre_boko_haram",
    "northeast_x_post2009",
];

const RAW_EVENT_HEADER: &[&str] = &[
    "region",
    "sub_region",
    "event_date",
    "event_type",
    "fatalities",
    "actor1",
    "actor2",
];

const RAW_RESPONDENT_HEADER: &[&str] = &[
    "respondent_id",
    "region",
    "sub_region",
    "birth_year",
    "survey_year",
    "years_of_schooling",
];

/// Writes the location-year table to a CSV file.
///
/// # Errors
///
/// Returns [`TableError`] if the file cannot be created or written.
pub fn write_location_year_csv(
    path: impl AsRef<Path>,
    records: &[LocationYearRecord],
) -> Result<(), TableError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    write_location_year_records(&mut writer, records)?;
    writer.flush()?;
    log::info!(
        "Wrote {} location-year row(s) to {}",
        records.len(),
        path.display()
    );
    Ok(())
}

/// Writes the location-year table to any byte sink.
///
/// # Errors
///
/// Returns [`TableError`] if the sink cannot be written.
pub fn write_location_year_table<W: Write>(
    writer: W,
    records: &[LocationYearRecord],
) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_location_year_records(&mut csv_writer, records)?;
    csv_writer.flush()?;
    Ok(())
}

/// Writes the final analysis panel to a CSV file.
///
/// # Errors
///
/// Returns [`TableError`] if the file cannot be created or written.
pub fn write_panel_csv(path: impl AsRef<Path>, rows: &[PanelRow]) -> Result<(), TableError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    write_panel_rows(&mut writer, rows)?;
    writer.flush()?;
    log::info!("Wrote {} panel row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Writes the final analysis panel to any byte sink.
///
/// # Errors
///
/// Returns [`TableError`] if the sink cannot be written.
pub fn write_panel_table<W: Write>(writer: W, rows: &[PanelRow]) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_panel_rows(&mut csv_writer, rows)?;
    csv_writer.flush()?;
    Ok(())
}

/// Writes raw event rows to a CSV file. Missing fields become blank cells,
/// which the reader maps back to `None`.
///
/// # Errors
///
/// Returns [`TableError`] if the file cannot be created or written.
pub fn write_raw_event_csv(path: impl AsRef<Path>, rows: &[RawEvent]) -> Result<(), TableError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    write_raw_events(&mut writer, rows)?;
    writer.flush()?;
    log::info!("Wrote {} raw event row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Writes raw event rows to any byte sink.
///
/// # Errors
///
/// Returns [`TableError`] if the sink cannot be written.
pub fn write_raw_event_table<W: Write>(writer: W, rows: &[RawEvent]) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_raw_events(&mut csv_writer, rows)?;
    csv_writer.flush()?;
    Ok(())
}

/// Writes raw respondent rows to a CSV file, demographic columns appended
/// in sorted order after the core columns.
///
/// # Errors
///
/// Returns [`TableError`] if the file cannot be created or written.
pub fn write_raw_respondent_csv(
    path: impl AsRef<Path>,
    rows: &[RawRespondent],
) -> Result<(), TableError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    write_raw_respondents(&mut writer, rows)?;
    writer.flush()?;
    log::info!(
        "Wrote {} raw respondent row(s) to {}",
        rows.len(),
        path.display()
    );
    Ok(())
}

/// Writes raw respondent rows to any byte sink.
///
/// # Errors
///
/// Returns [`TableError`] if the sink cannot be written.
pub fn write_raw_respondent_table<W: Write>(
    writer: W,
    rows: &[RawRespondent],
) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_raw_respondents(&mut csv_writer, rows)?;
    csv_writer.flush()?;
    Ok(())
}

fn write_location_year_records<W: Write>(
    writer: &mut csv::Writer<W>,
    records: &[LocationYearRecord],
) -> Result<(), csv::Error> {
    writer.write_record(LOCATION_YEAR_HEADER)?;
    for record in records {
        let breakdown = |event_type: &str| {
            record
                .event_type_breakdown
                .get(event_type)
                .copied()
                .unwrap_or_default()
                .to_string()
        };
        writer.write_record(&[
            record.key.region.clone(),
            record.key.sub_region.clone(),
            record.key.year.to_string(),
            record.total_events.to_string(),
            record.total_fatalities.to_string(),
            record.violent_events.to_string(),
            record.violent_fatalities.to_string(),
            record.boko_haram_events.to_string(),
            record.boko_haram_fatalities.to_string(),
            breakdown("Battles"),
            breakdown("Explosions/Remote violence"),
            breakdown("Violence against civilians"),
            flag(record.any_conflict).to_string(),
            flag(record.any_violent_conflict).to_string(),
            flag(record.any_boko_haram).to_string(),
            record.intensity_band.label().to_string(),
            flag(record.is_high_conflict()).to_string(),
            record.cumulative.cum_violent_events.to_string(),
            record.cumulative.cum_fatalities.to_string(),
            record.cumulative.cum_boko_haram_events.to_string(),
            record
                .cumulative
                .years_since_first_conflict
                .map_or_else(String::new, |years| years.to_string()),
            flag(record.cumulative.ever_exposed).to_string(),
        ])?;
    }
    Ok(())
}

fn write_panel_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    rows: &[PanelRow],
) -> Result<(), csv::Error> {
    let demographic_keys = demographic_keys(rows.iter().map(|row| &row.respondent.demographics));

    let mut header: Vec<String> = PANEL_RESPONDENT_HEADER
        .iter()
        .map(ToString::to_string)
        .collect();
    header.extend(demographic_keys.iter().cloned());
    header.extend(PANEL_FEATURE_HEADER.iter().map(ToString::to_string));
    writer.write_record(&header)?;

    for row in rows {
        let mut record: Vec<String> = vec![
            row.respondent.respondent_id.clone(),
            row.respondent.region.clone(),
            row.respondent.sub_region.clone().unwrap_or_default(),
            row.respondent.birth_year.to_string(),
            row.respondent.survey_year.to_string(),
            row.respondent.years_of_schooling.to_string(),
        ];
        for key in &demographic_keys {
            record.push(
                row.respondent
                    .demographics
                    .get(key)
                    .cloned()
                    .unwrap_or_default(),
            );
        }
        record.push(row.exposure.violent_events_school_age.to_string());
        record.push(row.exposure.fatalities_school_age.to_string());
        record.push(row.exposure.boko_haram_events_school_age.to_string());
        record.push(row.exposure.years_exposed_school_age.to_string());
        record.push(flag(row.exposure.high_conflict_school_age).to_string());
        record.push(flag(row.exposure.exposed_during_school_age).to_string());
        record.push(row.exposure.conflict_exposure_index.to_string());
        record.push(flag(row.northeast).to_string());
        record.push(flag(row.post_boko_haram).to_string());
        record.push(flag(row.pre_boko_haram).to_string());
        record.push(flag(row.northeast_x_post2009).to_string());
        writer.write_record(&record)?;
    }
    Ok(())
}

fn write_raw_events<W: Write>(
    writer: &mut csv::Writer<W>,
    rows: &[RawEvent],
) -> Result<(), csv::Error> {
    writer.write_record(RAW_EVENT_HEADER)?;
    for row in rows {
        writer.write_record(&[
            row.region.as_deref().unwrap_or_default(),
            row.sub_region.as_deref().unwrap_or_default(),
            row.event_date.as_deref().unwrap_or_default(),
            row.event_type.as_deref().unwrap_or_default(),
            row.fatalities.as_deref().unwrap_or_default(),
            row.actor1.as_deref().unwrap_or_default(),
            row.actor2.as_deref().unwrap_or_default(),
        ])?;
    }
    Ok(())
}

fn write_raw_respondents<W: Write>(
    writer: &mut csv::Writer<W>,
    rows: &[RawRespondent],
) -> Result<(), csv::Error> {
    let demographic_keys = demographic_keys(rows.iter().map(|row| &row.demographics));

    let mut header: Vec<&str> = RAW_RESPONDENT_HEADER.to_vec();
    header.extend(demographic_keys.iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in rows {
        let mut record: Vec<&str> = vec![
            row.respondent_id.as_deref().unwrap_or_default(),
            row.region.as_deref().unwrap_or_default(),
            row.sub_region.as_deref().unwrap_or_default(),
            row.birth_year.as_deref().unwrap_or_default(),
            row.survey_year.as_deref().unwrap_or_default(),
            row.years_of_schooling.as_deref().unwrap_or_default(),
        ];
        for key in &demographic_keys {
            record.push(row.demographics.get(key).map_or("", String::as_str));
        }
        writer.write_record(&record)?;
    }
    Ok(())
}

/// Union of demographic column names across all rows, sorted.
fn demographic_keys<'a>(
    maps: impl Iterator<Item = &'a BTreeMap<String, String>>,
) -> Vec<String> {
    maps.flat_map(|demographics| demographics.keys().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

const fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}
