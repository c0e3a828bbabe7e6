#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Location-year conflict panel records and the lookup container built from
//! them.
//!
//! A [`LocationYearRecord`] is one cell of the conflict panel: every measure
//! for one (region, sub-region, year). [`ConflictPanel`] owns the frozen set
//! of cells plus precomputed [`RegionYearRollup`]s, and answers the lookups
//! the exposure join needs, falling back to region level when a respondent
//! has no sub-region.

use std::collections::BTreeMap;

use conflict_panel_conflict_models::IntensityBand;
use serde::{Deserialize, Serialize};

/// Grouping key for one cell of the conflict panel.
///
/// Ordering is derived field-by-field, so sorted iteration yields region,
/// then sub-region, then year. Cumulative measures depend on that order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationYearKey {
    pub region: String,
    pub sub_region: String,
    pub year: i32,
}

impl LocationYearKey {
    #[must_use]
    pub fn new(region: impl Into<String>, sub_region: impl Into<String>, year: i32) -> Self {
        Self {
            region: region.into(),
            sub_region: sub_region.into(),
            year,
        }
    }
}

/// Cumulative exposure measures for one location, up to and including the
/// record's year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeExposure {
    /// Running total of violent events in this location.
    pub cum_violent_events: u64,
    /// Running total of all fatalities in this location.
    pub cum_fatalities: u64,
    /// Running total of Boko Haram events in this location.
    pub cum_boko_haram_events: u64,
    /// Years since the location's first violent year, clipped at zero.
    /// `None` for locations that never record violence.
    pub years_since_first_conflict: Option<u32>,
    /// Whether the location has recorded any violent event so far.
    pub ever_exposed: bool,
}

/// One cell of the conflict panel: all measures for one
/// (region, sub-region, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationYearRecord {
    pub key: LocationYearKey,
    /// Count of all events, violent or not.
    pub total_events: u64,
    /// Fatalities across all events.
    pub total_fatalities: u64,
    /// Count of events in violent categories.
    pub violent_events: u64,
    /// Fatalities from violent events only.
    pub violent_fatalities: u64,
    /// Count of events attributed to Boko Haram.
    pub boko_haram_events: u64,
    /// Fatalities from Boko Haram events only.
    pub boko_haram_fatalities: u64,
    /// Event count per source category.
    pub event_type_breakdown: BTreeMap<String, u64>,
    pub any_conflict: bool,
    pub any_violent_conflict: bool,
    pub any_boko_haram: bool,
    /// Relative intensity band, assigned after aggregation.
    pub intensity_band: IntensityBand,
    /// Cumulative measures up to and including this year.
    #[serde(flatten)]
    pub cumulative: CumulativeExposure,
}

impl LocationYearRecord {
    /// Creates an empty cell for the given key. All measures start at zero
    /// and the band starts at the bottom until classification runs.
    #[must_use]
    pub fn new(key: LocationYearKey) -> Self {
        Self {
            key,
            total_events: 0,
            total_fatalities: 0,
            violent_events: 0,
            violent_fatalities: 0,
            boko_haram_events: 0,
            boko_haram_fatalities: 0,
            event_type_breakdown: BTreeMap::new(),
            any_conflict: false,
            any_violent_conflict: false,
            any_boko_haram: false,
            intensity_band: IntensityBand::Low,
            cumulative: CumulativeExposure::default(),
        }
    }

    /// Returns `true` if this cell's band marks it as high conflict.
    #[must_use]
    pub const fn is_high_conflict(&self) -> bool {
        self.intensity_band.is_high_conflict()
    }
}

/// Region-level totals for one year, precomputed from the member cells.
///
/// Serves respondents whose survey extract carries no sub-region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionYearRollup {
    pub region: String,
    pub year: i32,
    pub total_events: u64,
    pub total_fatalities: u64,
    pub violent_events: u64,
    pub violent_fatalities: u64,
    pub boko_haram_events: u64,
    pub boko_haram_fatalities: u64,
    pub any_violent_conflict: bool,
    pub any_boko_haram: bool,
    /// Whether any member sub-region was banded high conflict this year.
    pub high_conflict: bool,
}

impl RegionYearRollup {
    #[must_use]
    fn new(region: String, year: i32) -> Self {
        Self {
            region,
            year,
            total_events: 0,
            total_fatalities: 0,
            violent_events: 0,
            violent_fatalities: 0,
            boko_haram_events: 0,
            boko_haram_fatalities: 0,
            any_violent_conflict: false,
            any_boko_haram: false,
            high_conflict: false,
        }
    }

    fn absorb(&mut self, record: &LocationYearRecord) {
        self.total_events += record.total_events;
        self.total_fatalities += record.total_fatalities;
        self.violent_events += record.violent_events;
        self.violent_fatalities += record.violent_fatalities;
        self.boko_haram_events += record.boko_haram_events;
        self.boko_haram_fatalities += record.boko_haram_fatalities;
        self.any_violent_conflict |= record.any_violent_conflict;
        self.any_boko_haram |= record.any_boko_haram;
        self.high_conflict |= record.is_high_conflict();
    }
}

/// The measures the exposure join reads out of one panel year, uniform
/// across cell-level and rollup-level lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearExposure {
    pub total_events: u64,
    pub total_fatalities: u64,
    pub violent_events: u64,
    pub boko_haram_events: u64,
    pub high_conflict: bool,
}

impl From<&LocationYearRecord> for YearExposure {
    fn from(record: &LocationYearRecord) -> Self {
        Self {
            total_events: record.total_events,
            total_fatalities: record.total_fatalities,
            violent_events: record.violent_events,
            boko_haram_events: record.boko_haram_events,
            high_conflict: record.is_high_conflict(),
        }
    }
}

impl From<&RegionYearRollup> for YearExposure {
    fn from(rollup: &RegionYearRollup) -> Self {
        Self {
            total_events: rollup.total_events,
            total_fatalities: rollup.total_fatalities,
            violent_events: rollup.violent_events,
            boko_haram_events: rollup.boko_haram_events,
            high_conflict: rollup.high_conflict,
        }
    }
}

/// The frozen conflict panel: every location-year cell plus region-year
/// rollups, keyed for the lookups the exposure join performs.
///
/// Construction takes ownership of the cells and precomputes the rollups;
/// nothing mutates the panel afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConflictPanel {
    records: BTreeMap<LocationYearKey, LocationYearRecord>,
    region_years: BTreeMap<(String, i32), RegionYearRollup>,
}

impl ConflictPanel {
    #[must_use]
    pub fn new(records: Vec<LocationYearRecord>) -> Self {
        let mut panel = Self::default();
        for record in records {
            panel
                .region_years
                .entry((record.key.region.clone(), record.key.year))
                .or_insert_with(|| RegionYearRollup::new(record.key.region.clone(), record.key.year))
                .absorb(&record);
            panel.records.insert(record.key.clone(), record);
        }
        panel
    }

    /// Number of location-year cells in the panel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a single cell.
    #[must_use]
    pub fn record(&self, region: &str, sub_region: &str, year: i32) -> Option<&LocationYearRecord> {
        self.records
            .get(&LocationYearKey::new(region, sub_region, year))
    }

    /// Looks up the region-level rollup for one year.
    #[must_use]
    pub fn region_rollup(&self, region: &str, year: i32) -> Option<&RegionYearRollup> {
        self.region_years.get(&(region.to_string(), year))
    }

    /// Returns the exposure measures for one year of a respondent's
    /// location.
    ///
    /// Prefers the exact cell when a sub-region is known, falling back to
    /// the region rollup when that sub-region has no row for the year.
    /// Respondents without a sub-region always read the rollup. `None`
    /// means the whole region has no contribution for that year.
    #[must_use]
    pub fn year_exposure(
        &self,
        region: &str,
        sub_region: Option<&str>,
        year: i32,
    ) -> Option<YearExposure> {
        sub_region
            .and_then(|sub| self.record(region, sub, year))
            .map(YearExposure::from)
            .or_else(|| self.region_rollup(region, year).map(YearExposure::from))
    }

    /// Iterates cells in key order (region, sub-region, year).
    pub fn records(&self) -> impl Iterator<Item = &LocationYearRecord> {
        self.records.values()
    }

    /// Consumes the panel, returning the cells in key order.
    #[must_use]
    pub fn into_records(self) -> Vec<LocationYearRecord> {
        self.records.into_values().collect()
    }

    /// Iterates region-year rollups in (region, year) order.
    pub fn rollups(&self) -> impl Iterator<Item = &RegionYearRollup> {
        self.region_years.values()
    }
}
