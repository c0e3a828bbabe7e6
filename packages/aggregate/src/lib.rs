#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Aggregates normalized conflict events into location-year panel cells.
//!
//! Conditional measures (violent-only, Boko-Haram-only) are resolved per
//! event *before* anything is grouped: each event becomes an
//! [`EventContribution`] whose conditional fields are already masked, and
//! the grouping fold only ever adds those numbers up. A fold can therefore
//! never pair one group's rows with values taken from a different slice of
//! the event table, which keeps group-wise conditional sums consistent with
//! the ungrouped totals.

use std::collections::BTreeMap;

use conflict_panel_event_models::CleanEvent;
use conflict_panel_panel_models::{CumulativeExposure, LocationYearKey, LocationYearRecord};

/// One event's contribution to every location-year measure.
///
/// The mask-multiply on construction is the whole contract: conditional
/// fatality measures are `fatalities × indicator` against this event row
/// alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContribution {
    pub key: LocationYearKey,
    pub event_type: String,
    pub fatalities: u64,
    pub violent_events: u64,
    pub violent_fatalities: u64,
    pub boko_haram_events: u64,
    pub boko_haram_fatalities: u64,
}

impl EventContribution {
    #[must_use]
    pub fn from_event(event: &CleanEvent) -> Self {
        let fatalities = u64::from(event.fatalities);
        let violent = u64::from(event.is_violent);
        let boko_haram = u64::from(event.is_boko_haram);
        Self {
            key: LocationYearKey::new(
                event.region.clone(),
                event.sub_region.clone(),
                event.year,
            ),
            event_type: event.event_type.clone(),
            fatalities,
            violent_events: violent,
            violent_fatalities: violent * fatalities,
            boko_haram_events: boko_haram,
            boko_haram_fatalities: boko_haram * fatalities,
        }
    }
}

/// Groups events by (region, sub-region, year) and sums their
/// contributions into panel cells.
///
/// Returns cells sorted by key. Only location-years that actually recorded
/// events appear; absence of a cell means zero events, not missing data.
#[must_use]
pub fn aggregate_location_years(events: &[CleanEvent]) -> Vec<LocationYearRecord> {
    let mut cells: BTreeMap<LocationYearKey, LocationYearRecord> = BTreeMap::new();

    for contribution in events.iter().map(EventContribution::from_event) {
        let record = cells
            .entry(contribution.key.clone())
            .or_insert_with(|| LocationYearRecord::new(contribution.key.clone()));
        record.total_events += 1;
        record.total_fatalities += contribution.fatalities;
        record.violent_events += contribution.violent_events;
        record.violent_fatalities += contribution.violent_fatalities;
        record.boko_haram_events += contribution.boko_haram_events;
        record.boko_haram_fatalities += contribution.boko_haram_fatalities;
        *record
            .event_type_breakdown
            .entry(contribution.event_type)
            .or_default() += 1;
    }

    let mut records: Vec<LocationYearRecord> = cells.into_values().collect();
    for record in &mut records {
        record.any_conflict = record.total_events > 0;
        record.any_violent_conflict = record.violent_events > 0;
        record.any_boko_haram = record.boko_haram_events > 0;
    }
    records
}

/// Fills in per-location cumulative measures.
///
/// `records` must be sorted by key (as [`aggregate_location_years`]
/// returns them) so each location forms a contiguous ascending-year run.
/// Within a run, every cell learns the location's first violent year, so
/// pre-onset cells carry `Some(0)` while never-violent locations stay
/// `None`.
pub fn add_cumulative_measures(records: &mut [LocationYearRecord]) {
    let mut start = 0;
    while start < records.len() {
        let mut end = start + 1;
        while end < records.len() && same_location(&records[start].key, &records[end].key) {
            end += 1;
        }
        fill_location_run(&mut records[start..end]);
        start = end;
    }
}

/// Counts cells whose Boko Haram fatality total exceeds their violent
/// fatality total. Possible because actor attribution is independent of the
/// violent category set; reported in the run summary rather than corrected,
/// since the two flags derive from different columns and clamping would
/// destroy information.
#[must_use]
pub fn boko_haram_exceeds_violent(records: &[LocationYearRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.boko_haram_fatalities > record.violent_fatalities)
        .count()
}

fn same_location(a: &LocationYearKey, b: &LocationYearKey) -> bool {
    a.region == b.region && a.sub_region == b.sub_region
}

fn fill_location_run(run: &mut [LocationYearRecord]) {
    let first_violent_year = run
        .iter()
        .find(|record| record.violent_events > 0)
        .map(|record| record.key.year);

    let mut cum_violent_events = 0;
    let mut cum_fatalities = 0;
    let mut cum_boko_haram_events = 0;
    for record in run {
        cum_violent_events += record.violent_events;
        cum_fatalities += record.total_fatalities;
        cum_boko_haram_events += record.boko_haram_events;
        record.cumulative = CumulativeExposure {
            cum_violent_events,
            cum_fatalities,
            cum_boko_haram_events,
            years_since_first_conflict: first_violent_year
                .map(|first| u32::try_from((record.key.year - first).max(0)).unwrap_or(0)),
            ever_exposed: cum_violent_events > 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn event(
        region: &str,
        sub_region: &str,
        year: i32,
        event_type: &str,
        fatalities: u32,
        is_violent: bool,
        is_boko_haram: bool,
    ) -> CleanEvent {
        CleanEvent {
            region: region.to_string(),
            sub_region: sub_region.to_string(),
            event_date: NaiveDate::from_ymd_opt(year, 6, 15).unwrap(),
            year,
            event_type: event_type.to_string(),
            fatalities,
            is_violent,
            is_boko_haram,
        }
    }

    #[test]
    fn aggregates_mixed_cell() {
        let events = vec![
            event("Borno", "Gwoza", 2014, "Battles", 10, true, false),
            event("Borno", "Gwoza", 2014, "Protests", 0, false, false),
            event(
                "Borno",
                "Gwoza",
                2014,
                "Violence against civilians",
                3,
                true,
                true,
            ),
        ];

        let records = aggregate_location_years(&events);
        assert_eq!(records.len(), 1);

        let cell = &records[0];
        assert_eq!(cell.total_events, 3);
        assert_eq!(cell.total_fatalities, 13);
        assert_eq!(cell.violent_events, 2);
        assert_eq!(cell.violent_fatalities, 13);
        assert_eq!(cell.boko_haram_events, 1);
        assert_eq!(cell.boko_haram_fatalities, 3);
        assert_eq!(cell.event_type_breakdown["Battles"], 1);
        assert_eq!(cell.event_type_breakdown["Protests"], 1);
        assert!(cell.any_violent_conflict);
        assert!(cell.any_boko_haram);
    }

    #[test]
    fn computes_exact_conditional_sums_per_cell() {
        let events = vec![
            event("Borno", "Gwoza", 2014, "Battles", 10, true, true),
            event("Borno", "Gwoza", 2014, "Battles", 5, true, false),
            event("Borno", "Gwoza", 2014, "Protests", 0, false, false),
            event("Yobe", "Gujba", 2014, "Violence against civilians", 20, true, true),
        ];

        let records = aggregate_location_years(&events);
        assert_eq!(records.len(), 2);

        let borno = &records[0];
        assert_eq!(borno.key.region, "Borno");
        assert_eq!(borno.total_events, 3);
        assert_eq!(borno.total_fatalities, 15);
        assert_eq!(borno.violent_events, 2);
        assert_eq!(borno.violent_fatalities, 15);
        assert_eq!(borno.boko_haram_events, 1);
        assert_eq!(borno.boko_haram_fatalities, 10);

        let yobe = &records[1];
        assert_eq!(yobe.key.region, "Yobe");
        assert_eq!(yobe.total_fatalities, 20);
        assert_eq!(yobe.violent_fatalities, 20);
        assert_eq!(yobe.boko_haram_fatalities, 20);
    }

    #[test]
    fn splits_cells_on_every_key_part() {
        let events = vec![
            event("Borno", "Gwoza", 2014, "Battles", 1, true, false),
            event("Borno", "Jere", 2014, "Battles", 1, true, false),
            event("Borno", "Gwoza", 2015, "Battles", 1, true, false),
            event("Yobe", "Gwoza", 2014, "Battles", 1, true, false),
        ];

        let records = aggregate_location_years(&events);
        assert_eq!(records.len(), 4);
        for cell in &records {
            assert_eq!(cell.total_events, 1);
        }
    }

    #[test]
    fn group_sums_match_ungrouped_conditional_totals() {
        let events = vec![
            event("Borno", "Gwoza", 2013, "Battles", 5, true, true),
            event("Borno", "Gwoza", 2014, "Protests", 2, false, false),
            event("Borno", "Jere", 2014, "Battles", 7, true, false),
            event("Yobe", "Gujba", 2014, "Violence against civilians", 4, true, true),
            event("Kano", "Nassarawa", 2015, "Riots", 1, false, false),
            event("Kano", "Nassarawa", 2015, "Battles", 0, true, false),
        ];

        let ungrouped_violent_fatalities: u64 = events
            .iter()
            .filter(|e| e.is_violent)
            .map(|e| u64::from(e.fatalities))
            .sum();
        let ungrouped_boko_fatalities: u64 = events
            .iter()
            .filter(|e| e.is_boko_haram)
            .map(|e| u64::from(e.fatalities))
            .sum();
        let ungrouped_violent_events =
            u64::try_from(events.iter().filter(|e| e.is_violent).count()).unwrap();

        let records = aggregate_location_years(&events);
        let grouped_violent_fatalities: u64 = records.iter().map(|r| r.violent_fatalities).sum();
        let grouped_boko_fatalities: u64 = records.iter().map(|r| r.boko_haram_fatalities).sum();
        let grouped_violent_events: u64 = records.iter().map(|r| r.violent_events).sum();

        assert_eq!(grouped_violent_fatalities, ungrouped_violent_fatalities);
        assert_eq!(grouped_boko_fatalities, ungrouped_boko_fatalities);
        assert_eq!(grouped_violent_events, ungrouped_violent_events);
    }

    #[test]
    fn conditional_fatalities_never_exceed_the_total() {
        let events = vec![
            event("Borno", "Gwoza", 2014, "Battles", 10, true, true),
            event("Borno", "Gwoza", 2014, "Protests", 2, false, false),
            event("Borno", "Gwoza", 2014, "Strategic developments", 5, false, true),
            event("Yobe", "Gujba", 2014, "Riots", 1, false, false),
        ];

        for record in &aggregate_location_years(&events) {
            assert!(record.violent_fatalities <= record.total_fatalities);
            assert!(record.boko_haram_fatalities <= record.total_fatalities);
        }
    }

    #[test]
    fn cumulative_measures_walk_each_location() {
        let events = vec![
            event("Borno", "Jere", 2010, "Protests", 1, false, false),
            event("Borno", "Jere", 2012, "Battles", 4, true, false),
            event("Borno", "Jere", 2012, "Battles", 2, true, true),
            event("Borno", "Jere", 2013, "Battles", 1, true, false),
        ];

        let mut records = aggregate_location_years(&events);
        add_cumulative_measures(&mut records);

        let by_year: BTreeMap<i32, &LocationYearRecord> =
            records.iter().map(|r| (r.key.year, r)).collect();

        let pre = &by_year[&2010].cumulative;
        assert_eq!(pre.cum_violent_events, 0);
        assert_eq!(pre.cum_fatalities, 1);
        assert_eq!(pre.years_since_first_conflict, Some(0), "clipped at zero");
        assert!(!pre.ever_exposed);

        let onset = &by_year[&2012].cumulative;
        assert_eq!(onset.cum_violent_events, 2);
        assert_eq!(onset.cum_fatalities, 7);
        assert_eq!(onset.cum_boko_haram_events, 1);
        assert_eq!(onset.years_since_first_conflict, Some(0));
        assert!(onset.ever_exposed);

        let after = &by_year[&2013].cumulative;
        assert_eq!(after.cum_violent_events, 3);
        assert_eq!(after.years_since_first_conflict, Some(1));
        assert!(after.ever_exposed);
    }

    #[test]
    fn never_violent_location_has_no_first_conflict_year() {
        let events = vec![
            event("Lagos", "Ikeja", 2014, "Protests", 0, false, false),
            event("Lagos", "Ikeja", 2016, "Riots", 1, false, false),
        ];

        let mut records = aggregate_location_years(&events);
        add_cumulative_measures(&mut records);

        for record in &records {
            assert_eq!(record.cumulative.years_since_first_conflict, None);
            assert!(!record.cumulative.ever_exposed);
        }
    }

    #[test]
    fn cumulative_runs_do_not_leak_across_locations() {
        let events = vec![
            event("Borno", "Gwoza", 2012, "Battles", 5, true, false),
            event("Borno", "Jere", 2013, "Protests", 0, false, false),
        ];

        let mut records = aggregate_location_years(&events);
        add_cumulative_measures(&mut records);

        let jere = records
            .iter()
            .find(|r| r.key.sub_region == "Jere")
            .unwrap();
        assert_eq!(jere.cumulative.cum_violent_events, 0);
        assert_eq!(jere.cumulative.years_since_first_conflict, None);
    }

    #[test]
    fn counts_cells_where_actor_attribution_exceeds_violent() {
        let events = vec![
            // Attributed but non-violent category, with fatalities.
            event("Borno", "Gwoza", 2014, "Strategic developments", 3, false, true),
            // Attributed and violent; the two totals tie.
            event("Borno", "Jere", 2014, "Battles", 1, true, true),
        ];

        let records = aggregate_location_years(&events);
        assert_eq!(boko_haram_exceeds_violent(&records), 1);
    }
}
