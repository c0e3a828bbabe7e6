#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Joins survey respondents against the conflict panel over their
//! school-age years.
//!
//! The join is a pure function of the respondent, the frozen panel, and
//! the configured age bounds: same inputs, same features, bit for bit.
//! Years outside the panel's coverage contribute zero rather than
//! poisoning the sums, and a respondent whose location matches nothing at
//! all still comes back with well-defined all-zero features.

use conflict_panel_exposure_models::{ExposureFeatures, ExposureWindow, SchoolAgeBounds};
use conflict_panel_panel_models::ConflictPanel;
use conflict_panel_survey_models::Respondent;

/// One respondent's school-age exposure, with enough context to tell an
/// all-zero result from an unmatched location.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortExposure {
    pub features: ExposureFeatures,
    pub window: ExposureWindow,
    /// Window years that found a panel cell or rollup.
    pub matched_years: u32,
}

impl CohortExposure {
    /// Returns `true` if the respondent had school-age years to match but
    /// their location never appeared in the panel.
    #[must_use]
    pub const fn is_unmatched(&self) -> bool {
        self.matched_years == 0 && !self.window.is_empty()
    }
}

/// Accumulates one respondent's exposure over their school-age window.
///
/// Each window year reads the respondent's (region, sub-region) cell,
/// falling back to the region rollup per the panel's lookup policy. An
/// empty window yields the all-zero default.
#[must_use]
pub fn school_age_exposure(
    respondent: &Respondent,
    panel: &ConflictPanel,
    bounds: SchoolAgeBounds,
) -> CohortExposure {
    let window = ExposureWindow::school_age(respondent.birth_year, respondent.survey_year, bounds);
    let mut features = ExposureFeatures::default();
    let mut matched_years = 0;

    for year in window.years() {
        let Some(cell) =
            panel.year_exposure(&respondent.region, respondent.sub_region.as_deref(), year)
        else {
            continue;
        };
        matched_years += 1;
        features.violent_events_school_age += cell.violent_events;
        features.fatalities_school_age += cell.total_fatalities;
        features.boko_haram_events_school_age += cell.boko_haram_events;
        if cell.total_events > 0 {
            features.years_exposed_school_age += 1;
        }
        if cell.high_conflict {
            features.high_conflict_school_age = true;
        }
    }

    features.exposed_during_school_age = features.violent_events_school_age > 0;
    if !window.is_empty() {
        #[allow(clippy::cast_precision_loss)] // event counts are nowhere near 2^52
        let mean = features.violent_events_school_age as f64 / f64::from(window.len());
        features.conflict_exposure_index = mean;
    }

    let exposure = CohortExposure {
        features,
        window,
        matched_years,
    };
    if exposure.is_unmatched() {
        log::debug!(
            "No panel data for location of respondent {} ({})",
            respondent.respondent_id,
            respondent.region
        );
    }
    exposure
}

#[cfg(test)]
mod tests {
    use conflict_panel_conflict_models::IntensityBand;
    use conflict_panel_panel_models::{LocationYearKey, LocationYearRecord};

    use super::*;

    fn cell(
        region: &str,
        sub_region: &str,
        year: i32,
        violent: u64,
        fatalities: u64,
        band: IntensityBand,
    ) -> LocationYearRecord {
        let mut record = LocationYearRecord::new(LocationYearKey::new(region, sub_region, year));
        record.total_events = violent + 1;
        record.total_fatalities = fatalities;
        record.violent_events = violent;
        record.violent_fatalities = fatalities;
        record.boko_haram_events = violent / 2;
        record.any_conflict = true;
        record.any_violent_conflict = violent > 0;
        record.intensity_band = band;
        record
    }

    fn respondent(region: &str, sub_region: Option<&str>, birth: i32, survey: i32) -> Respondent {
        Respondent {
            respondent_id: "r000001".to_string(),
            region: region.to_string(),
            sub_region: sub_region.map(str::to_string),
            birth_year: birth,
            survey_year: survey,
            years_of_schooling: 9,
            demographics: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn sums_window_years_and_ignores_gaps() {
        let panel = ConflictPanel::new(vec![
            cell("Borno", "Gwoza", 2009, 2, 5, IntensityBand::Medium),
            cell("Borno", "Gwoza", 2014, 9, 30, IntensityBand::VeryHigh),
            // Outside the window; must not contribute.
            cell("Borno", "Gwoza", 2019, 50, 100, IntensityBand::VeryHigh),
        ]);

        let exposure =
            school_age_exposure(&respondent("Borno", Some("Gwoza"), 2000, 2018), &panel, SchoolAgeBounds::default());

        assert_eq!(exposure.window.start(), 2006);
        assert_eq!(exposure.window.end(), 2018);
        assert_eq!(exposure.matched_years, 2);

        let features = &exposure.features;
        assert_eq!(features.violent_events_school_age, 11);
        assert_eq!(features.fatalities_school_age, 35);
        assert_eq!(features.boko_haram_events_school_age, 5);
        assert_eq!(features.years_exposed_school_age, 2);
        assert!(features.high_conflict_school_age);
        assert!(features.exposed_during_school_age);
        assert!((features.conflict_exposure_index - 11.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn empty_window_yields_zero_features() {
        let panel = ConflictPanel::new(vec![cell(
            "Borno",
            "Gwoza",
            2012,
            4,
            8,
            IntensityBand::High,
        )]);

        let exposure = school_age_exposure(
            &respondent("Borno", Some("Gwoza"), 2010, 2013),
            &panel,
            SchoolAgeBounds::default(),
        );

        assert!(exposure.window.is_empty());
        assert!(!exposure.is_unmatched(), "empty window is not missing data");
        assert_eq!(exposure.features, ExposureFeatures::default());
    }

    #[test]
    fn respondent_without_sub_region_reads_rollups() {
        let panel = ConflictPanel::new(vec![
            cell("Yobe", "Damaturu", 2010, 3, 6, IntensityBand::High),
            cell("Yobe", "Gujba", 2010, 2, 2, IntensityBand::Low),
        ]);

        let exposure = school_age_exposure(
            &respondent("Yobe", None, 2000, 2018),
            &panel,
            SchoolAgeBounds::default(),
        );

        assert_eq!(exposure.matched_years, 1);
        assert_eq!(exposure.features.violent_events_school_age, 5);
        assert_eq!(exposure.features.fatalities_school_age, 8);
        assert!(exposure.features.high_conflict_school_age);
    }

    #[test]
    fn unmatched_region_is_flagged_with_zero_features() {
        let panel = ConflictPanel::new(vec![cell(
            "Borno",
            "Gwoza",
            2012,
            4,
            8,
            IntensityBand::High,
        )]);

        let exposure = school_age_exposure(
            &respondent("Ekiti", Some("Ado"), 1995, 2018),
            &panel,
            SchoolAgeBounds::default(),
        );

        assert!(exposure.is_unmatched());
        assert_eq!(exposure.features, ExposureFeatures::default());
        assert!(!exposure.features.exposed_during_school_age);
        assert!(
            (exposure.features.conflict_exposure_index - 0.0).abs() < f64::EPSILON,
            "index stays zero when nothing matched"
        );
    }

    #[test]
    fn widening_bounds_never_decreases_sums() {
        let panel = ConflictPanel::new(vec![
            cell("Borno", "Gwoza", 2007, 1, 2, IntensityBand::Low),
            cell("Borno", "Gwoza", 2010, 3, 4, IntensityBand::Medium),
            cell("Borno", "Gwoza", 2016, 5, 9, IntensityBand::High),
        ]);
        let subject = respondent("Borno", Some("Gwoza"), 2000, 2018);

        let narrow = school_age_exposure(
            &subject,
            &panel,
            SchoolAgeBounds {
                start_age: 8,
                end_age: 14,
            },
        );
        let wide = school_age_exposure(&subject, &panel, SchoolAgeBounds::default());

        assert!(
            wide.features.violent_events_school_age >= narrow.features.violent_events_school_age
        );
        assert!(wide.features.fatalities_school_age >= narrow.features.fatalities_school_age);
        assert!(
            wide.features.years_exposed_school_age >= narrow.features.years_exposed_school_age
        );
    }

    #[test]
    fn same_inputs_same_features() {
        let panel = ConflictPanel::new(vec![
            cell("Borno", "Gwoza", 2009, 2, 5, IntensityBand::Medium),
            cell("Borno", "Gwoza", 2014, 9, 30, IntensityBand::VeryHigh),
        ]);
        let subject = respondent("Borno", Some("Gwoza"), 2000, 2018);

        let first = school_age_exposure(&subject, &panel, SchoolAgeBounds::default());
        let second = school_age_exposure(&subject, &panel, SchoolAgeBounds::default());
        assert_eq!(first, second);
    }
}
