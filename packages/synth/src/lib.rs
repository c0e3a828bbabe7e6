#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Seeded synthetic source tables.
//!
//! Produces raw event and respondent tables with the statistical shape of
//! Nigerian conflict data: northeast regions run hot once the insurgency
//! starts and fatality counts are heavily zero-inflated. A small share of
//! rows carry the blank cells and malformed values real extracts do, so the
//! normalizer's recovery paths stay exercised. Both generators are
//! deterministic in the configured seed.

use std::collections::BTreeMap;

use conflict_panel_conflict_models::{CONFLICT_ONSET_YEAR, is_northeast_region};
use conflict_panel_event_models::RawEvent;
use conflict_panel_survey_models::RawRespondent;
use rand::distributions::WeightedIndex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Poisson};

/// Regions synthetic data is drawn over. The first three are northeast
/// states, the rest a spread of comparison states.
pub const REGIONS: &[&str] = &["Borno", "Yobe", "Adamawa", "Kano", "Lagos", "Rivers", "Kaduna"];

const SUB_REGIONS_PER_REGION: u32 = 10;

const EVENT_TYPES: &[&str] = &[
    "Battles",
    "Violence against civilians",
    "Explosions/Remote violence",
    "Protests",
    "Riots",
];
const EVENT_TYPE_WEIGHTS: &[u32] = &[30, 25, 15, 20, 10];

/// Zero-inflated fatality outcomes and their relative weights.
const FATALITY_VALUES: &[u32] = &[0, 1, 2, 3, 5, 10, 20];
const FATALITY_WEIGHTS: &[u32] = &[65, 10, 10, 5, 5, 3, 2];

const BOKO_HARAM_ACTOR: &str = "Boko Haram - Jama'atu Ahlis Sunna Lidda'awati wal-Jihad";
const OTHER_ACTORS: &[&str] = &[
    "Fulani Ethnic Militia (Nigeria)",
    "Unidentified Armed Group (Nigeria)",
    "Communal Militia (Nigeria)",
];
const SECOND_ACTORS: &[&str] = &["Military Forces of Nigeria (2015-)", "Civilians (Nigeria)"];

const SURVEY_YEARS: &[i32] = &[2013, 2018];

/// Mean events per region-year in the northeast from the onset year onward.
const NORTHEAST_POST_ONSET_RATE: f64 = 10.0;
/// Mean events per region-year everywhere else.
const BASELINE_RATE: f64 = 2.0;

/// Share of post-onset northeast events attributed to Boko Haram.
const BOKO_HARAM_SHARE: f64 = 0.6;

const MISSING_SUB_REGION_RATE: f64 = 0.04;
const MALFORMED_DATE_RATE: f64 = 0.02;
const BLANK_FATALITIES_RATE: f64 = 0.02;
const FLOAT_FATALITIES_RATE: f64 = 0.05;
const MISSING_ID_RATE: f64 = 0.03;
const SURVEY_SUB_REGION_RATE: f64 = 0.5;
const OVER_RANGE_SCHOOLING_RATE: f64 = 0.02;

/// Controls for the synthetic generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthConfig {
    /// Seed for both generators. The same seed reproduces the same tables.
    pub seed: u64,
    /// First calendar year events are generated for.
    pub start_year: i32,
    /// Last calendar year events are generated for, inclusive.
    pub end_year: i32,
    /// Number of respondent rows to generate.
    pub respondents: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_year: 2000,
            end_year: 2023,
            respondents: 2000,
        }
    }
}

/// Generates a raw event table.
///
/// Event counts per region-year are Poisson, with an elevated mean in
/// northeast regions from [`CONFLICT_ONSET_YEAR`] onward.
///
/// # Panics
///
/// Panics if a sampling weight table is empty or all-zero (the embedded
/// tables are neither).
#[must_use]
pub fn synthetic_events(config: &SynthConfig) -> Vec<RawEvent> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let event_types = WeightedIndex::new(EVENT_TYPE_WEIGHTS).expect("weights are positive");
    let fatalities = WeightedIndex::new(FATALITY_WEIGHTS).expect("weights are positive");

    let mut events = Vec::new();
    for &region in REGIONS {
        for year in config.start_year..=config.end_year {
            let rate = if is_northeast_region(region) && year >= CONFLICT_ONSET_YEAR {
                NORTHEAST_POST_ONSET_RATE
            } else {
                BASELINE_RATE
            };
            for _ in 0..sample_count(&mut rng, rate) {
                events.push(synthetic_event(&mut rng, region, year, &event_types, &fatalities));
            }
        }
    }

    log::info!(
        "generated {} synthetic events for {} regions",
        events.len(),
        REGIONS.len()
    );

    events
}

/// Generates a raw survey respondent table.
///
/// Respondents are spread uniformly over the synthetic regions with birth
/// years straddling the onset cohort cutoff, so every downstream treatment
/// group is populated. Half the rows omit the sub-region, matching how
/// survey extracts usually arrive.
#[must_use]
pub fn synthetic_respondents(config: &SynthConfig) -> Vec<RawRespondent> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1));

    let mut respondents = Vec::with_capacity(config.respondents);
    for index in 0..config.respondents {
        respondents.push(synthetic_respondent(&mut rng, index));
    }

    log::info!("generated {} synthetic respondents", respondents.len());

    respondents
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Poisson samples are small non-negative counts
fn sample_count(rng: &mut ChaCha8Rng, rate: f64) -> u64 {
    Poisson::new(rate).map_or(0, |poisson| poisson.sample(rng) as u64)
}

fn synthetic_event(
    rng: &mut ChaCha8Rng,
    region: &str,
    year: i32,
    event_types: &WeightedIndex<u32>,
    fatalities: &WeightedIndex<u32>,
) -> RawEvent {
    let sub_region = if rng.gen_bool(MISSING_SUB_REGION_RATE) {
        None
    } else {
        Some(format!(
            "{region} LGA {}",
            rng.gen_range(1..=SUB_REGIONS_PER_REGION)
        ))
    };

    let event_date = if rng.gen_bool(MALFORMED_DATE_RATE) {
        Some(format!("mid-{year}"))
    } else {
        Some(format!(
            "{year:04}-{:02}-{:02}",
            rng.gen_range(1..=12),
            rng.gen_range(1..=28)
        ))
    };

    let fatality_count = FATALITY_VALUES[fatalities.sample(rng)];
    let fatalities_cell = if rng.gen_bool(BLANK_FATALITIES_RATE) {
        None
    } else if rng.gen_bool(FLOAT_FATALITIES_RATE) {
        Some(format!("{fatality_count}.0"))
    } else {
        Some(fatality_count.to_string())
    };

    let insurgency_active = is_northeast_region(region) && year >= CONFLICT_ONSET_YEAR;
    let actor1 = if insurgency_active && rng.gen_bool(BOKO_HARAM_SHARE) {
        BOKO_HARAM_ACTOR.to_string()
    } else {
        OTHER_ACTORS[rng.gen_range(0..OTHER_ACTORS.len())].to_string()
    };
    let actor2 = SECOND_ACTORS[rng.gen_range(0..SECOND_ACTORS.len())].to_string();

    RawEvent {
        region: Some(region.to_string()),
        sub_region,
        event_date,
        event_type: Some(EVENT_TYPES[event_types.sample(rng)].to_string()),
        fatalities: fatalities_cell,
        actor1: Some(actor1),
        actor2: Some(actor2),
    }
}

fn synthetic_respondent(rng: &mut ChaCha8Rng, index: usize) -> RawRespondent {
    let region = REGIONS[rng.gen_range(0..REGIONS.len())];

    let respondent_id = if rng.gen_bool(MISSING_ID_RATE) {
        None
    } else {
        Some(format!("c{:05}", index + 1))
    };
    let sub_region = if rng.gen_bool(SURVEY_SUB_REGION_RATE) {
        Some(format!(
            "{region} LGA {}",
            rng.gen_range(1..=SUB_REGIONS_PER_REGION)
        ))
    } else {
        None
    };
    let schooling = if rng.gen_bool(OVER_RANGE_SCHOOLING_RATE) {
        22
    } else {
        rng.gen_range(0..=16)
    };

    let mut demographics = BTreeMap::new();
    demographics.insert(
        "sex".to_string(),
        if rng.gen_bool(0.5) { "F" } else { "M" }.to_string(),
    );
    demographics.insert(
        "urban".to_string(),
        if rng.gen_bool(0.4) { "1" } else { "0" }.to_string(),
    );
    demographics.insert("wealth_quintile".to_string(), rng.gen_range(1..=5).to_string());

    RawRespondent {
        respondent_id,
        region: Some(region.to_string()),
        sub_region,
        birth_year: Some(rng.gen_range(1970..=2012).to_string()),
        survey_year: Some(SURVEY_YEARS[rng.gen_range(0..SURVEY_YEARS.len())].to_string()),
        years_of_schooling: Some(schooling.to_string()),
        demographics,
    }
}
