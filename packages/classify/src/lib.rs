#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Assigns relative intensity bands to location-year panel cells.
//!
//! Bands come from equal-frequency quantiles of the *nonzero* violent event
//! counts; cells without violent events always take the bottom band and
//! never drag the quantile boundaries down. When the data cannot support
//! the requested number of bands (too few distinct counts), classification
//! degrades — quartiles, then terciles, then one band — and logs the
//! degradation instead of failing. Banding never raises.

use conflict_panel_conflict_models::IntensityBand;
use conflict_panel_panel_models::LocationYearRecord;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Default number of intensity bands requested.
pub const DEFAULT_INTENSITY_BANDS: usize = 4;

/// How many bands the classifier actually managed to form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BandingOutcome {
    Quartiles,
    Terciles,
    TwoBands,
    SingleBand,
}

impl BandingOutcome {
    #[must_use]
    pub const fn band_count(self) -> usize {
        match self {
            Self::Quartiles => 4,
            Self::Terciles => 3,
            Self::TwoBands => 2,
            Self::SingleBand => 1,
        }
    }

    const fn from_band_count(count: usize) -> Self {
        match count {
            4 => Self::Quartiles,
            3 => Self::Terciles,
            2 => Self::TwoBands,
            _ => Self::SingleBand,
        }
    }
}

/// Assigns an intensity band to every cell.
///
/// `requested` is clamped to `1..=4`. Returns the outcome actually applied:
/// a four-band request degrades through terciles to one band on sparse
/// data; two- and three-band requests fall straight to one band.
pub fn assign_intensity_bands(
    records: &mut [LocationYearRecord],
    requested: usize,
) -> BandingOutcome {
    let mut nonzero: Vec<u64> = records
        .iter()
        .filter(|record| record.violent_events > 0)
        .map(|record| record.violent_events)
        .collect();
    nonzero.sort_unstable();

    if nonzero.is_empty() {
        apply_bands(records, &[]);
        log::info!("No violent events recorded; every location-year banded Low");
        return BandingOutcome::SingleBand;
    }

    let requested = requested.clamp(1, IntensityBand::all().len());
    for band_count in degradation_chain(requested) {
        if let Some(bounds) = try_quantile_bounds(&nonzero, band_count) {
            apply_bands(records, &bounds);
            let outcome = BandingOutcome::from_band_count(band_count);
            if band_count < requested {
                log::warn!(
                    "Too few distinct violent-event counts for {requested} intensity bands; degraded to {outcome}"
                );
            }
            return outcome;
        }
    }

    apply_bands(records, &[]);
    if requested > 1 {
        log::warn!(
            "Too few distinct violent-event counts for {requested} intensity bands; degraded to a single band"
        );
    }
    BandingOutcome::SingleBand
}

/// Band counts to attempt, in order, excluding the always-valid single band.
fn degradation_chain(requested: usize) -> Vec<usize> {
    match requested {
        4 => vec![4, 3],
        q @ (2 | 3) => vec![q],
        _ => Vec::new(),
    }
}

/// Computes nearest-rank quantile boundaries over sorted nonzero counts,
/// or `None` when they cannot separate `band_count` nonempty bands.
fn try_quantile_bounds(sorted: &[u64], band_count: usize) -> Option<Vec<u64>> {
    let n = sorted.len();
    let bounds: Vec<u64> = (1..band_count)
        .map(|i| sorted[(i * n / band_count).saturating_sub(1)])
        .collect();

    if bounds.windows(2).any(|pair| pair[0] == pair[1]) {
        return None;
    }
    let mut occupied = vec![false; band_count];
    for &value in sorted {
        occupied[band_index(&bounds, value)] = true;
    }
    occupied.iter().all(|&hit| hit).then_some(bounds)
}

/// A value lands in the band counted by how many boundaries it exceeds;
/// values equal to a boundary stay in the lower band.
fn band_index(bounds: &[u64], value: u64) -> usize {
    bounds.iter().filter(|&&bound| value > bound).count()
}

fn apply_bands(records: &mut [LocationYearRecord], bounds: &[u64]) {
    let ladder = band_ladder(bounds.len() + 1);
    for record in records {
        record.intensity_band = if record.violent_events == 0 {
            IntensityBand::Low
        } else {
            ladder[band_index(bounds, record.violent_events)]
        };
    }
}

const fn band_ladder(band_count: usize) -> &'static [IntensityBand] {
    match band_count {
        4 => &[
            IntensityBand::Low,
            IntensityBand::Medium,
            IntensityBand::High,
            IntensityBand::VeryHigh,
        ],
        3 => &[
            IntensityBand::Low,
            IntensityBand::Medium,
            IntensityBand::High,
        ],
        2 => &[IntensityBand::Low, IntensityBand::High],
        _ => &[IntensityBand::Low],
    }
}

#[cfg(test)]
mod tests {
    use conflict_panel_panel_models::LocationYearKey;

    use super::*;

    fn cells(violent_counts: &[u64]) -> Vec<LocationYearRecord> {
        violent_counts
            .iter()
            .enumerate()
            .map(|(i, &violent)| {
                let year = 2000 + i32::try_from(i).unwrap();
                let mut record =
                    LocationYearRecord::new(LocationYearKey::new("Borno", "Gwoza", year));
                record.total_events = violent + 1;
                record.violent_events = violent;
                record
            })
            .collect()
    }

    fn bands(records: &[LocationYearRecord]) -> Vec<IntensityBand> {
        records.iter().map(|r| r.intensity_band).collect()
    }

    #[test]
    fn forms_quartiles_on_spread_counts() {
        let mut records = cells(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let outcome = assign_intensity_bands(&mut records, DEFAULT_INTENSITY_BANDS);

        assert_eq!(outcome, BandingOutcome::Quartiles);
        assert_eq!(
            bands(&records),
            vec![
                IntensityBand::Low,
                IntensityBand::Low,
                IntensityBand::Medium,
                IntensityBand::Medium,
                IntensityBand::High,
                IntensityBand::High,
                IntensityBand::VeryHigh,
                IntensityBand::VeryHigh,
            ]
        );
    }

    #[test]
    fn zero_cells_take_bottom_band_without_dragging_quantiles() {
        let mut records = cells(&[0, 0, 10, 20, 30, 40]);
        let outcome = assign_intensity_bands(&mut records, DEFAULT_INTENSITY_BANDS);

        assert_eq!(outcome, BandingOutcome::Quartiles);
        assert_eq!(
            bands(&records),
            vec![
                IntensityBand::Low,
                IntensityBand::Low,
                IntensityBand::Low,
                IntensityBand::Medium,
                IntensityBand::High,
                IntensityBand::VeryHigh,
            ]
        );
    }

    #[test]
    fn degrades_to_terciles_with_three_distinct_counts() {
        let mut records = cells(&[1, 1, 2, 2, 3, 3]);
        let outcome = assign_intensity_bands(&mut records, DEFAULT_INTENSITY_BANDS);

        assert_eq!(outcome, BandingOutcome::Terciles);
        assert_eq!(
            bands(&records),
            vec![
                IntensityBand::Low,
                IntensityBand::Low,
                IntensityBand::Medium,
                IntensityBand::Medium,
                IntensityBand::High,
                IntensityBand::High,
            ]
        );
        assert!(records.iter().all(|r| r.intensity_band != IntensityBand::VeryHigh));
    }

    #[test]
    fn degrades_to_single_band_with_two_distinct_counts() {
        let mut records = cells(&[1, 1, 2, 2]);
        let outcome = assign_intensity_bands(&mut records, DEFAULT_INTENSITY_BANDS);

        assert_eq!(outcome, BandingOutcome::SingleBand);
        assert!(records.iter().all(|r| r.intensity_band == IntensityBand::Low));
        assert!(records.iter().all(|r| !r.is_high_conflict()));
    }

    #[test]
    fn identical_counts_collapse_to_single_band() {
        let mut records = cells(&[5, 5, 5, 5]);
        let outcome = assign_intensity_bands(&mut records, DEFAULT_INTENSITY_BANDS);
        assert_eq!(outcome, BandingOutcome::SingleBand);
    }

    #[test]
    fn all_zero_counts_band_low_without_failing() {
        let mut records = cells(&[0, 0, 0]);
        let outcome = assign_intensity_bands(&mut records, DEFAULT_INTENSITY_BANDS);

        assert_eq!(outcome, BandingOutcome::SingleBand);
        assert!(records.iter().all(|r| r.intensity_band == IntensityBand::Low));
    }

    #[test]
    fn honors_two_band_request() {
        let mut records = cells(&[1, 2, 3, 4]);
        let outcome = assign_intensity_bands(&mut records, 2);

        assert_eq!(outcome, BandingOutcome::TwoBands);
        assert_eq!(
            bands(&records),
            vec![
                IntensityBand::Low,
                IntensityBand::Low,
                IntensityBand::High,
                IntensityBand::High,
            ]
        );
    }

    #[test]
    fn empty_panel_is_a_no_op() {
        let mut records = cells(&[]);
        let outcome = assign_intensity_bands(&mut records, DEFAULT_INTENSITY_BANDS);
        assert_eq!(outcome, BandingOutcome::SingleBand);
    }
}
