#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Conflict event taxonomy and intensity band definitions.
//!
//! This crate defines the canonical classification rules shared across the
//! conflict-panel system: which event categories count as violent conflict,
//! which actor names attribute an event to the Boko Haram insurgency, which
//! regions form the Northeast treatment group, and the ordered intensity
//! bands assigned to location-years.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Event categories counted as violent conflict.
///
/// Everything else (protests, riots, strategic developments, ...) still
/// contributes to total event counts but never to violent measures.
pub const VIOLENT_EVENT_TYPES: &[&str] = &[
    "Battles",
    "Explosions/Remote violence",
    "Violence against civilians",
];

/// Lowercase name fragments that attribute an event to Boko Haram or its
/// ISWAP splinter. Matched as substrings against lowercased actor names.
pub const BOKO_HARAM_ACTOR_PATTERNS: &[&str] =
    &["boko haram", "jama'atu ahlis", "iswap", "islamic state"];

/// Regions forming the Northeast treatment group.
pub const NORTHEAST_REGIONS: &[&str] = &["Adamawa", "Bauchi", "Borno", "Gombe", "Taraba", "Yobe"];

/// Year the insurgency turned violent. Used as the default pivot for
/// cohort treatment indicators.
pub const CONFLICT_ONSET_YEAR: i32 = 2009;

/// Returns `true` if the event category counts as violent conflict.
#[must_use]
pub fn is_violent_type(event_type: &str) -> bool {
    let trimmed = event_type.trim();
    VIOLENT_EVENT_TYPES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(trimmed))
}

/// Returns `true` if the actor name matches a known Boko Haram pattern.
///
/// Matching is case-insensitive and substring-based so that composite actor
/// names like "Boko Haram - Bakura Faction" still attribute correctly.
#[must_use]
pub fn is_boko_haram_actor(actor: &str) -> bool {
    let lower = actor.to_lowercase();
    BOKO_HARAM_ACTOR_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Returns `true` if the region belongs to the Northeast treatment group.
#[must_use]
pub fn is_northeast_region(region: &str) -> bool {
    NORTHEAST_REGIONS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(region.trim()))
}

/// Relative conflict intensity of a location-year, from quantiles of the
/// violent event distribution.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IntensityBand {
    /// Bottom band. Also assigned to location-years with zero violent events.
    Low = 1,
    Medium = 2,
    High = 3,
    /// Top quartile of violent event counts.
    VeryHigh = 4,
}

impl IntensityBand {
    /// Returns the numeric rank of this band (1 = lowest).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns `true` if this band marks a high-conflict location-year.
    #[must_use]
    pub const fn is_high_conflict(self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }

    /// Human-readable label used in exported tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Returns all bands in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::VeryHigh]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_violent_categories() {
        assert!(is_violent_type("Battles"));
        assert!(is_violent_type("Explosions/Remote violence"));
        assert!(is_violent_type("Violence against civilians"));
        assert!(is_violent_type("  battles  "));
        assert!(!is_violent_type("Protests"));
        assert!(!is_violent_type("Riots"));
        assert!(!is_violent_type(""));
    }

    #[test]
    fn matches_boko_haram_actor_variants() {
        assert!(is_boko_haram_actor("Boko Haram - Jama'atu Ahlis Sunna"));
        assert!(is_boko_haram_actor("Islamic State West Africa Province"));
        assert!(is_boko_haram_actor("ISWAP: Lake Chad Faction"));
        assert!(!is_boko_haram_actor("Military Forces of Nigeria"));
        assert!(!is_boko_haram_actor("Fulani Ethnic Militia"));
        assert!(!is_boko_haram_actor(""));
    }

    #[test]
    fn northeast_membership() {
        for region in NORTHEAST_REGIONS {
            assert!(is_northeast_region(region));
        }
        assert!(is_northeast_region("borno"));
        assert!(!is_northeast_region("Lagos"));
        assert!(!is_northeast_region("Kano"));
    }

    #[test]
    fn bands_order_by_severity() {
        let bands = IntensityBand::all();
        for pair in bands.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].value() < pair[1].value());
        }
    }

    #[test]
    fn high_conflict_covers_top_two_bands() {
        assert!(!IntensityBand::Low.is_high_conflict());
        assert!(!IntensityBand::Medium.is_high_conflict());
        assert!(IntensityBand::High.is_high_conflict());
        assert!(IntensityBand::VeryHigh.is_high_conflict());
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(IntensityBand::VeryHigh.label(), "Very High");
        assert_eq!(IntensityBand::Low.label(), "Low");
        assert_eq!(IntensityBand::VeryHigh.to_string(), "VERY_HIGH");
    }
}
