#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Raw and normalized conflict event record types.
//!
//! [`RawEvent`] is the shape an event row has as it comes off a source
//! table: every field optional, every value a string. [`CleanEvent`] is the
//! canonical shape after normalization: required fields resolved, the date
//! parsed, fatalities coerced, and classification flags precomputed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sentinel sub-region for events whose source row has no usable sub-region
/// value. Keeps those events in a real aggregation bucket instead of
/// silently dropping them.
pub const UNKNOWN_SUB_REGION: &str = "Unknown";

/// Sentinel event category for rows with a missing or blank category.
pub const UNKNOWN_EVENT_TYPE: &str = "Unknown";

/// A conflict event row as it arrives from a source table.
///
/// All fields are optional because source extracts routinely carry blank
/// cells; the normalizer decides which absences are recoverable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// First-level administrative division (state).
    #[serde(default)]
    pub region: Option<String>,
    /// Second-level administrative division (LGA).
    #[serde(default)]
    pub sub_region: Option<String>,
    /// Event date as written in the source, parsed during normalization.
    #[serde(default)]
    pub event_date: Option<String>,
    /// Source event category.
    #[serde(default)]
    pub event_type: Option<String>,
    /// Reported fatality count, kept as text until coercion.
    #[serde(default)]
    pub fatalities: Option<String>,
    /// Primary actor name.
    #[serde(default)]
    pub actor1: Option<String>,
    /// Secondary actor name.
    #[serde(default)]
    pub actor2: Option<String>,
}

/// A conflict event normalized to the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanEvent {
    /// Standardized region name.
    pub region: String,
    /// Standardized sub-region name, or [`UNKNOWN_SUB_REGION`].
    pub sub_region: String,
    /// Parsed event date.
    pub event_date: NaiveDate,
    /// Calendar year of the event, derived from `event_date`.
    pub year: i32,
    /// Event category (open set; violence is decided by the taxonomy).
    pub event_type: String,
    /// Fatality count, coerced to a non-negative integer.
    pub fatalities: u32,
    /// Whether the category counts as violent conflict.
    pub is_violent: bool,
    /// Whether either actor matches a Boko Haram pattern.
    pub is_boko_haram: bool,
}

/// Why an event row was dropped during normalization.
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
pub enum EventDropReason {
    /// Row had no region value; the event cannot be placed.
    MissingRegion,
    /// Row had no date, or a date no known format could parse.
    UnparseableDate,
}

impl EventDropReason {
    /// Returns all drop reasons.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::MissingRegion, Self::UnparseableDate]
    }
}
