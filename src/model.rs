/// Core data types for the Rio Negro monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic, no I/O, and no external dependencies beyond the
/// serde/chrono derives — only types.

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Observation types
// ---------------------------------------------------------------------------

/// A single daily river-level reading.
///
/// Produced by `ingest::records::parse_records` from one raw dataset entry.
/// Dates need not be contiguous — a missing day is a gap in the series,
/// never a zero reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Calendar date of the reading (day resolution, no timezone).
    pub date: NaiveDate,
    /// River level in meters above the gauge zero.
    pub level_m: f64,
}

/// An ordered sequence of observations, sorted ascending by date.
///
/// Duplicate dates are allowed (corrected or re-ingested readings); the
/// sort is stable, so duplicates keep their input order. The Day-Month
/// Aligner resolves them with its last-write-wins rule. Downstream stages
/// derive new `Series` values rather than mutating one in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub observations: Vec<Observation>,
}

impl Series {
    /// Build a series from observations in any order. Sorts ascending by
    /// date with a stable sort so equal-date entries keep input order.
    pub fn from_unsorted(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|obs| obs.date);
        Series { observations }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The most recent observation, if any.
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// The level values in date order.
    pub fn levels(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.level_m).collect()
    }
}

// ---------------------------------------------------------------------------
// Statistics types
// ---------------------------------------------------------------------------

/// River tendency over the last two readings, shown on the dashboard's
/// status tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiverStatus {
    /// Level increased since the previous reading.
    Rising,
    /// Level decreased since the previous reading.
    Falling,
    /// No change, or fewer than two readings.
    #[default]
    Stable,
}

impl std::fmt::Display for RiverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiverStatus::Rising => write!(f, "rising"),
            RiverStatus::Falling => write!(f, "falling"),
            RiverStatus::Stable => write!(f, "stable"),
        }
    }
}

/// Summary statistics derived from a series snapshot.
///
/// Produced by `analysis::statistics::summarize`; purely computed, never
/// mutated after creation. The all-zero `Default` value (with `None` dates
/// and `Stable` status) is the valid summary of an empty series — empty
/// input is a displayable "no data" state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatisticsSummary {
    /// Level of the most recent observation.
    pub current: f64,
    pub current_date: Option<NaiveDate>,
    /// Global maximum, paired with the date of its first occurrence.
    pub max: f64,
    pub max_date: Option<NaiveDate>,
    /// Global minimum, paired with the date of its first occurrence.
    pub min: f64,
    pub min_date: Option<NaiveDate>,
    /// `current` minus the previous observation's level; 0 with fewer
    /// than two observations.
    pub trend: f64,
    /// `current` minus the oldest observation in the trailing 7-day
    /// window ending at `current_date`. `None` when fewer than two
    /// observations fall in that window (insufficient data).
    pub variation_7d: Option<f64>,
    pub status: RiverStatus,
    /// Arithmetic mean of all levels.
    pub average: f64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when obtaining or deserializing a dataset as a
/// whole. Per-record malformation is not an error — the parser and the
/// CSV converter skip bad records and surface a count instead.
#[derive(Debug, PartialEq)]
pub enum DatasetError {
    /// The dataset file could not be read or written.
    Io(String),
    /// Non-2xx HTTP response while fetching a remote dataset.
    Http(u16),
    /// The payload could not be deserialized into dataset records.
    Malformed(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(msg) => write!(f, "I/O error: {}", msg),
            DatasetError::Http(code) => write!(f, "HTTP error: {}", code),
            DatasetError::Malformed(msg) => write!(f, "Malformed dataset: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {}
