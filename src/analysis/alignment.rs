/// Day-month grid alignment for year-over-year overlays.
///
/// The yearly chart plots each year's series against one shared axis of
/// `DD-Mon` labels. The label sequence is the same for every year and
/// always includes `29-Feb`, so leap and non-leap years line up slot for
/// slot — a non-leap year simply leaves the leap-day slot empty. Slots
/// for dates without an observation stay `None`; chart layers render
/// those as gaps, never as interpolated or zero values.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::Series;

// ---------------------------------------------------------------------------
// Canonical label grid
// ---------------------------------------------------------------------------

/// Number of slots in the aligned grid: a full leap-year calendar.
pub const GRID_SLOTS: usize = 366;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Days per month on the canonical (leap-year) calendar.
const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Slot index of the first day of each month.
const MONTH_OFFSETS: [usize; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// The canonical 366-label `DD-Mon` sequence, identical across years.
pub fn day_month_labels() -> Vec<String> {
    let mut labels = Vec::with_capacity(GRID_SLOTS);
    for (month, &days) in DAYS_IN_MONTH.iter().enumerate() {
        for day in 1..=days {
            labels.push(format!("{:02}-{}", day, MONTH_ABBR[month]));
        }
    }
    labels
}

/// The `DD-Mon` label for a date.
pub fn day_month_label(date: NaiveDate) -> String {
    format!("{:02}-{}", date.day(), MONTH_ABBR[date.month0() as usize])
}

/// Slot index of a date on the canonical grid.
pub fn day_month_index(date: NaiveDate) -> usize {
    MONTH_OFFSETS[date.month0() as usize] + date.day() as usize - 1
}

// ---------------------------------------------------------------------------
// Year alignment
// ---------------------------------------------------------------------------

/// One year's series re-indexed onto the canonical grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGrid {
    pub year: i32,
    /// Exactly [`GRID_SLOTS`] entries; `None` marks a data gap.
    pub values: Vec<Option<f64>>,
}

/// Re-index one calendar year of a series onto the 366-slot grid.
///
/// Observations are visited in ascending date order and each one
/// overwrites its slot, so for duplicate dates the last record in input
/// order wins — the corrected reading of a re-ingested batch replaces
/// the original, never an average of the two.
pub fn align_year(series: &Series, year: i32) -> Vec<Option<f64>> {
    let mut values = vec![None; GRID_SLOTS];
    for obs in &series.observations {
        if obs.date.year() == year {
            values[day_month_index(obs.date)] = Some(obs.level_m);
        }
    }
    values
}

/// Align every year in `year_start..=year_end` that has observations,
/// in ascending year order. Years without data are omitted entirely
/// rather than producing all-`None` grids.
pub fn align_by_year(series: &Series, year_start: i32, year_end: i32) -> Vec<YearGrid> {
    (year_start..=year_end)
        .filter(|&year| {
            series
                .observations
                .iter()
                .any(|obs| obs.date.year() == year)
        })
        .map(|year| YearGrid {
            year,
            values: align_year(series, year),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Reference index
// ---------------------------------------------------------------------------

/// Label of the most recent observation across all years — the
/// same-day-of-year marker the chart draws through every year's trace.
pub fn reference_label(series: &Series) -> Option<String> {
    series.last().map(|obs| day_month_label(obs.date))
}

/// Slot index of the most recent observation across all years.
pub fn reference_index(series: &Series) -> Option<usize> {
    series.last().map(|obs| day_month_index(obs.date))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
