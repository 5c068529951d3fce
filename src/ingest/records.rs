/// Raw dataset record parsing.
///
/// The canonical JSON dataset is an array of `{data, nivel_rio,
/// encheu_vazou}` entries. Historical exports are inconsistent about
/// numeric typing — levels appear both as JSON numbers and as numeric
/// strings — so the record mirror accepts either.
///
/// # Skip policy
/// A record whose date or level cannot be parsed is skipped and counted,
/// never aborting the whole load and never silently vanishing: the count
/// is surfaced in [`ParseOutcome`] for callers to log.
///
/// # Date handling
/// Dates are built from explicit year/month/day components rather than
/// through a datetime constructor, so a reading taken near a UTC midnight
/// boundary can never shift to the neighboring day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Observation, Series};

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// One entry of the canonical JSON dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawRecord {
    /// Reading date as `YYYY-MM-DD`.
    #[serde(rename = "data")]
    pub date: String,
    /// River level in meters; number or numeric string.
    #[serde(rename = "nivel_rio")]
    pub level: LevelValue,
    /// Agency-reported daily change in centimeters, when present.
    #[serde(rename = "encheu_vazou", default, skip_serializing_if = "Option::is_none")]
    pub daily_change_cm: Option<LevelValue>,
}

/// A numeric dataset field that may be encoded as a JSON number or as a
/// numeric string (older exports quote their values).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LevelValue {
    Number(f64),
    Text(String),
}

impl LevelValue {
    /// Interpret the value as an `f64`. Returns `None` for non-numeric
    /// text and for non-finite numbers.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            LevelValue::Number(v) => *v,
            LevelValue::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Result of a parsing pass: the ordered series plus the number of
/// records skipped as malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub series: Series,
    pub skipped: usize,
}

/// Parse a `YYYY-MM-DD` date string from its explicit components.
pub fn parse_record_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert raw dataset records into an ordered observation series.
///
/// Output is sorted ascending by date with a stable sort; duplicate dates
/// are preserved in input order for the aligner's last-write-wins rule.
pub fn parse_records(records: &[RawRecord]) -> ParseOutcome {
    let mut observations = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for record in records {
        let (Some(date), Some(level_m)) =
            (parse_record_date(&record.date), record.level.as_f64())
        else {
            skipped += 1;
            continue;
        };
        observations.push(Observation { date, level_m });
    }

    ParseOutcome {
        series: Series::from_unsorted(observations),
        skipped,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
