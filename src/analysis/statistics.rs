/// Summary statistics for the dashboard panel.
///
/// The caller picks the outlier policy: the production dashboard feeds
/// the IQR-filtered series here while the yearly chart keeps the raw
/// series. An empty series is a valid, displayable state — the summary
/// comes back zeroed with `None` dates, never an error.

use chrono::Days;

use crate::model::{RiverStatus, Series, StatisticsSummary};

/// Width of the trailing variation window, in days before the current
/// date (endpoints inclusive).
const VARIATION_WINDOW_DAYS: u64 = 7;

/// Derive the summary panel figures from a series snapshot.
///
/// Definitions:
/// - `current` — level of the last observation by date order.
/// - `max` / `min` — global extrema, dated at their first occurrence.
/// - `trend` — `current` minus the previous level (0 under two readings).
/// - `variation_7d` — `current` minus the oldest level within the
///   trailing 7-day window ending at the current date; `None` when fewer
///   than two observations fall in that window.
/// - `status` — sign of `trend`.
/// - `average` / `count` — mean level and observation count.
pub fn summarize(series: &Series) -> StatisticsSummary {
    let obs = &series.observations;
    let Some(last) = obs.last() else {
        return StatisticsSummary::default();
    };

    let current = last.level_m;
    let current_date = last.date;

    let mut max = obs[0];
    let mut min = obs[0];
    for o in &obs[1..] {
        if o.level_m > max.level_m {
            max = *o;
        }
        if o.level_m < min.level_m {
            min = *o;
        }
    }

    let trend = if obs.len() >= 2 {
        current - obs[obs.len() - 2].level_m
    } else {
        0.0
    };

    let average = obs.iter().map(|o| o.level_m).sum::<f64>() / obs.len() as f64;

    StatisticsSummary {
        current,
        current_date: Some(current_date),
        max: max.level_m,
        max_date: Some(max.date),
        min: min.level_m,
        min_date: Some(min.date),
        trend,
        variation_7d: variation_over_trailing_window(series),
        status: status_from_trend(trend),
        average,
        count: obs.len(),
    }
}

/// Change over the trailing window ending at the most recent date:
/// `current` minus the oldest observation with
/// `date >= current_date − 7 days`. `None` when fewer than two
/// observations fall in the window.
fn variation_over_trailing_window(series: &Series) -> Option<f64> {
    let last = series.last()?;
    let window_start = last.date.checked_sub_days(Days::new(VARIATION_WINDOW_DAYS))?;

    // Observations are date-sorted, so the first one inside the window is
    // the oldest.
    let oldest = series
        .observations
        .iter()
        .find(|obs| obs.date >= window_start)?;

    let in_window = series
        .observations
        .iter()
        .filter(|obs| obs.date >= window_start)
        .count();
    if in_window < 2 {
        return None;
    }

    Some(last.level_m - oldest.level_m)
}

fn status_from_trend(trend: f64) -> RiverStatus {
    if trend > 0.0 {
        RiverStatus::Rising
    } else if trend < 0.0 {
        RiverStatus::Falling
    } else {
        RiverStatus::Stable
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Observation;
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn series(entries: &[(i32, u32, u32, f64)]) -> Series {
        Series::from_unsorted(
            entries
                .iter()
                .map(|&(y, m, d, level_m)| Observation {
                    date: ymd(y, m, d),
                    level_m,
                })
                .collect(),
        )
    }

    // --- Reference example --------------------------------------------------

    #[test]
    fn test_three_day_reference_series() {
        let summary = summarize(&series(&[
            (2024, 1, 1, 10.0),
            (2024, 1, 2, 20.0),
            (2024, 1, 3, 15.0),
        ]));

        assert_eq!(summary.current, 15.0);
        assert_eq!(summary.current_date, Some(ymd(2024, 1, 3)));
        assert_eq!(summary.trend, -5.0);
        assert_eq!(summary.max, 20.0);
        assert_eq!(summary.max_date, Some(ymd(2024, 1, 2)));
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.min_date, Some(ymd(2024, 1, 1)));
        assert_eq!(summary.average, 15.0);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.status, RiverStatus::Falling);
    }

    // --- Empty and degenerate input -----------------------------------------

    #[test]
    fn test_empty_series_yields_zero_summary_with_null_dates() {
        let summary = summarize(&series(&[]));
        assert_eq!(summary, StatisticsSummary::default());
        assert_eq!(summary.current, 0.0);
        assert_eq!(summary.current_date, None);
        assert_eq!(summary.max_date, None);
        assert_eq!(summary.min_date, None);
        assert_eq!(summary.trend, 0.0);
        assert_eq!(summary.variation_7d, None);
        assert_eq!(summary.status, RiverStatus::Stable);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_single_observation_has_zero_trend_and_no_variation() {
        let summary = summarize(&series(&[(2024, 6, 1, 22.5)]));
        assert_eq!(summary.current, 22.5);
        assert_eq!(summary.trend, 0.0);
        assert_eq!(summary.status, RiverStatus::Stable);
        assert_eq!(summary.variation_7d, None, "one reading is insufficient data");
        assert_eq!(summary.max, 22.5);
        assert_eq!(summary.min, 22.5);
        assert_eq!(summary.count, 1);
    }

    // --- Extrema ------------------------------------------------------------

    #[test]
    fn test_extrema_report_first_occurrence_date() {
        let summary = summarize(&series(&[
            (2024, 1, 1, 20.0),
            (2024, 1, 2, 28.0),
            (2024, 1, 3, 28.0), // repeat of the max
            (2024, 1, 4, 14.0),
            (2024, 1, 5, 14.0), // repeat of the min
        ]));
        assert_eq!(summary.max_date, Some(ymd(2024, 1, 2)));
        assert_eq!(summary.min_date, Some(ymd(2024, 1, 4)));
    }

    // --- Trend and status ---------------------------------------------------

    #[test]
    fn test_rising_river_status() {
        let summary = summarize(&series(&[(2024, 1, 1, 20.0), (2024, 1, 2, 20.5)]));
        assert_eq!(summary.trend, 0.5);
        assert_eq!(summary.status, RiverStatus::Rising);
    }

    #[test]
    fn test_unchanged_level_is_stable() {
        let summary = summarize(&series(&[(2024, 1, 1, 20.0), (2024, 1, 2, 20.0)]));
        assert_eq!(summary.trend, 0.0);
        assert_eq!(summary.status, RiverStatus::Stable);
    }

    // --- Trailing 7-day variation -------------------------------------------

    #[test]
    fn test_variation_uses_oldest_observation_in_window() {
        let summary = summarize(&series(&[
            (2024, 5, 1, 18.0),  // outside the window
            (2024, 5, 10, 20.0), // oldest inside (window starts May 8)
            (2024, 5, 12, 21.0),
            (2024, 5, 15, 23.5), // current
        ]));
        assert_eq!(summary.variation_7d, Some(3.5));
    }

    #[test]
    fn test_variation_window_start_is_inclusive() {
        let summary = summarize(&series(&[
            (2024, 5, 8, 19.0), // exactly 7 days before current
            (2024, 5, 15, 23.0),
        ]));
        assert_eq!(summary.variation_7d, Some(4.0));
    }

    #[test]
    fn test_variation_insufficient_when_window_has_one_observation() {
        // Previous reading is 10 days old — outside the trailing window.
        let summary = summarize(&series(&[(2024, 5, 5, 19.0), (2024, 5, 15, 23.0)]));
        assert_eq!(summary.variation_7d, None);
        // Trend still compares against the previous reading regardless of age.
        assert_eq!(summary.trend, 4.0);
    }

    #[test]
    fn test_variation_can_be_negative() {
        let summary = summarize(&series(&[(2024, 5, 12, 25.0), (2024, 5, 15, 23.0)]));
        assert_eq!(summary.variation_7d, Some(-2.0));
    }
}
