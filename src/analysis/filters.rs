/// Year and trailing-period selectors.
///
/// The dashboard lets the reader restrict the series to one calendar
/// year or to a trailing period ending today. Period filtering takes
/// `today` as a parameter rather than reading the clock, so the result
/// is purely deterministic in tests.

use chrono::{Datelike, NaiveDate};

use crate::model::Series;

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

/// Trailing periods offered by the dashboard's selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    LastMonth,
    LastThreeMonths,
    LastSixMonths,
    LastYear,
}

impl Period {
    /// Parse a dashboard selector token.
    pub fn parse(token: &str) -> Option<Period> {
        match token {
            "last-month" => Some(Period::LastMonth),
            "last-3-months" => Some(Period::LastThreeMonths),
            "last-6-months" => Some(Period::LastSixMonths),
            "last-year" => Some(Period::LastYear),
            _ => None,
        }
    }

    fn months_back(self) -> u32 {
        match self {
            Period::LastMonth => 1,
            Period::LastThreeMonths => 3,
            Period::LastSixMonths => 6,
            Period::LastYear => 12,
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Observations whose date falls in the given calendar year.
pub fn filter_by_year(series: &Series, year: i32) -> Series {
    Series {
        observations: series
            .observations
            .iter()
            .copied()
            .filter(|obs| obs.date.year() == year)
            .collect(),
    }
}

/// Observations from the trailing period ending at `today` (start date
/// inclusive). The start is `today` shifted back by calendar months,
/// with the day-of-month clamped into shorter months.
pub fn filter_by_period_at(series: &Series, period: Period, today: NaiveDate) -> Series {
    let start = shift_months_back(today, period.months_back());
    Series {
        observations: series
            .observations
            .iter()
            .copied()
            .filter(|obs| obs.date >= start)
            .collect(),
    }
}

/// Move a date back by whole calendar months, clamping the day to the
/// end of shorter target months (May 31 − 3 months → Feb 28/29).
fn shift_months_back(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    let mut day = date.day();
    loop {
        if let Some(shifted) = NaiveDate::from_ymd_opt(year, month, day) {
            return shifted;
        }
        // Every month has at least 28 days, so this terminates.
        day -= 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Observation;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn series(entries: &[(i32, u32, u32)]) -> Series {
        Series::from_unsorted(
            entries
                .iter()
                .map(|&(y, m, d)| Observation {
                    date: ymd(y, m, d),
                    level_m: 20.0,
                })
                .collect(),
        )
    }

    // --- Token parsing ------------------------------------------------------

    #[test]
    fn test_parse_accepts_dashboard_selector_tokens() {
        assert_eq!(Period::parse("last-month"), Some(Period::LastMonth));
        assert_eq!(Period::parse("last-3-months"), Some(Period::LastThreeMonths));
        assert_eq!(Period::parse("last-6-months"), Some(Period::LastSixMonths));
        assert_eq!(Period::parse("last-year"), Some(Period::LastYear));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(Period::parse("all"), None);
        assert_eq!(Period::parse(""), None);
        assert_eq!(Period::parse("LAST-MONTH"), None);
    }

    // --- Year filter --------------------------------------------------------

    #[test]
    fn test_filter_by_year_keeps_only_that_year() {
        let s = series(&[(2023, 12, 31), (2024, 1, 1), (2024, 6, 15), (2025, 1, 1)]);
        let filtered = filter_by_year(&s, 2024);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.observations.iter().all(|o| o.date.year() == 2024));
    }

    #[test]
    fn test_filter_by_year_with_no_matches_is_empty() {
        let s = series(&[(2023, 5, 1)]);
        assert!(filter_by_year(&s, 2019).is_empty());
    }

    // --- Period filter ------------------------------------------------------

    #[test]
    fn test_last_month_keeps_dates_from_start_inclusive() {
        let s = series(&[(2024, 5, 14), (2024, 5, 15), (2024, 6, 1), (2024, 6, 15)]);
        let filtered = filter_by_period_at(&s, Period::LastMonth, ymd(2024, 6, 15));
        let dates: Vec<_> = filtered.observations.iter().map(|o| o.date).collect();
        // Start is 2024-05-15, inclusive.
        assert_eq!(dates, vec![ymd(2024, 5, 15), ymd(2024, 6, 1), ymd(2024, 6, 15)]);
    }

    #[test]
    fn test_last_year_spans_twelve_months() {
        let s = series(&[(2023, 6, 14), (2023, 6, 15), (2024, 6, 15)]);
        let filtered = filter_by_period_at(&s, Period::LastYear, ymd(2024, 6, 15));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_month_shift_clamps_into_short_months() {
        // May 31 − 3 months lands in February, which clamps to the 29th
        // in a leap year and the 28th otherwise.
        assert_eq!(shift_months_back(ymd(2024, 5, 31), 3), ymd(2024, 2, 29));
        assert_eq!(shift_months_back(ymd(2023, 5, 31), 3), ymd(2023, 2, 28));
        assert_eq!(shift_months_back(ymd(2024, 7, 31), 1), ymd(2024, 6, 30));
    }

    #[test]
    fn test_month_shift_crosses_year_boundary() {
        assert_eq!(shift_months_back(ymd(2024, 2, 10), 3), ymd(2023, 11, 10));
        assert_eq!(shift_months_back(ymd(2024, 1, 15), 12), ymd(2023, 1, 15));
    }

    #[test]
    fn test_period_filter_on_empty_series_is_empty() {
        let filtered = filter_by_period_at(&series(&[]), Period::LastSixMonths, ymd(2024, 6, 1));
        assert!(filtered.is_empty());
    }
}
