/// Agency CSV export conversion.
///
/// The level history arrives from the port authority as a semicolon-
/// separated export with the columns `PERIODO;COTA;VARIACAO`: day-first
/// dates, decimal commas, level in meters, daily variation in
/// centimeters. This module normalizes those rows into canonical dataset
/// records (`YYYY-MM-DD` dates, dot decimals), skipping and counting rows
/// that cannot be read.

use chrono::NaiveDate;

use crate::ingest::records::{LevelValue, RawRecord};

/// Date formats seen across export batches, day-first variants preferred.
const EXPORT_DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Result of a conversion pass: canonical records sorted ascending by
/// date, plus the number of rows skipped as unreadable.
#[derive(Debug, Clone)]
pub struct CsvOutcome {
    pub records: Vec<RawRecord>,
    pub skipped: usize,
}

/// Convert a full CSV export into canonical dataset records.
///
/// Header lines and blank lines are ignored without counting; rows with
/// an unparseable date or level are skipped and counted. The variation
/// column is optional — a row without it still yields a record.
pub fn parse_csv_export(text: &str) -> CsvOutcome {
    let mut records = Vec::new();
    let mut skipped = 0;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || is_header(line) {
            continue;
        }

        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() < 2 {
            skipped += 1;
            continue;
        }

        let (Some(date), Some(level)) = (parse_export_date(fields[0]), parse_decimal(fields[1]))
        else {
            skipped += 1;
            continue;
        };

        let variation = fields.get(2).and_then(|f| parse_decimal(f));

        records.push(RawRecord {
            date: date.format("%Y-%m-%d").to_string(),
            level: LevelValue::Number(round_to(level, 2)),
            daily_change_cm: variation.map(|v| LevelValue::Number(round_to(v, 1))),
        });
    }

    records.sort_by(|a, b| a.date.cmp(&b.date));
    CsvOutcome { records, skipped }
}

/// A header row names its columns instead of carrying data.
fn is_header(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.contains("periodo") || lower.contains("cota") || lower.contains("variacao")
}

/// Parse an export date, trying each known format in order.
fn parse_export_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    EXPORT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Parse a decimal-comma numeric field. Empty and `null` cells are absent
/// values, not errors.
fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("null") {
        return None;
    }
    let value: f64 = text.replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_day_first_dates_and_decimal_commas() {
        let outcome = parse_csv_export("PERIODO;COTA;VARIACAO\n15/03/2024;23,45;-4,0\n");
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.records.len(), 1);

        let record = &outcome.records[0];
        assert_eq!(record.date, "2024-03-15");
        assert_eq!(record.level.as_f64(), Some(23.45));
        assert_eq!(
            record.daily_change_cm.as_ref().and_then(|v| v.as_f64()),
            Some(-4.0)
        );
    }

    #[test]
    fn test_accepts_iso_and_dash_date_variants() {
        let outcome = parse_csv_export("2024-03-15;20,0;0\n16-03-2024;21,0;0\n");
        assert_eq!(outcome.skipped, 0);
        let dates: Vec<_> = outcome.records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-15", "2024-03-16"]);
    }

    #[test]
    fn test_output_is_sorted_ascending_by_date() {
        let outcome = parse_csv_export("03/01/2024;22,0;0\n01/01/2024;20,0;0\n02/01/2024;21,0;0\n");
        let dates: Vec<_> = outcome.records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_skips_and_counts_unreadable_rows() {
        let csv = "PERIODO;COTA;VARIACAO\n\
                   15/03/2024;23,45;-4,0\n\
                   not-a-date;20,0;0\n\
                   16/03/2024;twenty;0\n\
                   loneField\n\
                   17/03/2024;23,52;7,0\n";
        let outcome = parse_csv_export(csv);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 3);
    }

    #[test]
    fn test_blank_lines_and_header_are_not_counted_as_skips() {
        let outcome = parse_csv_export("PERIODO;COTA;VARIACAO\n\n15/03/2024;23,45;-4,0\n\n");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_missing_variation_column_still_yields_a_record() {
        let outcome = parse_csv_export("15/03/2024;23,45\n16/03/2024;23,50;null\n");
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.records[0].daily_change_cm.is_none());
        assert!(outcome.records[1].daily_change_cm.is_none());
    }

    #[test]
    fn test_levels_round_to_centimeter_precision() {
        let outcome = parse_csv_export("15/03/2024;23,456;3,44\n");
        let record = &outcome.records[0];
        assert_eq!(record.level.as_f64(), Some(23.46));
        assert_eq!(
            record.daily_change_cm.as_ref().and_then(|v| v.as_f64()),
            Some(3.4)
        );
    }

    #[test]
    fn test_empty_export_yields_empty_outcome() {
        let outcome = parse_csv_export("");
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped, 0);
    }
}
