/// IQR-based outlier rejection.
///
/// The level history contains occasional transcription spikes (a 90 m
/// reading on a river that tops out near 30 m). The statistics panel and
/// the moving-average chart drop them with the interquartile-range rule;
/// the yearly overlay chart deliberately keeps the raw series.
///
/// # Quartile convention
/// Q1 and Q3 are taken by nearest-rank indexing into the sorted values at
/// `floor(0.25·n)` and `floor(0.75·n)` — not interpolated percentiles.
/// Downstream consumers reproduce historical chart output bit-for-bit, so
/// this indexing must not change.

use crate::model::Series;

/// Return a new series containing only observations whose level falls in
/// `[Q1 − 1.5·IQR, Q3 + 1.5·IQR]`.
///
/// With fewer than four observations the quartiles are degenerate and the
/// input is returned unchanged.
pub fn remove_outliers_iqr(series: &Series) -> Series {
    let n = series.len();
    if n < 4 {
        return series.clone();
    }

    let mut values: Vec<f64> = series.levels();
    values.sort_by(|a, b| a.total_cmp(b));

    let q1 = values[(0.25 * n as f64).floor() as usize];
    let q3 = values[(0.75 * n as f64).floor() as usize];
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;

    Series {
        observations: series
            .observations
            .iter()
            .copied()
            .filter(|obs| obs.level_m >= lower && obs.level_m <= upper)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
