/// Trailing moving averages.
///
/// The daily chart overlays the raw level with 6-month, 1-year, and
/// 2-year trailing means. The window is left-truncated at the series
/// start: element `i` averages elements `max(0, i−w+1)..=i`, so every
/// input index produces an output value (the early values are simply
/// less smoothed). Not a centered window, and never padded with nulls.

use crate::model::{Observation, Series};

/// Compute the trailing moving average of `values` with the given window.
///
/// Output length always equals input length; a window of 1 is the
/// identity. A window of 0 is treated as 1. The window sum is recomputed
/// for each index rather than carried incrementally, so the output does
/// not drift over tens of thousands of samples.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut result = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        let sum: f64 = slice.iter().sum();
        result.push(sum / slice.len() as f64);
    }

    result
}

/// Moving average of a series' levels, paired back with the source dates
/// for chart overlays.
pub fn moving_average_series(series: &Series, window: usize) -> Series {
    let smoothed = moving_average(&series.levels(), window);
    Series {
        observations: series
            .observations
            .iter()
            .zip(smoothed)
            .map(|(obs, level_m)| Observation {
                date: obs.date,
                level_m,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
