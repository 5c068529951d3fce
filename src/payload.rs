/// Dashboard payload assembly.
///
/// The boundary artifact handed to the presentation layer: everything
/// the charts and the statistics panel need, as plain serializable data.
/// Matches the production dashboard's split — statistics and moving
/// averages are computed over the outlier-filtered series, while the
/// yearly overlay grids keep the raw series so extreme flood and drought
/// years stay visible.

use serde::Serialize;

use crate::analysis::alignment::{
    align_by_year, day_month_labels, reference_index, reference_label, YearGrid,
};
use crate::analysis::outliers::remove_outliers_iqr;
use crate::analysis::smoothing::moving_average;
use crate::analysis::statistics::summarize;
use crate::config::Config;
use crate::model::{Series, StatisticsSummary};

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

/// One smoothed overlay for the daily chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageOverlay {
    pub window_days: usize,
    /// Same length and date order as `series` in the enclosing payload.
    pub values: Vec<f64>,
}

/// Everything the dashboard renders, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPayload {
    /// Outlier-filtered series backing the daily chart and statistics.
    pub series: Series,
    pub moving_averages: Vec<MovingAverageOverlay>,
    /// Canonical 366-label axis shared by all year grids.
    pub day_month_labels: Vec<String>,
    /// Per-year grids over the raw (unfiltered) series.
    pub year_grids: Vec<YearGrid>,
    /// Day-month label of the most recent observation, for the
    /// same-day-of-year marker.
    pub reference_label: Option<String>,
    pub reference_index: Option<usize>,
    pub statistics: StatisticsSummary,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Run the full pipeline over a parsed series.
pub fn build_payload(series: &Series, config: &Config) -> DashboardPayload {
    let cleaned = remove_outliers_iqr(series);
    let levels = cleaned.levels();

    let moving_averages = config
        .analysis
        .moving_average_windows
        .iter()
        .map(|&window_days| MovingAverageOverlay {
            window_days,
            values: moving_average(&levels, window_days),
        })
        .collect();

    let statistics = summarize(&cleaned);
    let year_grids = align_by_year(series, config.analysis.year_start, config.analysis.year_end);

    DashboardPayload {
        moving_averages,
        day_month_labels: day_month_labels(),
        year_grids,
        reference_label: reference_label(series),
        reference_index: reference_index(series),
        statistics,
        series: cleaned,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
