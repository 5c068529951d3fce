/// Data acquisition and record parsing for the river monitoring service.
///
/// Submodules:
/// - `records` — converts raw dataset entries into an ordered observation series.
/// - `dataset` — loads the canonical JSON dataset from a file or over HTTP.
/// - `csv` — converts the agency CSV export into canonical records.

pub mod csv;
pub mod dataset;
pub mod records;
