/// Canonical dataset loading.
///
/// The dashboard's level history lives in a single JSON file — an array of
/// `{data, nivel_rio, encheu_vazou}` records maintained by the
/// `convert_data` tool. Deployments either ship the file alongside the
/// service or fetch it from the static host that serves the dashboard.

use std::path::Path;

use crate::ingest::records::RawRecord;
use crate::model::DatasetError;

// ---------------------------------------------------------------------------
// Local files
// ---------------------------------------------------------------------------

/// Read and deserialize the canonical JSON dataset from a local file.
pub fn load_from_file(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        DatasetError::Io(format!("{}: {}", path.display(), e))
    })?;
    parse_json(&text)
}

/// Deserialize dataset records from a JSON string.
pub fn parse_json(text: &str) -> Result<Vec<RawRecord>, DatasetError> {
    serde_json::from_str(text).map_err(|e| DatasetError::Malformed(e.to_string()))
}

/// Serialize records to the canonical pretty-printed JSON dataset file.
pub fn write_to_file(path: &Path, records: &[RawRecord]) -> Result<(), DatasetError> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| DatasetError::Malformed(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| {
        DatasetError::Io(format!("{}: {}", path.display(), e))
    })
}

// ---------------------------------------------------------------------------
// Remote fetching
// ---------------------------------------------------------------------------

/// Fetch the canonical dataset over HTTP.
///
/// Non-2xx responses map to `DatasetError::Http`; transport failures map
/// to `DatasetError::Io`.
pub fn fetch_from_url(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Vec<RawRecord>, DatasetError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| DatasetError::Io(e.to_string()))?;

    if !response.status().is_success() {
        return Err(DatasetError::Http(response.status().as_u16()));
    }

    let text = response.text().map_err(|e| DatasetError::Io(e.to_string()))?;
    parse_json(&text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
