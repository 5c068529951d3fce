/// Service entry point: load the configured dataset, run the analysis
/// pipeline, and emit the dashboard payload as JSON.
///
/// Usage:
///   riomon_service [--config riomon.toml] [--out payload.json]
///
/// Without `--out` the payload is written to stdout (log lines go to
/// stderr-friendly console output from the logger).

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use riomon_service::config::Config;
use riomon_service::ingest::records::{self, RawRecord};
use riomon_service::ingest::dataset;
use riomon_service::logging::{self, DataSource, LogLevel};
use riomon_service::model::{DatasetError, Series};
use riomon_service::payload::build_payload;

struct Args {
    config_path: PathBuf,
    out_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: PathBuf::from("riomon.toml"),
        out_path: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                args.config_path = PathBuf::from(value);
            }
            "--out" => {
                let value = iter.next().ok_or("--out requires a path")?;
                args.out_path = Some(PathBuf::from(value));
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(args)
}

/// Load raw records from the configured source: URL when set, local
/// file otherwise.
fn load_records(config: &Config) -> Result<Vec<RawRecord>, DatasetError> {
    if let Some(url) = &config.dataset.url {
        logging::info(DataSource::Dataset, Some(url.as_str()), "Fetching remote dataset");
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DatasetError::Io(e.to_string()))?;
        dataset::fetch_from_url(&client, url)
    } else {
        logging::info(
            DataSource::Dataset,
            Some(config.dataset.path.as_str()),
            "Loading dataset file",
        );
        dataset::load_from_file(Path::new(&config.dataset.path))
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = Config::load_or_default(&args.config_path).map_err(|e| e.to_string())?;

    logging::init_logger(
        LogLevel::from_config(&config.logging.min_level),
        config.logging.file.as_deref(),
        config.logging.console_timestamps,
    );

    let raw = load_records(&config).map_err(|e| e.to_string())?;
    let outcome = records::parse_records(&raw);
    logging::log_parse_skips(DataSource::Dataset, None, raw.len(), outcome.skipped);

    let series: &Series = &outcome.series;
    if let (Some(first), Some(last)) = (series.observations.first(), series.last()) {
        logging::info(
            DataSource::Dataset,
            None,
            &format!(
                "Series spans {} to {} ({} observations)",
                first.date,
                last.date,
                series.len()
            ),
        );
    } else {
        logging::warn(DataSource::Dataset, None, "Dataset is empty");
    }

    let payload = build_payload(series, &config);
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("payload serialization failed: {}", e))?;

    match &args.out_path {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| format!("{}: {}", path.display(), e))?;
            logging::info(
                DataSource::System,
                Some(path.display().to_string().as_str()),
                "Dashboard payload written",
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("riomon_service: {}", message);
            eprintln!("usage: riomon_service [--config riomon.toml] [--out payload.json]");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            logging::error(DataSource::System, None, &message);
            eprintln!("riomon_service: {}", message);
            ExitCode::FAILURE
        }
    }
}
