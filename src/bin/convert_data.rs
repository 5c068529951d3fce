/// Convert the agency CSV export into the canonical JSON dataset.
///
/// Usage:
///   convert_data export.csv [-o data/rio-negro-data.json] [--preview]
///
/// `--preview` parses and summarizes without writing the output file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use riomon_service::ingest::csv::parse_csv_export;
use riomon_service::ingest::dataset;
use riomon_service::logging::{self, DataSource, LogLevel};

struct Args {
    input: PathBuf,
    output: PathBuf,
    preview: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut input = None;
    let mut output = PathBuf::from("data/rio-negro-data.json");
    let mut preview = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let value = iter.next().ok_or("--output requires a path")?;
                output = PathBuf::from(value);
            }
            "--preview" => preview = true,
            other if input.is_none() && !other.starts_with('-') => {
                input = Some(PathBuf::from(other));
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(Args {
        input: input.ok_or("missing input CSV file")?,
        output,
        preview,
    })
}

fn run(args: &Args) -> Result<(), String> {
    let text = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("{}: {}", args.input.display(), e))?;

    let outcome = parse_csv_export(&text);
    logging::log_parse_skips(
        DataSource::Csv,
        Some(args.input.display().to_string().as_str()),
        outcome.records.len() + outcome.skipped,
        outcome.skipped,
    );

    if outcome.records.is_empty() {
        return Err("no convertible rows found in the export".to_string());
    }

    let first = &outcome.records[0];
    let last = &outcome.records[outcome.records.len() - 1];
    println!("Records:  {}", outcome.records.len());
    println!("Period:   {} to {}", first.date, last.date);
    println!("Skipped:  {}", outcome.skipped);

    if args.preview {
        println!("Preview mode - no file written");
        return Ok(());
    }

    dataset::write_to_file(Path::new(&args.output), &outcome.records)
        .map_err(|e| e.to_string())?;
    println!("Saved:    {}", args.output.display());

    Ok(())
}

fn main() -> ExitCode {
    logging::init_logger(LogLevel::Info, None, false);

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("convert_data: {}", message);
            eprintln!("usage: convert_data export.csv [-o output.json] [--preview]");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            logging::error(DataSource::Csv, None, &message);
            ExitCode::FAILURE
        }
    }
}
