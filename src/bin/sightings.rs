//! prowl-sightings: correlate timestamp lines with predator sightings
//!
//! Prints every paired sighting with the elapsed time since the previous
//! sighting of the same predator ID, followed by per-ID totals.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use prowl::cli::OutputFormat;
use prowl::{init_tracing, json_output::JsonSightingReport, sightings};

#[derive(Parser, Debug)]
#[command(name = "prowl-sightings")]
#[command(version)]
#[command(about = "Correlate timestamped predatorId sightings and compute per-ID deltas", long_about = None)]
struct Cli {
    /// Path to the log file to scan
    log_file: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable debug diagnostics on stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    match sightings::scan_path(&args.log_file) {
        Ok(report) => match args.format {
            OutputFormat::Text => print!("{}", sightings::render_text(&report)),
            OutputFormat::Json => {
                let json_report = JsonSightingReport::from_report(&report);
                println!("{}", serde_json::to_string_pretty(&json_report)?);
            }
        },
        Err(err) => eprintln!("{err}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_log_file() {
        let cli = Cli::parse_from(["prowl-sightings", "predators.log"]);
        assert_eq!(cli.log_file, PathBuf::from("predators.log"));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_requires_log_file() {
        let result = Cli::try_parse_from(["prowl-sightings"]);
        assert!(result.is_err());
    }
}
