//! prowl-latency: aggregate `Latency:`/`Elapsed:` durations from a log file
//!
//! Prints summary statistics per category and writes the combined analysis
//! chart next to the current working directory.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use prowl::cli::OutputFormat;
use prowl::{init_tracing, json_output::JsonDurationReport, latency};

#[derive(Parser, Debug)]
#[command(name = "prowl-latency")]
#[command(version)]
#[command(about = "Summarize 'Latency: N ms' and 'Elapsed: N ms' log occurrences", long_about = None)]
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

    match latency::scan_path(&args.log_file) {
        Ok(report) => {
            match args.format {
                OutputFormat::Text => print!("{}", latency::render_text(&report)),
                OutputFormat::Json => {
                    let json_report = JsonDurationReport::from_report(&report);
                    println!("{}", serde_json::to_string_pretty(&json_report)?);
                }
            }

            let chart = latency::build_chart(&report);
            match chart.save(Path::new(latency::CHART_FILE)) {
                // keep stdout valid JSON in json mode
                Ok(()) if args.format == OutputFormat::Text => {
                    println!("\nGraphs saved to '{}'", latency::CHART_FILE);
                }
                Ok(()) => {}
                Err(err) => {
                    eprintln!("Error: Could not write '{}': {err}", latency::CHART_FILE);
                }
            }
        }
        Err(err) => eprintln!("{err}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_log_file() {
        let cli = Cli::parse_from(["prowl-latency", "timings.log"]);
        assert_eq!(cli.log_file, PathBuf::from("timings.log"));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_requires_log_file() {
        let result = Cli::try_parse_from(["prowl-latency"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_debug_flag() {
        let cli = Cli::parse_from(["prowl-latency", "--debug", "timings.log"]);
        assert!(cli.debug);
    }
}
