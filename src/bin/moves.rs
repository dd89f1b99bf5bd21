//! prowl-moves: count `MovePredator` command occurrences in a log file

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use prowl::cli::OutputFormat;
use prowl::{init_tracing, json_output::JsonMoveReport, moves};

#[derive(Parser, Debug)]
#[command(name = "prowl-moves")]
#[command(version)]
#[command(about = "Count 'PredatorID LocationID' occurrences in MovePredator command logs", long_about = None)]
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

    match moves::scan_path(&args.log_file) {
        Ok(counts) => match args.format {
            OutputFormat::Text => print!("{}", moves::render_text(&counts)),
            OutputFormat::Json => {
                let report = JsonMoveReport::from_counts(&counts);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        },
        Err(err) => eprintln!("{err}"),
    }

    Ok(())
}
