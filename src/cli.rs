//! Shared CLI types for the prowl tools

use clap::ValueEnum;

/// Output format for scan reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}
