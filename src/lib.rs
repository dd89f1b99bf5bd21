//! Prowl - log analysis toolkit for predator-grid simulation logs
//!
//! This library provides the scanners behind the three prowl command-line
//! tools: counting `MovePredator` command keys, aggregating latency/elapsed
//! durations with percentile statistics, and correlating timestamp lines
//! with predator sightings.

pub mod chart;
pub mod cli;
pub mod error;
pub mod json_output;
pub mod latency;
pub mod moves;
pub mod sightings;
pub mod stats;

use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
pub fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}
