//! Command-key counter for `_Command: MovePredator[...]` log lines
//!
//! A line counts only when it starts with the literal command prefix and
//! carries both an `id=ROWxCOL` location and a `predatorId=ID` field,
//! separated by a comma and at least one space.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::ScanError;

/// Compile the anchored move-command pattern.
///
/// Group 1 captures the `ROWxCOL` location, group 2 the predator ID (a
/// maximal run of non-whitespace). Trailing data on the line is allowed.
pub fn command_pattern() -> Regex {
    Regex::new(r"^_Command: MovePredator\[id=(\d+x\d+),\s+predatorId=(\S+)")
        .expect("valid move-command pattern")
}

/// Extract `(predator_id, location_id)` from a line, if it is well formed.
pub fn match_line<'a>(pattern: &Regex, line: &'a str) -> Option<(&'a str, &'a str)> {
    let caps = pattern.captures(line)?;
    let location = caps.get(1)?.as_str();
    let predator_id = caps.get(2)?.as_str();
    Some((predator_id, location))
}

/// Aggregated counts keyed by `"<predatorId> <RxC>"`
#[derive(Debug, Default)]
pub struct MoveCounts {
    counts: HashMap<String, u64>,
}

impl MoveCounts {
    pub fn record(&mut self, predator_id: &str, location_id: &str) {
        let key = format!("{predator_id} {location_id}");
        *self.counts.entry(key).or_default() += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Key/count pairs sorted lexicographically by key.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|(key, &count)| (key.as_str(), count))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Scan a log file and count well-formed move-command lines.
pub fn scan_path(path: &Path) -> Result<MoveCounts, ScanError> {
    let pattern = command_pattern();
    let file = File::open(path).map_err(|e| ScanError::from_open(path, e))?;
    let reader = BufReader::new(file);

    let mut counts = MoveCounts::default();
    let mut line_number = 0usize;
    for line in reader.lines() {
        line_number += 1;
        let line = line.map_err(|source| ScanError::Read {
            line: line_number,
            source,
        })?;
        if let Some((predator_id, location_id)) = match_line(&pattern, &line) {
            debug!(line_number, predator_id, location_id, "matched move command");
            counts.record(predator_id, location_id);
        }
    }

    Ok(counts)
}

/// Render the text report printed to stdout.
pub fn render_text(counts: &MoveCounts) -> String {
    let mut out = String::new();
    if counts.is_empty() {
        out.push_str(
            "No matching '_Command: MovePredator' lines with the specified format were found.\n",
        );
    } else {
        out.push_str("Count of 'PredatorID LocationID' occurrences:\n");
        for (key, count) in counts.sorted() {
            out.push_str(&format!("{key}: {count}\n"));
        }
    }
    out
}
