//! Timestamp/predator sighting correlator
//!
//! Associates `MM-dd HH:mm:ss.SSS` timestamp lines with the next
//! `predatorId=VALUE` occurrence (same line or later), then computes the
//! elapsed time between consecutive sightings of each predator ID.
//!
//! The scan holds a single pending-timestamp slot: a new timestamp line
//! overwrites whatever was pending, a pairing consumes the slot, and a
//! `predatorId=` with nothing pending is discarded.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::debug;

use crate::error::ScanError;

/// Year assumed for the year-less log timestamps.
const LOG_YEAR: i32 = 2000;

/// The single pending-timestamp slot of the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveTimestamp {
    #[default]
    Empty,
    Pending(String),
}

impl ActiveTimestamp {
    /// Clear the slot, returning the pending timestamp text if there was one.
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(self) {
            ActiveTimestamp::Empty => None,
            ActiveTimestamp::Pending(ts) => Some(ts),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ActiveTimestamp::Pending(_))
    }
}

/// A timestamp successfully paired with a `predatorId=` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sighting {
    /// Timestamp prefix exactly as it appeared in the log
    pub timestamp_text: String,
    /// Parsed form, pinned to [`LOG_YEAR`]
    pub timestamp: NaiveDateTime,
    /// Full `predatorId=VALUE` match text
    pub pattern_text: String,
    /// The extracted ID value
    pub predator_id: String,
}

/// A sighting with its computed elapsed-time string, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SightingRow {
    pub timestamp_text: String,
    pub pattern_text: String,
    /// Seconds since the previous sighting of the same ID, 3 decimals
    pub elapsed: String,
}

/// Final scan result: display rows plus per-ID totals
#[derive(Debug, Clone, Default)]
pub struct SightingReport {
    pub rows: Vec<SightingRow>,
    pub counts: HashMap<String, u64>,
}

/// Parse an `MM-dd HH:mm:ss.SSS` timestamp, pinning the year.
///
/// The fixed year keeps deltas correct as long as the log does not cross a
/// year boundary.
pub fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{LOG_YEAR}-{ts}"), "%Y-%m-%d %H:%M:%S%.3f").ok()
}

/// Line-by-line scanner holding the pending-timestamp state machine.
pub struct SightingScanner {
    timestamp_pattern: Regex,
    predator_pattern: Regex,
    slot: ActiveTimestamp,
    sightings: Vec<Sighting>,
    counts: HashMap<String, u64>,
}

impl SightingScanner {
    pub fn new() -> Self {
        Self {
            timestamp_pattern: Regex::new(r"^\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}")
                .expect("valid timestamp pattern"),
            predator_pattern: Regex::new(r"predatorId=([^ ,]+)").expect("valid predator pattern"),
            slot: ActiveTimestamp::Empty,
            sightings: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// Current slot state, for inspection.
    pub fn slot(&self) -> &ActiveTimestamp {
        &self.slot
    }

    /// Feed one newline-stripped line into the state machine.
    pub fn observe_line(&mut self, line: &str) {
        let timestamp_match = self.timestamp_pattern.find(line);
        let predator_match = self.predator_pattern.captures(line);

        if let Some(ts) = timestamp_match {
            // A new timestamp supersedes whatever was pending.
            let ts_text = ts.as_str().to_string();
            if let Some(caps) = predator_match {
                self.pair(&ts_text, &caps);
                self.slot = ActiveTimestamp::Empty;
            } else {
                self.slot = ActiveTimestamp::Pending(ts_text);
            }
        } else if let Some(caps) = predator_match {
            // An ID with nothing pending is discarded.
            if let Some(ts_text) = self.slot.take() {
                self.pair(&ts_text, &caps);
            }
        }
    }

    fn pair(&mut self, ts_text: &str, caps: &regex::Captures<'_>) {
        let Some(timestamp) = parse_timestamp(ts_text) else {
            eprintln!("Warning: Could not parse timestamp string: {ts_text}");
            return;
        };
        let (Some(pattern_text), Some(predator_id)) = (caps.get(0), caps.get(1)) else {
            return;
        };
        let predator_id = predator_id.as_str().to_string();
        debug!(%predator_id, ts_text, "paired sighting");
        *self.counts.entry(predator_id.clone()).or_default() += 1;
        self.sightings.push(Sighting {
            timestamp_text: ts_text.to_string(),
            timestamp,
            pattern_text: pattern_text.as_str().to_string(),
            predator_id,
        });
    }

    /// Consume the scanner, returning collected sightings in scan order
    /// plus the per-ID counts.
    pub fn finish(self) -> (Vec<Sighting>, HashMap<String, u64>) {
        (self.sightings, self.counts)
    }
}

impl Default for SightingScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan a log file for timestamped predator sightings.
pub fn scan_path(path: &Path) -> Result<SightingReport, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::from_open(path, e))?;
    let reader = BufReader::new(file);

    let mut scanner = SightingScanner::new();
    let mut line_number = 0usize;
    for line in reader.lines() {
        line_number += 1;
        let line = line.map_err(|source| ScanError::Read {
            line: line_number,
            source,
        })?;
        scanner.observe_line(&line);
    }

    let (sightings, counts) = scanner.finish();
    Ok(build_report(sightings, counts))
}

/// Compute per-ID elapsed deltas and the final display ordering.
///
/// Deltas are computed over the events sorted by (ID, timestamp); the
/// display rows are then re-sorted by (pattern text, timestamp text), so
/// the printed order is deliberately decoupled from chronological order.
pub fn build_report(
    mut sightings: Vec<Sighting>,
    counts: HashMap<String, u64>,
) -> SightingReport {
    sightings.sort_by(|a, b| {
        a.predator_id
            .cmp(&b.predator_id)
            .then(a.timestamp.cmp(&b.timestamp))
    });

    let mut last_seen: HashMap<String, NaiveDateTime> = HashMap::new();
    let mut rows = Vec::with_capacity(sightings.len());
    for sighting in &sightings {
        let elapsed = match last_seen.get(&sighting.predator_id) {
            None => "0.000".to_string(),
            Some(previous) => {
                let delta_ms = (sighting.timestamp - *previous).num_milliseconds();
                if delta_ms < 0 {
                    eprintln!(
                        "Warning: Negative time delta for {} at {}. Using 0.000s.",
                        sighting.predator_id, sighting.timestamp_text
                    );
                    "0.000".to_string()
                } else {
                    format!("{}.{:03}", delta_ms / 1000, delta_ms % 1000)
                }
            }
        };
        last_seen.insert(sighting.predator_id.clone(), sighting.timestamp);
        rows.push(SightingRow {
            timestamp_text: sighting.timestamp_text.clone(),
            pattern_text: sighting.pattern_text.clone(),
            elapsed,
        });
    }

    rows.sort_by(|a, b| {
        a.pattern_text
            .cmp(&b.pattern_text)
            .then_with(|| a.timestamp_text.cmp(&b.timestamp_text))
    });

    SightingReport { rows, counts }
}

/// Render the event list and the per-ID counts summary.
pub fn render_text(report: &SightingReport) -> String {
    let mut out = String::new();
    if report.rows.is_empty() {
        out.push_str("No relevant log entries found matching the specified patterns.\n");
    } else {
        for row in &report.rows {
            out.push_str(&format!(
                "{} {} {}s\n",
                row.timestamp_text, row.pattern_text, row.elapsed
            ));
        }
    }

    out.push('\n');
    out.push_str("Predator ID Counts:\n");
    if report.counts.is_empty() {
        out.push_str("No predator IDs found to count.\n");
    } else {
        let mut entries: Vec<_> = report.counts.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (id, count) in entries {
            out.push_str(&format!("{id}: {count}\n"));
        }
    }
    out
}
