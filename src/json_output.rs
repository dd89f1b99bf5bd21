//! JSON output format for the prowl scan reports

use serde::{Deserialize, Serialize};

use crate::latency::DurationReport;
use crate::moves::MoveCounts;
use crate::sightings::SightingReport;
use crate::stats::Summary;

/// A single counted move-command key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMoveCount {
    /// Composite `"<predatorId> <RxC>"` key
    pub key: String,
    pub count: u64,
}

/// Report of the move-command counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMoveReport {
    /// Entries sorted lexicographically by key
    pub counts: Vec<JsonMoveCount>,
}

impl JsonMoveReport {
    pub fn from_counts(counts: &MoveCounts) -> Self {
        Self {
            counts: counts
                .sorted()
                .into_iter()
                .map(|(key, count)| JsonMoveCount {
                    key: key.to_string(),
                    count,
                })
                .collect(),
        }
    }
}

/// Summary statistics for one duration category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDurationSummary {
    pub count: usize,
    pub min_ms: u64,
    pub max_ms: u64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

impl From<Summary> for JsonDurationSummary {
    fn from(summary: Summary) -> Self {
        Self {
            count: summary.count,
            min_ms: summary.min,
            max_ms: summary.max,
            mean_ms: summary.mean,
            p50_ms: summary.p50,
            p95_ms: summary.p95,
            p99_ms: summary.p99,
        }
    }
}

/// Report of the latency/elapsed aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDurationReport {
    /// Omitted when no Latency lines matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<JsonDurationSummary>,
    /// Omitted when no Elapsed lines matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<JsonDurationSummary>,
}

impl JsonDurationReport {
    pub fn from_report(report: &DurationReport) -> Self {
        Self {
            latency: report.latency.summary().map(Into::into),
            elapsed: report.elapsed.summary().map(Into::into),
        }
    }
}

/// A single displayed sighting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSighting {
    pub timestamp: String,
    pub pattern: String,
    /// Seconds since the previous sighting of the same ID, 3 decimals
    pub elapsed_s: String,
}

/// Per-ID sighting total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPredatorCount {
    pub id: String,
    pub count: u64,
}

/// Report of the sighting correlator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSightingReport {
    /// Events in display order (pattern, then timestamp text)
    pub events: Vec<JsonSighting>,
    /// Totals sorted lexicographically by ID
    pub counts: Vec<JsonPredatorCount>,
}

impl JsonSightingReport {
    pub fn from_report(report: &SightingReport) -> Self {
        let mut counts: Vec<JsonPredatorCount> = report
            .counts
            .iter()
            .map(|(id, &count)| JsonPredatorCount {
                id: id.clone(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            events: report
                .rows
                .iter()
                .map(|row| JsonSighting {
                    timestamp: row.timestamp_text.clone(),
                    pattern: row.pattern_text.clone(),
                    elapsed_s: row.elapsed.clone(),
                })
                .collect(),
            counts,
        }
    }
}
