//! Latency/Elapsed duration scanner and summary statistics
//!
//! Each line is tested against both duration patterns independently; the
//! two categories are unrelated extractions and a line may feed zero, one,
//! or both of them.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use tracing::trace;

use crate::chart::{Bar, ChartGrid};
use crate::error::ScanError;
use crate::stats::{self, Summary};

/// Fixed name of the chart artifact written to the working directory.
pub const CHART_FILE: &str = "latency_elapsed_analysis.svg";

/// Compiled duration patterns
pub struct DurationPatterns {
    latency: Regex,
    elapsed: Regex,
}

impl DurationPatterns {
    pub fn new() -> Self {
        Self {
            latency: Regex::new(r"Latency:\s+(\d+)\s+ms").expect("valid latency pattern"),
            elapsed: Regex::new(r"Elapsed:\s+(\d+)\s+ms").expect("valid elapsed pattern"),
        }
    }
}

impl Default for DurationPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// One duration category: raw sample list plus per-value counts
#[derive(Debug, Clone, Default)]
pub struct DurationSeries {
    values: Vec<u64>,
    counts: HashMap<u64, u64>,
}

impl DurationSeries {
    pub fn record(&mut self, ms: u64) {
        self.values.push(ms);
        *self.counts.entry(ms).or_default() += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples in scan order.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// `(value, count)` pairs sorted ascending by value.
    pub fn sorted_counts(&self) -> Vec<(u64, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(&v, &c)| (v, c)).collect();
        entries.sort_by_key(|&(v, _)| v);
        entries
    }

    pub fn summary(&self) -> Option<Summary> {
        stats::summarize(&self.values)
    }
}

/// Scan result for both duration categories
#[derive(Debug, Clone, Default)]
pub struct DurationReport {
    pub latency: DurationSeries,
    pub elapsed: DurationSeries,
}

/// Feed one newline-stripped line into the report.
pub fn scan_line(patterns: &DurationPatterns, line: &str, report: &mut DurationReport) {
    if let Some(caps) = patterns.latency.captures(line) {
        if let Some(ms) = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) {
            trace!(ms, "matched latency");
            report.latency.record(ms);
        }
    }
    if let Some(caps) = patterns.elapsed.captures(line) {
        if let Some(ms) = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) {
            trace!(ms, "matched elapsed");
            report.elapsed.record(ms);
        }
    }
}

/// Scan a log file for `Latency: N ms` and `Elapsed: N ms` occurrences.
pub fn scan_path(path: &Path) -> Result<DurationReport, ScanError> {
    let patterns = DurationPatterns::new();
    let file = File::open(path).map_err(|e| ScanError::from_open(path, e))?;
    let reader = BufReader::new(file);

    let mut report = DurationReport::default();
    let mut line_number = 0usize;
    for line in reader.lines() {
        line_number += 1;
        let line = line.map_err(|source| ScanError::Read {
            line: line_number,
            source,
        })?;
        scan_line(&patterns, &line, &mut report);
    }

    Ok(report)
}

/// Render the two summary blocks printed to stdout.
pub fn render_text(report: &DurationReport) -> String {
    let mut out = String::new();
    render_category(&mut out, "Latency", &report.latency);
    render_category(&mut out, "Elapsed", &report.elapsed);
    out
}

fn render_category(out: &mut String, name: &str, series: &DurationSeries) {
    out.push('\n');
    out.push_str(&format!("{name} Times Summary:\n"));
    match series.summary() {
        Some(summary) => {
            out.push_str(&format!("Total occurrences: {}\n", summary.count));
            out.push_str(&format!("Min: {} ms\n", summary.min));
            out.push_str(&format!("Max: {} ms\n", summary.max));
            out.push_str(&format!("Average: {:.2} ms\n", summary.mean));
            out.push_str(&format!("P50: {:.2} ms\n", summary.p50));
            out.push_str(&format!("P95: {:.2} ms\n", summary.p95));
            out.push_str(&format!("P99: {:.2} ms\n", summary.p99));
        }
        None => {
            out.push_str(&format!("No {} times found.\n", name.to_lowercase()));
        }
    }
}

/// Assemble the 2x4 analysis chart: per category one raw-count panel plus
/// P50/P95/P99 percentile-bucket panels.
pub fn build_chart(report: &DurationReport) -> ChartGrid {
    let mut grid = ChartGrid::new("Latency and Elapsed Time Analysis", 2, 4);
    add_category_row(&mut grid, 0, "Latency", "#4a90d9", &report.latency);
    add_category_row(&mut grid, 1, "Elapsed", "#5cb85c", &report.elapsed);
    grid
}

fn add_category_row(grid: &mut ChartGrid, row: usize, name: &str, color: &'static str, series: &DurationSeries) {
    let percentiles = [(1usize, "P50", 50.0), (2, "P95", 95.0), (3, "P99", 99.0)];

    if series.is_empty() {
        grid.set_placeholder(row, 0, &format!("{name} Raw Counts"));
        for (col, label, _) in percentiles {
            grid.set_placeholder(row, col, &format!("{name} {label}"));
        }
        return;
    }

    let raw_bars: Vec<Bar> = series
        .sorted_counts()
        .into_iter()
        .map(|(value, count)| Bar {
            x: value as f64,
            count,
        })
        .collect();
    grid.set_bar_panel(
        row,
        0,
        &format!("{name} Raw Counts"),
        &format!("{name} (ms)"),
        "Count",
        color,
        raw_bars,
    );

    for (col, label, pct) in percentiles {
        let bins = stats::percentile_bins(series.values(), pct);
        let bars: Vec<Bar> = bins
            .midpoints
            .iter()
            .zip(&bins.counts)
            .map(|(&midpoint, &count)| Bar {
                x: midpoint,
                count,
            })
            .collect();
        grid.set_bar_panel(
            row,
            col,
            &format!("{name} {label}"),
            "Time (ms)",
            "Count",
            color,
            bars,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_lines(lines: &[&str]) -> DurationReport {
        let patterns = DurationPatterns::new();
        let mut report = DurationReport::default();
        for line in lines {
            scan_line(&patterns, line, &mut report);
        }
        report
    }

    #[test]
    fn test_scan_line_latency_only() {
        let report = scan_lines(&["2024-03-01 worker Latency: 12 ms"]);
        assert_eq!(report.latency.values(), &[12]);
        assert!(report.elapsed.is_empty());
    }

    #[test]
    fn test_scan_line_both_patterns_on_one_line() {
        let report = scan_lines(&["Latency: 5 ms Elapsed: 9 ms"]);
        assert_eq!(report.latency.values(), &[5]);
        assert_eq!(report.elapsed.values(), &[9]);
    }

    #[test]
    fn test_scan_line_requires_ms_unit() {
        let report = scan_lines(&["Latency: 5 s", "Elapsed: 9"]);
        assert!(report.latency.is_empty());
        assert!(report.elapsed.is_empty());
    }

    #[test]
    fn test_scan_line_ignores_non_integer() {
        let report = scan_lines(&["Latency: 5.5 ms"]);
        // the integer prefix of "5.5" never matches the \d+ + whitespace shape
        assert!(report.latency.is_empty());
    }

    #[test]
    fn test_sorted_counts_ascending_with_duplicates() {
        let report = scan_lines(&[
            "Elapsed: 30 ms",
            "Elapsed: 10 ms",
            "Elapsed: 30 ms",
        ]);
        assert_eq!(report.elapsed.sorted_counts(), vec![(10, 1), (30, 2)]);
    }

    #[test]
    fn test_render_text_no_data() {
        let report = DurationReport::default();
        let text = render_text(&report);
        assert!(text.contains("\nLatency Times Summary:\nNo latency times found.\n"));
        assert!(text.contains("\nElapsed Times Summary:\nNo elapsed times found.\n"));
    }

    #[test]
    fn test_render_text_summary_block() {
        let mut report = DurationReport::default();
        for ms in [10, 20, 30, 40, 50] {
            report.latency.record(ms);
        }
        let text = render_text(&report);
        assert!(text.contains("Total occurrences: 5\n"));
        assert!(text.contains("Min: 10 ms\n"));
        assert!(text.contains("Max: 50 ms\n"));
        assert!(text.contains("Average: 30.00 ms\n"));
        assert!(text.contains("P50: 30.00 ms\n"));
        assert!(text.contains("P95: 48.00 ms\n"));
        assert!(text.contains("P99: 49.60 ms\n"));
    }

    #[test]
    fn test_chart_has_placeholders_for_empty_category() {
        let mut report = DurationReport::default();
        report.latency.record(10);
        let svg = build_chart(&report).to_svg();
        assert!(svg.contains("Latency Raw Counts"));
        assert!(svg.contains("Elapsed P99"));
        assert!(svg.contains("No data available"));
    }

    #[test]
    fn test_chart_deterministic() {
        let mut report = DurationReport::default();
        for ms in [10, 20, 20, 30] {
            report.latency.record(ms);
            report.elapsed.record(ms + 1);
        }
        let first = build_chart(&report).to_svg();
        let second = build_chart(&report).to_svg();
        assert_eq!(first, second);
    }
}
