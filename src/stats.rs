//! Descriptive statistics and percentile bucketing for duration samples

use std::cmp::Ordering;
use std::collections::HashSet;

/// Most buckets a percentile histogram will ever use.
const MAX_BINS: usize = 20;

/// Summary statistics for one duration category
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of recorded samples
    pub count: usize,
    /// Smallest sample (milliseconds)
    pub min: u64,
    /// Largest sample (milliseconds)
    pub max: u64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Equal-width histogram of the samples at or below a percentile threshold
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileBins {
    /// Midpoint of each bucket
    pub midpoints: Vec<f64>,
    /// Sample count per bucket
    pub counts: Vec<u64>,
}

/// Calculate percentile from sorted data
///
/// Linear interpolation between the two bracketing ranks: the rank is
/// `p/100 * (n - 1)` and fractional ranks blend the neighbouring values.
pub fn percentile(sorted_data: &[f64], pct: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (pct / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Compute summary statistics over raw millisecond samples.
///
/// Returns `None` for an empty sample list; the caller renders its own
/// "no data" placeholder in that case.
pub fn summarize(values: &[u64]) -> Option<Summary> {
    let min = *values.iter().min()?;
    let max = *values.iter().max()?;

    let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    Some(Summary {
        count: values.len(),
        min,
        max,
        mean,
        p50: percentile(&sorted, 50.0),
        p95: percentile(&sorted, 95.0),
        p99: percentile(&sorted, 99.0),
    })
}

/// Bucket the samples at or below the given percentile.
///
/// The threshold is taken over all samples; kept samples are spread over
/// `min(20, distinct kept values)` equal-width buckets spanning their range.
/// The rightmost bucket is closed on both sides. A zero-width range
/// collapses to a single bucket at the common value.
pub fn percentile_bins(values: &[u64], pct: f64) -> PercentileBins {
    let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let threshold = percentile(&sorted, pct);

    let kept: Vec<u64> = values.iter().copied().filter(|&v| (v as f64) <= threshold).collect();
    if kept.is_empty() {
        return PercentileBins {
            midpoints: Vec::new(),
            counts: Vec::new(),
        };
    }

    let distinct: HashSet<u64> = kept.iter().copied().collect();
    // kept is non-empty, so min/max exist
    let lo = *kept.iter().min().unwrap_or(&0) as f64;
    let hi = *kept.iter().max().unwrap_or(&0) as f64;

    if distinct.len() == 1 {
        return PercentileBins {
            midpoints: vec![lo],
            counts: vec![kept.len() as u64],
        };
    }

    let bins = distinct.len().min(MAX_BINS);
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0u64; bins];
    for v in &kept {
        let idx = (((*v as f64 - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let midpoints = (0..bins)
        .map(|i| lo + width * (i as f64 + 0.5))
        .collect();

    PercentileBins { midpoints, counts }
}
