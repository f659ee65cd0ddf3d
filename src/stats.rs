//! Statistical utility functions shared across modules
//!
//! Contains the percentile, summary and kernel density helpers used by the
//! plotting layer and the run summary.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

use crate::error::{QnormError, Result};

/// Percentile of already sorted data, `q` in `[0, 100]`.
///
/// Linear interpolation between the two closest ranks: position
/// `(n - 1) * q / 100` in the sorted data.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let pos = (n - 1) as f64 * (q / 100.0).clamp(0.0, 1.0);
    let low = pos.floor() as usize;
    let high = (low + 1).min(n - 1);
    let frac = pos - low as f64;

    sorted[low] + frac * (sorted[high] - sorted[low])
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// First and third quartile of unsorted data
pub fn quartiles(values: &[f64]) -> (f64, f64) {
    let sorted = sorted_copy(values);
    (percentile(&sorted, 25.0), percentile(&sorted, 75.0))
}

/// Five-number summary plus mean of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summarize a column; `None` for empty input
pub fn summarize(values: &[f64]) -> Option<ColumnStats> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted_copy(values);
    Some(ColumnStats {
        min: sorted[0],
        q1: percentile(&sorted, 25.0),
        median: percentile(&sorted, 50.0),
        q3: percentile(&sorted, 75.0),
        max: sorted[sorted.len() - 1],
        mean: values.iter().sum::<f64>() / values.len() as f64,
    })
}

/// Scott's rule bandwidth: sample SD * n^(-1/5).
///
/// Falls back to 1.0 when the data has no spread.
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 1.0;
    }
    let sd = values.iter().std_dev();
    let bw = sd * (values.len() as f64).powf(-0.2);
    if bw > 0.0 && bw.is_finite() {
        bw
    } else {
        1.0
    }
}

/// Gaussian kernel density estimate of `values` evaluated at each `grid` point
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(QnormError::EmptyData {
            reason: "Cannot estimate density of an empty sample".to_string(),
        });
    }

    let bandwidth = scott_bandwidth(values);
    let kernel = Normal::new(0.0, 1.0).map_err(|e| QnormError::InvalidInput {
        reason: format!("Invalid kernel: {}", e),
    })?;
    let norm = values.len() as f64 * bandwidth;

    Ok(grid
        .iter()
        .map(|&x| {
            values
                .iter()
                .map(|&xi| kernel.pdf((x - xi) / bandwidth))
                .sum::<f64>()
                / norm
        })
        .collect())
}

/// `n` evenly spaced points spanning `[lo, hi]`
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + step * i as f64).collect()
        }
    }
}
