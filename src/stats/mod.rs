//! Statistical summary of measured round-trip durations
//!
//! Mirrors the distributional summary a box plot displays: min/max, the
//! quartiles, the mean, and the Tukey fences used to flag outliers.

use serde::{Deserialize, Serialize};

/// Distributional summary of a set of durations (milliseconds).
///
/// Construction goes through [`StatsSummary::from_durations`], which returns
/// `None` for an empty input instead of a NaN-filled summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Smallest observed duration
    pub min: f64,
    /// First quartile (25th percentile, linear interpolation)
    pub q1: f64,
    /// Median (50th percentile)
    pub median: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Third quartile (75th percentile, linear interpolation)
    pub q3: f64,
    /// Lower Tukey fence: Q1 - 1.5 * IQR
    pub lower_fence: f64,
    /// Upper Tukey fence: Q3 + 1.5 * IQR
    pub upper_fence: f64,
    /// Largest observed duration
    pub max: f64,
    /// Number of samples the summary was computed over
    pub sample_count: usize,
}

impl StatsSummary {
    /// Compute a summary over a set of durations.
    ///
    /// Returns `None` when `values` is empty so callers must handle the
    /// no-data case explicitly rather than rendering NaN.
    pub fn from_durations(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted: Vec<f64> = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let min = sorted[0];
        let max = sorted[count - 1];
        let mean = sorted.iter().sum::<f64>() / count as f64;

        let q1 = interpolated_quantile(&sorted, 0.25);
        let median = interpolated_quantile(&sorted, 0.50);
        let q3 = interpolated_quantile(&sorted, 0.75);

        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        Some(Self {
            min,
            q1,
            median,
            mean,
            q3,
            lower_fence,
            upper_fence,
            max,
            sample_count: count,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Values falling outside the Tukey fences.
    pub fn outliers(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .copied()
            .filter(|v| *v < self.lower_fence || *v > self.upper_fence)
            .collect()
    }

    /// Whisker range as displayed by a box plot (non-outlier span).
    pub fn whiskers(&self) -> (f64, f64) {
        (self.lower_fence, self.upper_fence)
    }
}

/// Linear-interpolation quantile over a sorted slice.
///
/// Rank position is q * (n - 1), 0-indexed; a fractional rank interpolates
/// between the two neighboring order statistics. This is the common "linear"
/// quartile estimator and is fixed here for test reproducibility.
fn interpolated_quantile(sorted_values: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted_values.is_empty());

    let index = q * (sorted_values.len() as f64 - 1.0);
    let lower_index = index.floor() as usize;
    let upper_index = index.ceil() as usize;

    if lower_index == upper_index {
        sorted_values[lower_index]
    } else {
        let lower_value = sorted_values[lower_index];
        let upper_value = sorted_values[upper_index];
        let weight = index - lower_index as f64;
        lower_value + weight * (upper_value - lower_value)
    }
}

/// Min/max span of recorded payload byte lengths.
///
/// Companion summary line to the latency stats; `None` when no payloads
/// were recorded yet.
pub fn byte_range(samples: &[usize]) -> Option<(usize, usize)> {
    let min = samples.iter().copied().min()?;
    let max = samples.iter().copied().max()?;
    Some((min, max))
}
