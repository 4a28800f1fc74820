//! Summary Statistics over Reading Windows
//!
//! The dashboard shows min/max/mean/median/standard deviation for the
//! readings in view and highlights statistical outliers. NaN values are
//! skipped; they are reported by range validation, not averaged in.

use serde::Serialize;

/// Fewest points for which outlier detection is meaningful
pub const MIN_ANOMALY_SAMPLES: usize = 5;

/// Descriptive statistics for a window of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of values considered
    pub count: usize,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median (mean of the two middle values for even counts)
    pub median: f64,
    /// Sample standard deviation; `None` for a single value
    pub std_dev: Option<f64>,
}

impl Statistics {
    /// Compute statistics, or `None` when there are no usable values
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };
        let std_dev = (count > 1).then(|| {
            let variance =
                sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        });

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median,
            std_dev,
        })
    }
}

/// Indices of values more than `threshold` standard deviations from the mean
///
/// Returns an empty list below [`MIN_ANOMALY_SAMPLES`] usable values or
/// when every value is identical.
pub fn detect_anomalies(values: &[f64], threshold: f64) -> Vec<usize> {
    let Some(stats) = Statistics::from_values(values) else {
        return Vec::new();
    };
    if stats.count < MIN_ANOMALY_SAMPLES {
        return Vec::new();
    }
    let Some(std_dev) = stats.std_dev.filter(|sd| *sd > 0.0) else {
        return Vec::new();
    };

    values
        .iter()
        .enumerate()
        .filter(|(_, v)| (*v - stats.mean).abs() > threshold * std_dev)
        .map(|(index, _)| index)
        .collect()
}
