//! Summary statistics for user feedback
//!
//! Small descriptive summary shown alongside the percentile tables.

use serde::{Deserialize, Serialize};

/// Summary statistics for a block-size sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of values
    pub count: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Median (50th percentile)
    pub median: f64,
}

impl SummaryStats {
    /// Compute summary statistics from a sorted sample
    pub fn from_sorted(sorted: &[f64]) -> Self {
        if sorted.is_empty() {
            return Self {
                count: 0,
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
                median: f64::NAN,
            };
        }

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median,
        }
    }

    /// Range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
