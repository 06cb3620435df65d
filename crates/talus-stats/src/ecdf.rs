//! Empirical Cumulative Distribution Function (ECDF)
//!
//! The ECDF is a step function estimating the underlying CDF of a sample:
//! ECDF(x) = (number of values <= x) / n. It backs the linear- and
//! log-scale CDF panels; both draw the same step series and differ only
//! in axis scaling.

use serde::{Deserialize, Serialize};

/// Empirical Cumulative Distribution Function over a block-size sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ecdf {
    /// Sorted values
    values: Vec<f64>,
    /// CDF value (0 to 1) at each point
    cdf: Vec<f64>,
}

impl Ecdf {
    /// Build an ECDF from already-sorted values.
    ///
    /// The caller guarantees ascending order; the canonical sample type
    /// upholds this by construction.
    pub fn from_sorted(sorted: &[f64]) -> Self {
        let n = sorted.len();
        let cdf = (1..=n).map(|i| i as f64 / n as f64).collect();
        Self {
            values: sorted.to_vec(),
            cdf,
        }
    }

    /// Evaluate the ECDF at a point: the proportion of values <= x
    pub fn evaluate(&self, x: f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let below = self.values.partition_point(|&v| v <= x);
        if below == 0 {
            0.0
        } else {
            self.cdf[below - 1]
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the ECDF is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted values for plotting
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// CDF values for plotting
    pub fn cdf_values(&self) -> &[f64] {
        &self.cdf
    }

    /// Points for step-function plotting (x, y pairs).
    ///
    /// Starts at (min, 0) and steps up at each observation.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        if self.values.is_empty() {
            return Vec::new();
        }

        let mut points = Vec::with_capacity(self.values.len() * 2 + 1);
        points.push((self.values[0], 0.0));
        for i in 0..self.values.len() {
            if i > 0 {
                points.push((self.values[i], self.cdf[i - 1]));
            }
            points.push((self.values[i], self.cdf[i]));
        }
        points
    }
}
