//! Fixed-count histogram binning
//!
//! Produces plot-ready bins for the volume and linear-size histograms.
//! The application draws 20 equal-width bins over the data range, so a
//! plain min-max binning is used here (no percentile clipping).

use serde::{Deserialize, Serialize};

/// Default number of bins for block-size histograms
pub const DEFAULT_BINS: usize = 20;

/// A single histogram bin: half-open range [start, end) and its count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

impl HistogramBin {
    /// Midpoint of the bin, used for labeling
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Width of the bin
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram over a sample's full range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Total number of values counted
    pub total: u64,
}

impl Histogram {
    /// Bin sorted values into `num_bins` equal-width bins.
    ///
    /// The last bin is closed on the right so the maximum is counted.
    /// A sample of identical values yields a single bin of width 1
    /// centered on that value.
    pub fn from_sorted(sorted: &[f64], num_bins: usize) -> Self {
        if sorted.is_empty() || num_bins == 0 {
            return Self {
                bins: Vec::new(),
                total: 0,
            };
        }

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let range = max - min;

        if range <= f64::EPSILON {
            // Concentrated sample: one bin around the common value
            return Self {
                bins: vec![HistogramBin {
                    start: min - 0.5,
                    end: min + 0.5,
                    count: sorted.len() as u64,
                }],
                total: sorted.len() as u64,
            };
        }

        let width = range / num_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..num_bins)
            .map(|i| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();

        for &value in sorted {
            let idx = (((value - min) / width) as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self {
            bins,
            total: sorted.len() as u64,
        }
    }

    /// Density series (bin center, count / (n * width)) for overlaying
    /// fitted probability-density curves on the empirical histogram.
    pub fn density_series(&self) -> Vec<(f64, f64)> {
        let n = self.total as f64;
        self.bins
            .iter()
            .map(|bin| (bin.center(), bin.count as f64 / (n * bin.width())))
            .collect()
    }

    /// Frequency series (bin center, count)
    pub fn frequency_series(&self) -> Vec<(f64, f64)> {
        self.bins
            .iter()
            .map(|bin| (bin.center(), bin.count as f64))
            .collect()
    }

    /// Largest bin count, used for axis scaling
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}
