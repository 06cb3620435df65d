//! Sample preparation
//!
//! Turns raw block volumes (or masses, or manually entered edge lengths)
//! into the canonical [`Sample`]: an ascending sequence of linear block
//! sizes in meters. Downstream consumers only ever read the sample;
//! percentile and fitting steps never mutate it.

use crate::error::TalusResult;
use crate::units;
use serde::{Deserialize, Serialize};
use talus_stats::StatsError;

/// Admissibility rule for raw volume values.
///
/// Whether a zero volume counts as a block is a per-survey judgment
/// call, so the rule is an explicit option instead of a hard-coded
/// bound. The canonical default admits `value >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionPolicy {
    /// Admit zero-volume entries (default true)
    pub include_zero: bool,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self { include_zero: true }
    }
}

impl AdmissionPolicy {
    /// Whether a raw volume value passes the admissibility bound
    pub fn admits(&self, volume_m3: f64) -> bool {
        if !volume_m3.is_finite() {
            return false;
        }
        if self.include_zero {
            volume_m3 >= 0.0
        } else {
            volume_m3 > 0.0
        }
    }
}

/// Count report from sample preparation, surfaced as user feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepReport {
    /// Values admitted into the sample
    pub admitted: usize,
    /// Values dropped by the admissibility bound
    pub rejected: usize,
}

/// Canonical sample: ascending linear block sizes (m).
///
/// Ascending order is required for monotonic percentile interpolation
/// and is guaranteed by construction. Sizes of at least 1 m are the
/// statistically meaningful range for the distribution fit; smaller
/// blocks are admitted but fitting degenerates below that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    sizes: Vec<f64>,
}

/// A prepared sample together with its admission counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedSample {
    pub sample: Sample,
    pub report: PrepReport,
}

impl Sample {
    /// Prepare a sample from raw block volumes (m³)
    pub fn from_volumes(volumes: &[f64], policy: AdmissionPolicy) -> PreparedSample {
        let mut sizes: Vec<f64> = volumes
            .iter()
            .copied()
            .filter(|&v| policy.admits(v))
            .map(units::linear_size_from_volume)
            .collect();
        sizes.sort_by(f64::total_cmp);

        let report = PrepReport {
            admitted: sizes.len(),
            rejected: volumes.len() - sizes.len(),
        };
        tracing::info!(
            admitted = report.admitted,
            rejected = report.rejected,
            "prepared block-size sample"
        );
        PreparedSample {
            sample: Self { sizes },
            report,
        }
    }

    /// Prepare a sample from block masses (t) and a density (kg/m³)
    pub fn from_masses(
        masses_t: &[f64],
        density_kg_m3: f64,
        policy: AdmissionPolicy,
    ) -> TalusResult<PreparedSample> {
        let volumes = masses_t
            .iter()
            .map(|&mass| units::volume_from_mass(mass, density_kg_m3))
            .collect::<TalusResult<Vec<f64>>>()?;
        Ok(Self::from_volumes(&volumes, policy))
    }

    /// Prepare a sample from per-block edge lengths in centimeters
    pub fn from_edges_cm(blocks: &[[f64; 3]], policy: AdmissionPolicy) -> PreparedSample {
        let volumes: Vec<f64> = blocks
            .iter()
            .map(|&[length, width, height]| units::volume_from_edges_cm(length, width, height))
            .collect();
        Self::from_volumes(&volumes, policy)
    }

    /// Ascending linear sizes (m), read-only
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// Sizes at the fixed 2-decimal display precision
    pub fn display_sizes(&self) -> Vec<f64> {
        self.sizes.iter().copied().map(units::display_round).collect()
    }

    /// Block volumes (m³): element-wise cube of the sizes
    pub fn volumes(&self) -> Vec<f64> {
        self.sizes
            .iter()
            .copied()
            .map(units::volume_from_linear_size)
            .collect()
    }

    /// Number of admitted blocks
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether no value survived admission
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// The sizes, or [`StatsError::EmptySample`] when nothing was admitted.
    ///
    /// Downstream percentile/fit/plot steps call this so an empty sample
    /// surfaces distinctly from a malformed input file.
    pub fn require_non_empty(&self) -> Result<&[f64], StatsError> {
        if self.sizes.is_empty() {
            Err(StatsError::EmptySample)
        } else {
            Ok(&self.sizes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumes_to_sizes_sorted() {
        let prepared = Sample::from_volumes(&[27.0, 1.0, 8.0], AdmissionPolicy::default());
        assert_eq!(prepared.sample.sizes(), &[1.0, 2.0, 3.0]);
        assert_eq!(prepared.report.admitted, 3);
        assert_eq!(prepared.report.rejected, 0);
    }

    #[test]
    fn test_negative_volumes_rejected() {
        let prepared = Sample::from_volumes(&[-1.0, 8.0, f64::NAN], AdmissionPolicy::default());
        assert_eq!(prepared.sample.sizes(), &[2.0]);
        assert_eq!(prepared.report.rejected, 2);
    }

    #[test]
    fn test_zero_policy_both_ways() {
        let volumes = [0.0, 1.0];
        let inclusive = Sample::from_volumes(&volumes, AdmissionPolicy { include_zero: true });
        assert_eq!(inclusive.sample.len(), 2);
        let strict = Sample::from_volumes(&volumes, AdmissionPolicy { include_zero: false });
        assert_eq!(strict.sample.sizes(), &[1.0]);
        assert_eq!(strict.report.rejected, 1);
    }

    #[test]
    fn test_from_masses() {
        let prepared =
            Sample::from_masses(&[2.65], 2650.0, AdmissionPolicy::default()).unwrap();
        assert_eq!(prepared.sample.sizes(), &[1.0]);
    }

    #[test]
    fn test_from_masses_bad_density() {
        assert!(Sample::from_masses(&[1.0], 0.0, AdmissionPolicy::default()).is_err());
    }

    #[test]
    fn test_from_edges() {
        let prepared =
            Sample::from_edges_cm(&[[100.0, 100.0, 100.0]], AdmissionPolicy::default());
        assert_eq!(prepared.sample.sizes(), &[1.0]);
    }

    #[test]
    fn test_volumes_roundtrip() {
        let prepared = Sample::from_volumes(&[1.0, 8.0, 27.0], AdmissionPolicy::default());
        let volumes = prepared.sample.volumes();
        assert!((volumes[0] - 1.0).abs() < 1e-12);
        assert!((volumes[2] - 27.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sample_error() {
        let prepared = Sample::from_volumes(&[-1.0], AdmissionPolicy::default());
        assert_eq!(
            prepared.sample.require_non_empty(),
            Err(StatsError::EmptySample)
        );
    }
}
