//! Empirical percentiles by linear interpolation
//!
//! Percentiles are computed with the standard "linear" quantile method:
//! for a sorted sample of n values and a level p in [0, 100], the rank
//! h = (n - 1) * p / 100 is interpolated between the two surrounding
//! order statistics. This matches what the block-size reports expect
//! (e.g. the 95th percentile of 1..=10 is 9.55).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The headline percentile range for block-size design (95th-98th).
///
/// These four levels drive downstream engineering decisions and are
/// emphasized wherever percentile tables are displayed.
pub const HEADLINE_LADDER: [f64; 4] = [95.0, 96.0, 97.0, 98.0];

/// The display ladder used for comparison tables.
pub const DISPLAY_LADDER: [f64; 10] =
    [0.0, 25.0, 50.0, 75.0, 95.0, 96.0, 97.0, 98.0, 99.0, 100.0];

/// The full 25-point ladder used for plotting the empirical CDF.
///
/// Coarse 5% steps up to the 90th percentile, then 1% resolution through
/// the upper tail where the design percentiles live.
pub const FULL_LADDER: [f64; 25] = [
    0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0,
    80.0, 85.0, 90.0, 95.0, 96.0, 97.0, 98.0, 99.0, 100.0,
];

/// Errors from empirical statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Percentile level requested outside [0, 100]
    #[error("percentile level {level} is outside the valid range 0-100")]
    LevelOutOfRange { level: f64 },

    /// No admitted values to compute on
    #[error("sample is empty: no admitted values to compute statistics on")]
    EmptySample,
}

/// Result type alias for empirical statistics
pub type StatsResult<T> = Result<T, StatsError>;

/// Compute a single percentile of a sorted sample by linear interpolation.
///
/// `sorted` must be in ascending order; `level` is a percentage in [0, 100].
/// For a 1-element sample every level maps to that element.
pub fn percentile_of_sorted(sorted: &[f64], level: f64) -> StatsResult<f64> {
    if sorted.is_empty() {
        return Err(StatsError::EmptySample);
    }
    if !(0.0..=100.0).contains(&level) || level.is_nan() {
        return Err(StatsError::LevelOutOfRange { level });
    }

    let n = sorted.len();
    if n == 1 {
        return Ok(sorted[0]);
    }

    let rank = (n - 1) as f64 * level / 100.0;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Compute percentiles of a sorted sample at each requested level.
///
/// All levels are validated before any value is returned, so a bad level
/// never yields a partial column.
pub fn percentiles_of_sorted(sorted: &[f64], levels: &[f64]) -> StatsResult<Vec<f64>> {
    levels
        .iter()
        .map(|&level| percentile_of_sorted(sorted, level))
        .collect()
}

/// Precomputed percentile column for one data source.
///
/// Stores (level, value) pairs in ladder order for assembly into
/// comparison tables and CDF plots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentileColumn {
    /// Percentile levels in the order they were requested
    pub levels: Vec<f64>,
    /// Value at each level, same order
    pub values: Vec<f64>,
}

impl PercentileColumn {
    /// Compute a column from a sorted sample at the given ladder
    pub fn from_sorted(sorted: &[f64], levels: &[f64]) -> StatsResult<Self> {
        Ok(Self {
            levels: levels.to_vec(),
            values: percentiles_of_sorted(sorted, levels)?,
        })
    }

    /// Look up the value at a specific level, if it was computed
    pub fn get(&self, level: f64) -> Option<f64> {
        self.levels
            .iter()
            .position(|&l| (l - level).abs() < f64::EPSILON)
            .map(|i| self.values[i])
    }

    /// Iterate over (level, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.levels.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_endpoints_are_min_and_max() {
        let sorted = vec![1.5, 2.0, 7.3, 9.9];
        assert_eq!(percentile_of_sorted(&sorted, 0.0).unwrap(), 1.5);
        assert_eq!(percentile_of_sorted(&sorted, 100.0).unwrap(), 9.9);
    }

    #[test]
    fn test_linear_interpolation_p95_of_1_to_10() {
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        let p95 = percentile_of_sorted(&sorted, 95.0).unwrap();
        assert!((p95 - 9.55).abs() < 1e-12);
    }

    #[test]
    fn test_median_of_even_sample() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_of_sorted(&sorted, 50.0).unwrap(), 2.5);
    }

    #[test]
    fn test_single_element_sample() {
        let sorted = vec![4.2];
        for level in [0.0, 37.0, 50.0, 95.0, 100.0] {
            assert_eq!(percentile_of_sorted(&sorted, level).unwrap(), 4.2);
        }
    }

    #[test]
    fn test_level_out_of_range() {
        let sorted = vec![1.0, 2.0];
        assert_eq!(
            percentile_of_sorted(&sorted, -1.0),
            Err(StatsError::LevelOutOfRange { level: -1.0 })
        );
        assert_eq!(
            percentile_of_sorted(&sorted, 100.5),
            Err(StatsError::LevelOutOfRange { level: 100.5 })
        );
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(percentile_of_sorted(&[], 50.0), Err(StatsError::EmptySample));
    }

    #[test]
    fn test_column_lookup() {
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        let column = PercentileColumn::from_sorted(&sorted, &HEADLINE_LADDER).unwrap();
        assert!((column.get(95.0).unwrap() - 9.55).abs() < 1e-12);
        assert!(column.get(50.0).is_none());
    }

    #[test]
    fn test_full_ladder_has_fine_tail() {
        assert_eq!(FULL_LADDER.len(), 25);
        assert_eq!(FULL_LADDER[0], 0.0);
        assert_eq!(FULL_LADDER[24], 100.0);
        // 1% resolution from 95 upward
        assert_eq!(&FULL_LADDER[19..], &[95.0, 96.0, 97.0, 98.0, 99.0, 100.0]);
    }

    proptest! {
        #[test]
        fn prop_percentiles_monotone_in_level(
            mut values in proptest::collection::vec(0.0f64..1e6, 1..50),
            levels in proptest::collection::vec(0.0f64..=100.0, 2..20),
        ) {
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let mut sorted_levels = levels;
            sorted_levels.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let column = percentiles_of_sorted(&values, &sorted_levels).unwrap();
            for pair in column.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }
}
