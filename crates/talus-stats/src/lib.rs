//! talus-stats - Statistical functions for block-size samples
//!
//! This crate provides the empirical side of the talus analysis:
//!
//! - **Percentiles**: linear-interpolation quantiles at arbitrary levels,
//!   plus the fixed ladders the application reports on
//! - **ECDF**: Empirical Cumulative Distribution Function for CDF plots
//! - **Histogram**: fixed-count binning into plot-ready series
//! - **Summary**: basic descriptive statistics for user feedback
//!
//! All functions operate on plain `f64` slices of linear block sizes
//! (meters) and are pure: same input, same output, no hidden state.

pub mod ecdf;
pub mod histogram;
pub mod percentile;
pub mod summary;

pub use ecdf::*;
pub use histogram::*;
pub use percentile::*;
pub use summary::*;
