//! talus-core - Block-size distribution analysis
//!
//! Characterizes a sample of rock-block volumes by their linear size
//! (the cube root of each block's volume):
//!
//! - **Units**: mass <-> volume via density, volume <-> linear size
//! - **Sample**: admissibility filtering into a canonical ascending sample
//! - **Table**: empirical and fitted percentile comparison, back-transformed
//!   to volume units
//! - **Session**: an explicit per-user context replacing implicit UI state
//!
//! The heavy lifting lives in the companion crates: `talus-stats`
//! (empirical percentiles, ECDF, histograms), `talus-fit`
//! (maximum-likelihood fits of the candidate families), and `talus-io`
//! (plain-text ingestion and persistence). This crate assembles them.
//!
//! Everything is synchronous and deterministic: re-running any step with
//! the same inputs reproduces the same parameters and tables, and no
//! state is shared between sessions.

pub mod error;
pub mod sample;
pub mod session;
pub mod table;
pub mod units;

pub use error::*;
pub use sample::*;
pub use session::*;
pub use table::*;
pub use units::*;

// Re-export the companion-crate types that appear in this crate's API
pub use talus_fit::{fit, fit_all, Family, FitError, FitOutcome, FittedModel};
pub use talus_io::{read_values_file, read_values_str, ParseError, ParsedValues};
pub use talus_stats::{
    Ecdf, Histogram, PercentileColumn, StatsError, SummaryStats, DISPLAY_LADDER, FULL_LADDER,
    HEADLINE_LADDER,
};
