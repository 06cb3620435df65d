//! # talus-plot
//!
//! Chart rendering for block-size analysis:
//!
//! - Paired raw-data histograms (volumes and linear sizes)
//! - Empirical distribution panels (histogram, ECDF, log-scale ECDF)
//! - Fitted-model overlays on the empirical density and CDF
//!
//! All charts are rendered to PNG files with the `plotters` bitmap
//! backend, which works in headless environments without system fonts.

pub mod error;
pub mod figure;
pub mod render;
pub mod style;

pub use error::{PlotError, PlotResult};
pub use figure::FigureHandle;
pub use render::{render_distribution_panels, render_fit_overlays, render_sample_histograms};
pub use style::{family_color, PLOT_HEIGHT, PLOT_WIDTH};
