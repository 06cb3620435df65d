//! Shared chart styling: dimensions, fills, and per-family line colors

use plotters::style::RGBColor;
use talus_fit::Family;

/// Chart width in pixels
pub const PLOT_WIDTH: u32 = 1200;

/// Chart height in pixels
pub const PLOT_HEIGHT: u32 = 800;

/// Fill for raw volume histograms (light green)
pub const VOLUME_FILL: RGBColor = RGBColor(144, 238, 144);

/// Fill for linear-size histograms (sky blue)
pub const SIZE_FILL: RGBColor = RGBColor(135, 206, 235);

/// Line color for a fitted family's curves.
///
/// Each family keeps one fixed color across every chart so overlays
/// stay readable when several models are drawn together.
pub fn family_color(family: Family) -> RGBColor {
    match family {
        // dim gray
        Family::Exponential => RGBColor(105, 105, 105),
        // dark red
        Family::GeneralizedExponential => RGBColor(139, 0, 0),
        // dark green
        Family::PowerLaw => RGBColor(0, 100, 0),
    }
}
