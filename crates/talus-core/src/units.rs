//! Unit conversion arithmetic
//!
//! Masses are in tonnes, volumes in m³, linear sizes in meters, densities
//! in kg/m³. The linear size of a block is the cube root of its volume
//! and is kept unrounded internally; the fixed 2-decimal display
//! precision is applied only at presentation boundaries so rounding error
//! never compounds into the distribution fit.

use crate::error::{RangeError, TalusResult};
use serde::{Deserialize, Serialize};

/// Typical rock density used when the caller supplies none (kg/m³)
pub const DEFAULT_DENSITY: f64 = 2700.0;

/// Decimal places for end-user quantities
pub const DISPLAY_PRECISION: u32 = 2;

/// A validated positive density (kg/m³)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density(f64);

impl Density {
    /// Construct a density, rejecting non-positive values
    pub fn new(kg_per_m3: f64) -> TalusResult<Self> {
        if kg_per_m3 <= 0.0 || !kg_per_m3.is_finite() {
            return Err(RangeError::NonPositiveDensity {
                density: kg_per_m3,
            }
            .into());
        }
        Ok(Self(kg_per_m3))
    }

    /// The density value in kg/m³
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(DEFAULT_DENSITY)
    }
}

/// Convert a block mass (t) to volume (m³) via density.
///
/// Fails when the density is not a positive divisor.
pub fn volume_from_mass(mass_t: f64, density_kg_m3: f64) -> TalusResult<f64> {
    let density = Density::new(density_kg_m3)?;
    Ok(mass_t * 1000.0 / density.value())
}

/// Convert a block volume (m³) back to mass (t)
pub fn mass_from_volume(volume_m3: f64, density_kg_m3: f64) -> TalusResult<f64> {
    let density = Density::new(density_kg_m3)?;
    Ok(volume_m3 * density.value() / 1000.0)
}

/// Linear block size (m): cube root of the volume, unrounded
pub fn linear_size_from_volume(volume_m3: f64) -> f64 {
    volume_m3.cbrt()
}

/// Back-transform a linear size (m) to volume (m³)
pub fn volume_from_linear_size(size_m: f64) -> f64 {
    size_m.powi(3)
}

/// Block volume (m³) from edge lengths in centimeters
pub fn volume_from_edges_cm(length_cm: f64, width_cm: f64, height_cm: f64) -> f64 {
    (length_cm / 100.0) * (width_cm / 100.0) * (height_cm / 100.0)
}

/// Round to the fixed 2-decimal display precision
pub fn display_round(value: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_PRECISION as i32);
    (value * factor).round() / factor
}
