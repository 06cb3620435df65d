//! Candidate distribution families and fitted models
//!
//! A [`FittedModel`] is a tagged variant over the three families, each
//! carrying its own parameter tuple. Parameters are only meaningful in
//! combination with the family tag; there is no cross-family comparison
//! of raw parameters.
//!
//! Parameterization follows the standard location/scale convention: with
//! y = (x - location) / scale, the standardized forms are
//!
//! - exponential:             pdf(y) = exp(-y),            y >= 0
//! - generalized exponential: pdf(y) = h(y) exp(-H(y)),    y >= 0, where
//!   h(y) = a + b (1 - exp(-c y)) and H(y) is its integral
//! - power-law:               pdf(y) = a y^(a-1),          0 <= y <= 1

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of parametric families offered for fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Exponential,
    GeneralizedExponential,
    PowerLaw,
}

impl Family {
    /// All families, in fitting and display order
    pub const ALL: [Family; 3] = [
        Family::Exponential,
        Family::GeneralizedExponential,
        Family::PowerLaw,
    ];

    /// Number of free parameters
    pub fn param_count(&self) -> usize {
        match self {
            Family::Exponential => 2,
            Family::GeneralizedExponential => 5,
            Family::PowerLaw => 3,
        }
    }

    /// Minimum sample size for a meaningful fit.
    ///
    /// The generalized exponential needs at least 5 effective degrees of
    /// freedom for its 5-parameter likelihood.
    pub fn min_sample_size(&self) -> usize {
        match self {
            Family::Exponential => 2,
            Family::GeneralizedExponential => 5,
            Family::PowerLaw => 3,
        }
    }

    /// Short name used in tables and plot legends
    pub fn name(&self) -> &'static str {
        match self {
            Family::Exponential => "exponential",
            Family::GeneralizedExponential => "generalized exponential",
            Family::PowerLaw => "power-law",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A distribution fitted to a sample, immutable once created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FittedModel {
    Exponential {
        location: f64,
        scale: f64,
    },
    GeneralizedExponential {
        shape_a: f64,
        shape_b: f64,
        shape_c: f64,
        location: f64,
        scale: f64,
    },
    PowerLaw {
        shape_a: f64,
        location: f64,
        scale: f64,
    },
}

impl FittedModel {
    /// The family this model belongs to
    pub fn family(&self) -> Family {
        match self {
            FittedModel::Exponential { .. } => Family::Exponential,
            FittedModel::GeneralizedExponential { .. } => Family::GeneralizedExponential,
            FittedModel::PowerLaw { .. } => Family::PowerLaw,
        }
    }

    /// Scale parameter (always > 0 for a valid model)
    pub fn scale(&self) -> f64 {
        match *self {
            FittedModel::Exponential { scale, .. }
            | FittedModel::GeneralizedExponential { scale, .. }
            | FittedModel::PowerLaw { scale, .. } => scale,
        }
    }

    /// Location parameter
    pub fn location(&self) -> f64 {
        match *self {
            FittedModel::Exponential { location, .. }
            | FittedModel::GeneralizedExponential { location, .. }
            | FittedModel::PowerLaw { location, .. } => location,
        }
    }

    /// Probability density at `x`
    pub fn pdf(&self, x: f64) -> f64 {
        match *self {
            FittedModel::Exponential { location, scale } => {
                let y = (x - location) / scale;
                if y < 0.0 {
                    0.0
                } else {
                    (-y).exp() / scale
                }
            }
            FittedModel::GeneralizedExponential {
                shape_a,
                shape_b,
                shape_c,
                location,
                scale,
            } => {
                let y = (x - location) / scale;
                if y < 0.0 {
                    0.0
                } else {
                    let h = hazard(y, shape_a, shape_b, shape_c);
                    h * (-cumulative_hazard(y, shape_a, shape_b, shape_c)).exp() / scale
                }
            }
            FittedModel::PowerLaw {
                shape_a,
                location,
                scale,
            } => {
                let y = (x - location) / scale;
                if !(0.0..=1.0).contains(&y) {
                    0.0
                } else {
                    shape_a * y.powf(shape_a - 1.0) / scale
                }
            }
        }
    }

    /// Cumulative probability at `x`
    pub fn cdf(&self, x: f64) -> f64 {
        match *self {
            FittedModel::Exponential { location, scale } => {
                let y = (x - location) / scale;
                if y < 0.0 {
                    0.0
                } else {
                    1.0 - (-y).exp()
                }
            }
            FittedModel::GeneralizedExponential {
                shape_a,
                shape_b,
                shape_c,
                location,
                scale,
            } => {
                let y = (x - location) / scale;
                if y < 0.0 {
                    0.0
                } else {
                    1.0 - (-cumulative_hazard(y, shape_a, shape_b, shape_c)).exp()
                }
            }
            FittedModel::PowerLaw {
                shape_a,
                location,
                scale,
            } => {
                let y = (x - location) / scale;
                if y < 0.0 {
                    0.0
                } else if y > 1.0 {
                    1.0
                } else {
                    y.powf(shape_a)
                }
            }
        }
    }

    /// Quantile function (inverse CDF) at probability `p` in [0, 1].
    ///
    /// Closed-form for the exponential and power-law; monotone bisection
    /// on the cumulative hazard for the generalized exponential. The
    /// unbounded families return infinity at p = 1.
    pub fn quantile(&self, p: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&p));
        match *self {
            FittedModel::Exponential { location, scale } => {
                location - scale * (1.0 - p).ln()
            }
            FittedModel::GeneralizedExponential {
                shape_a,
                shape_b,
                shape_c,
                location,
                scale,
            } => {
                let target = -(1.0 - p).ln();
                if target == 0.0 {
                    return location;
                }
                if target.is_infinite() {
                    return f64::INFINITY;
                }
                let y = invert_cumulative_hazard(target, shape_a, shape_b, shape_c);
                location + scale * y
            }
            FittedModel::PowerLaw {
                shape_a,
                location,
                scale,
            } => location + scale * p.powf(1.0 / shape_a),
        }
    }

    /// Log-likelihood of an ascending sample under this model.
    ///
    /// Returns negative infinity when any observation falls outside the
    /// model's support.
    pub fn log_likelihood(&self, sorted: &[f64]) -> f64 {
        sorted.iter().map(|&x| self.pdf(x).ln()).sum()
    }

    /// Evaluation grid over the inner 99.8% probability range
    /// (quantiles 0.001 to 0.999), sampled at `n` points.
    ///
    /// `n` is chosen equal to the sample size so fitted-curve resolution
    /// matches the histogram resolution.
    pub fn plot_grid(&self, n: usize) -> Vec<f64> {
        const P_LO: f64 = 0.001;
        const P_HI: f64 = 0.999;
        if n < 2 {
            return vec![self.quantile(0.5)];
        }
        (0..n)
            .map(|i| {
                let p = P_LO + (P_HI - P_LO) * i as f64 / (n - 1) as f64;
                self.quantile(p)
            })
            .collect()
    }

    /// (x, pdf(x)) series over the plot grid
    pub fn density_curve(&self, n: usize) -> Vec<(f64, f64)> {
        self.plot_grid(n)
            .into_iter()
            .map(|x| (x, self.pdf(x)))
            .collect()
    }

    /// (x, cdf(x)) series over the plot grid
    pub fn cdf_curve(&self, n: usize) -> Vec<(f64, f64)> {
        self.plot_grid(n)
            .into_iter()
            .map(|x| (x, self.cdf(x)))
            .collect()
    }
}

/// Hazard rate of the standardized generalized exponential
fn hazard(y: f64, a: f64, b: f64, c: f64) -> f64 {
    a + b * (1.0 - (-c * y).exp())
}

/// Cumulative hazard H(y) = (a + b) y - (b / c)(1 - exp(-c y))
fn cumulative_hazard(y: f64, a: f64, b: f64, c: f64) -> f64 {
    (a + b) * y - (b / c) * (1.0 - (-c * y).exp())
}

/// Solve H(y) = target for y >= 0 by bracketed bisection.
///
/// H is strictly increasing (its derivative is the hazard, which is
/// positive for a > 0, b >= 0), so the root is unique.
fn invert_cumulative_hazard(target: f64, a: f64, b: f64, c: f64) -> f64 {
    let mut hi = 1.0;
    let mut doublings = 0;
    while cumulative_hazard(hi, a, b, c) < target {
        hi *= 2.0;
        doublings += 1;
        if doublings > 200 {
            return f64::INFINITY;
        }
    }

    let mut lo = 0.0;
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if cumulative_hazard(mid, a, b, c) < target {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < 1e-13 * hi.max(1.0) {
            break;
        }
    }
    0.5 * (lo + hi)
}
