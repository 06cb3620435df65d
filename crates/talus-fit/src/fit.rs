//! Maximum-likelihood fitting
//!
//! One independent fit per selected family. The exponential MLE is
//! closed-form (location = sample minimum, scale = mean - minimum); the
//! shape families minimize their negative log-likelihood with the
//! deterministic Nelder-Mead simplex from [`crate::simplex`], so refits
//! reproduce identical parameters.
//!
//! A failed fit is reported per family and never blocks the others:
//! [`fit_all`] always returns whatever subset of models succeeded.

use crate::family::{Family, FittedModel};
use crate::simplex::NelderMead;
use thiserror::Error;

/// Errors from a single family's fit, recoverable per family
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Sample smaller than the family's parameter count allows
    #[error("{family} fit needs at least {required} values, sample has {len}")]
    SampleTooSmall {
        family: Family,
        len: usize,
        required: usize,
    },

    /// Sample contains values outside the fittable domain
    #[error("{family} fit requires strictly positive sizes")]
    NonPositiveValues { family: Family },

    /// All-identical sample: the likelihood has no interior maximum
    #[error("{family} fit failed: sample is degenerate (zero spread)")]
    Degenerate { family: Family },

    /// Optimizer exhausted its budget without meeting tolerances
    #[error("{family} fit did not converge after {iterations} iterations")]
    DidNotConverge { family: Family, iterations: usize },
}

impl FitError {
    /// The family whose fit failed
    pub fn family(&self) -> Family {
        match *self {
            FitError::SampleTooSmall { family, .. }
            | FitError::NonPositiveValues { family }
            | FitError::Degenerate { family }
            | FitError::DidNotConverge { family, .. } => family,
        }
    }
}

/// Result type alias for fitting operations
pub type FitResult<T> = Result<T, FitError>;

/// Outcome of fitting a family subset: successes plus per-family failures
#[derive(Debug, Clone, Default)]
pub struct FitOutcome {
    models: Vec<FittedModel>,
    failures: Vec<FitError>,
}

impl FitOutcome {
    /// Successfully fitted models, in selection order
    pub fn models(&self) -> &[FittedModel] {
        &self.models
    }

    /// Per-family failures, in selection order
    pub fn failures(&self) -> &[FitError] {
        &self.failures
    }

    /// Look up the fitted model for a family, if its fit succeeded
    pub fn model_for(&self, family: Family) -> Option<&FittedModel> {
        self.models.iter().find(|m| m.family() == family)
    }

    /// Whether no family fitted at all
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Fit every selected family to an ascending sample, independently.
///
/// The sample is never mutated; each failure is recorded and the
/// remaining families still produce results.
pub fn fit_all(sorted: &[f64], selection: &[Family]) -> FitOutcome {
    let mut outcome = FitOutcome::default();
    for &family in selection {
        match fit(family, sorted) {
            Ok(model) => outcome.models.push(model),
            Err(error) => {
                tracing::warn!(family = %family, %error, "fit failed, continuing with remaining families");
                outcome.failures.push(error);
            }
        }
    }
    outcome
}

/// Fit one family to an ascending sample by maximum likelihood
pub fn fit(family: Family, sorted: &[f64]) -> FitResult<FittedModel> {
    validate(family, sorted)?;
    let model = match family {
        Family::Exponential => fit_exponential(sorted)?,
        Family::GeneralizedExponential => fit_generalized_exponential(sorted)?,
        Family::PowerLaw => fit_power_law(sorted)?,
    };
    tracing::debug!(
        family = %family,
        log_likelihood = model.log_likelihood(sorted),
        "fit converged"
    );
    Ok(model)
}

fn validate(family: Family, sorted: &[f64]) -> FitResult<()> {
    let required = family.min_sample_size();
    if sorted.len() < required {
        return Err(FitError::SampleTooSmall {
            family,
            len: sorted.len(),
            required,
        });
    }
    if sorted[0] <= 0.0 {
        return Err(FitError::NonPositiveValues { family });
    }
    if sorted[sorted.len() - 1] - sorted[0] <= 0.0 {
        return Err(FitError::Degenerate { family });
    }
    Ok(())
}

/// Closed-form exponential MLE: location = min, scale = mean - min
fn fit_exponential(sorted: &[f64]) -> FitResult<FittedModel> {
    let min = sorted[0];
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let scale = mean - min;
    if scale <= 0.0 {
        return Err(FitError::Degenerate {
            family: Family::Exponential,
        });
    }
    Ok(FittedModel::Exponential {
        location: min,
        scale,
    })
}

/// Offset keeping the optimized location strictly below the sample
/// minimum, as a fraction of the sample range
const LOCATION_MARGIN: f64 = 1e-3;

fn fit_power_law(sorted: &[f64]) -> FitResult<FittedModel> {
    let family = Family::PowerLaw;
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let range = max - min;
    let margin = LOCATION_MARGIN * range;

    // theta = [ln shape_a, location, ln scale]; log-parameterization
    // keeps shape and scale positive without explicit bounds
    let objective = |theta: &[f64]| -> f64 {
        let shape_a = theta[0].exp();
        let location = theta[1];
        let scale = theta[2].exp();
        if !shape_a.is_finite() || !scale.is_finite() {
            return f64::INFINITY;
        }
        let mut nll = 0.0;
        for &x in sorted {
            let y = (x - location) / scale;
            if y <= 0.0 || y > 1.0 {
                // Outside the family's bounded support
                return f64::INFINITY;
            }
            nll -= shape_a.ln() + (shape_a - 1.0) * y.ln() - scale.ln();
        }
        nll
    };

    let start = [0.0, min - margin, (range + 2.0 * margin).ln()];
    let minimum = NelderMead::default().minimize(objective, &start);
    if !minimum.converged || !minimum.value.is_finite() {
        return Err(FitError::DidNotConverge {
            family,
            iterations: minimum.iterations,
        });
    }

    Ok(FittedModel::PowerLaw {
        shape_a: minimum.point[0].exp(),
        location: minimum.point[1],
        scale: minimum.point[2].exp(),
    })
}

fn fit_generalized_exponential(sorted: &[f64]) -> FitResult<FittedModel> {
    let family = Family::GeneralizedExponential;
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let range = max - min;
    let margin = LOCATION_MARGIN * range;
    let scale0 = mean - min;

    // theta = [ln a, ln b, ln c, location, ln scale]
    let objective = |theta: &[f64]| -> f64 {
        let a = theta[0].exp();
        let b = theta[1].exp();
        let c = theta[2].exp();
        let location = theta[3];
        let scale = theta[4].exp();
        if ![a, b, c, scale].iter().all(|v| v.is_finite() && *v > 0.0) {
            return f64::INFINITY;
        }
        let mut nll = 0.0;
        for &x in sorted {
            let y = (x - location) / scale;
            if y < 0.0 {
                return f64::INFINITY;
            }
            let hazard = a + b * (1.0 - (-c * y).exp());
            let cumulative = (a + b) * y - (b / c) * (1.0 - (-c * y).exp());
            nll -= hazard.ln() - cumulative - scale.ln();
        }
        if nll.is_nan() { f64::INFINITY } else { nll }
    };

    let start = [0.0, 0.0, 0.0, min - margin, scale0.ln()];
    let minimum = NelderMead::default().minimize(objective, &start);
    if !minimum.converged || !minimum.value.is_finite() {
        return Err(FitError::DidNotConverge {
            family,
            iterations: minimum.iterations,
        });
    }

    Ok(FittedModel::GeneralizedExponential {
        shape_a: minimum.point[0].exp(),
        shape_b: minimum.point[1].exp(),
        shape_c: minimum.point[2].exp(),
        location: minimum.point[3],
        scale: minimum.point[4].exp(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_1_to_10() -> Vec<f64> {
        (1..=10).map(f64::from).collect()
    }

    #[test]
    fn test_exponential_closed_form() {
        let model = fit(Family::Exponential, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        match model {
            FittedModel::Exponential { location, scale } => {
                assert_eq!(location, 1.0);
                assert!((scale - 1.5).abs() < 1e-12);
            }
            other => panic!("unexpected model {other:?}"),
        }
    }

    #[test]
    fn test_exponential_is_likelihood_maximum() {
        let sorted = sample_1_to_10();
        let fitted = fit(Family::Exponential, &sorted).unwrap();
        let best = fitted.log_likelihood(&sorted);
        for (dloc, dscale) in [(-0.1, 0.0), (0.0, 0.3), (0.0, -0.3)] {
            let perturbed = FittedModel::Exponential {
                location: fitted.location() + dloc,
                scale: fitted.scale() + dscale,
            };
            assert!(perturbed.log_likelihood(&sorted) <= best + 1e-9);
        }
    }

    #[test]
    fn test_power_law_fit_is_sane() {
        let sorted = sample_1_to_10();
        let model = fit(Family::PowerLaw, &sorted).unwrap();
        assert!(model.scale() > 0.0);
        assert!(model.location() < sorted[0]);
        // Fitted support must cover the sample
        assert!(model.location() + model.scale() >= sorted[9]);
        assert!(model.log_likelihood(&sorted).is_finite());
    }

    #[test]
    fn test_power_law_improves_on_start() {
        let sorted = sample_1_to_10();
        let fitted = fit(Family::PowerLaw, &sorted).unwrap();
        let start = FittedModel::PowerLaw {
            shape_a: 1.0,
            location: sorted[0] - 0.009,
            scale: 9.018,
        };
        assert!(fitted.log_likelihood(&sorted) >= start.log_likelihood(&sorted) - 1e-9);
    }

    #[test]
    fn test_fit_determinism() {
        let sorted = sample_1_to_10();
        for family in Family::ALL {
            let first = fit(family, &sorted);
            let second = fit(family, &sorted);
            assert_eq!(first, second, "{family} refit differed");
        }
        assert!(fit(Family::Exponential, &sorted).is_ok());
        assert!(fit(Family::PowerLaw, &sorted).is_ok());
    }

    #[test]
    fn test_degenerate_sample_errors_without_crashing() {
        // Two identical values: shape families are under-sized,
        // the exponential likelihood is degenerate
        let outcome = fit_all(&[5.0, 5.0], &Family::ALL);
        assert!(outcome.is_empty());
        assert_eq!(outcome.failures().len(), 3);
        assert_eq!(
            fit(Family::Exponential, &[5.0, 5.0]),
            Err(FitError::Degenerate {
                family: Family::Exponential
            })
        );
        assert_eq!(
            fit(Family::PowerLaw, &[5.0, 5.0]),
            Err(FitError::SampleTooSmall {
                family: Family::PowerLaw,
                len: 2,
                required: 3
            })
        );
    }

    #[test]
    fn test_partial_results_when_one_family_fails() {
        // 4 values: generalized exponential is under-sized but the
        // other families still fit
        let sorted = vec![1.0, 2.0, 4.0, 8.0];
        let outcome = fit_all(&sorted, &Family::ALL);
        assert!(outcome.model_for(Family::Exponential).is_some());
        assert!(outcome.model_for(Family::PowerLaw).is_some());
        assert!(outcome.model_for(Family::GeneralizedExponential).is_none());
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(
            outcome.failures()[0].family(),
            Family::GeneralizedExponential
        );
    }

    #[test]
    fn test_selection_subset_is_honored() {
        let sorted = sample_1_to_10();
        let outcome = fit_all(&sorted, &[Family::Exponential]);
        assert_eq!(outcome.models().len(), 1);
        assert!(outcome.model_for(Family::PowerLaw).is_none());
    }

    #[test]
    fn test_non_positive_sample_rejected() {
        let sorted = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            fit(Family::PowerLaw, &sorted),
            Err(FitError::NonPositiveValues {
                family: Family::PowerLaw
            })
        );
    }

    #[test]
    fn test_generalized_exponential_smoke() {
        // Geometric-ish spacing; the 5-parameter fit must either
        // converge or report a clean error, never panic
        let sorted: Vec<f64> = (1..=20).map(|i| 1.0 + (i as f64).sqrt()).collect();
        match fit(Family::GeneralizedExponential, &sorted) {
            Ok(model) => {
                assert!(model.scale() > 0.0);
                assert!(model.log_likelihood(&sorted).is_finite());
            }
            Err(FitError::DidNotConverge { .. }) => {}
            Err(other) => panic!("unexpected error {other}"),
        }
    }
}
