//! Deterministic Nelder-Mead simplex minimization
//!
//! Derivative-free minimizer used for the maximum-likelihood fits of the
//! shape families, whose negative log-likelihoods have no closed-form
//! minimum. The starting simplex is built deterministically from the
//! initial point, so repeated fits of the same sample produce identical
//! parameters.
//!
//! Standard coefficients: reflection 1, expansion 2, contraction 1/2,
//! shrink 1/2. Convergence is declared when both the function-value and
//! coordinate spreads of the simplex fall below their tolerances.

/// Result of a simplex minimization
#[derive(Debug, Clone)]
pub struct Minimum {
    /// Coordinates of the best vertex
    pub point: Vec<f64>,
    /// Objective value at the best vertex
    pub value: f64,
    /// Iterations used
    pub iterations: usize,
    /// Whether the tolerances were met within the iteration budget
    pub converged: bool,
}

/// Nelder-Mead minimizer configuration
#[derive(Debug, Clone)]
pub struct NelderMead {
    /// Function-value spread tolerance
    pub ftol: f64,
    /// Coordinate spread tolerance
    pub xtol: f64,
    /// Iteration budget per problem dimension
    pub max_iter_per_dim: usize,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            ftol: 1e-9,
            xtol: 1e-9,
            max_iter_per_dim: 500,
        }
    }
}

impl NelderMead {
    /// Minimize `f` starting from `x0`.
    ///
    /// The initial simplex perturbs each coordinate by 5%, with a small
    /// absolute step for zero coordinates.
    pub fn minimize<F>(&self, f: F, x0: &[f64]) -> Minimum
    where
        F: Fn(&[f64]) -> f64,
    {
        let dim = x0.len();
        let max_iter = self.max_iter_per_dim * dim.max(1);

        // Initial simplex: x0 plus one perturbed vertex per coordinate
        let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
        simplex.push(x0.to_vec());
        for i in 0..dim {
            let mut vertex = x0.to_vec();
            if vertex[i] != 0.0 {
                vertex[i] *= 1.05;
            } else {
                vertex[i] = 0.00025;
            }
            simplex.push(vertex);
        }
        let mut values: Vec<f64> = simplex.iter().map(|v| f(v)).collect();

        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iter {
            // Order vertices best to worst (NaN sorts last)
            let mut order: Vec<usize> = (0..=dim).collect();
            order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));
            simplex = order.iter().map(|&i| simplex[i].clone()).collect();
            values = order.iter().map(|&i| values[i]).collect();

            if self.spread_small(&simplex, &values) {
                converged = true;
                break;
            }
            iterations += 1;

            // Centroid of all but the worst vertex
            let centroid: Vec<f64> = (0..dim)
                .map(|k| simplex[..dim].iter().map(|v| v[k]).sum::<f64>() / dim as f64)
                .collect();

            let worst = values[dim];
            let second_worst = values[dim - 1];
            let best = values[0];

            let reflected = combine(&centroid, &simplex[dim], 2.0, -1.0);
            let f_reflected = f(&reflected);

            if f_reflected < best {
                // Try to expand further in the same direction
                let expanded = combine(&centroid, &simplex[dim], 3.0, -2.0);
                let f_expanded = f(&expanded);
                if f_expanded < f_reflected {
                    simplex[dim] = expanded;
                    values[dim] = f_expanded;
                } else {
                    simplex[dim] = reflected;
                    values[dim] = f_reflected;
                }
            } else if f_reflected < second_worst {
                simplex[dim] = reflected;
                values[dim] = f_reflected;
            } else {
                // Contract toward the centroid, outside or inside
                let contracted = if f_reflected < worst {
                    combine(&centroid, &reflected, 0.5, 0.5)
                } else {
                    combine(&centroid, &simplex[dim], 0.5, 0.5)
                };
                let f_contracted = f(&contracted);
                if f_contracted < worst.min(f_reflected) {
                    simplex[dim] = contracted;
                    values[dim] = f_contracted;
                } else {
                    // Shrink the whole simplex toward the best vertex
                    for i in 1..=dim {
                        simplex[i] = combine(&simplex[0], &simplex[i], 0.5, 0.5);
                        values[i] = f(&simplex[i]);
                    }
                }
            }
        }

        let best_index = (0..=dim)
            .min_by(|&i, &j| values[i].total_cmp(&values[j]))
            .unwrap_or(0);
        Minimum {
            point: simplex[best_index].clone(),
            value: values[best_index],
            iterations,
            converged,
        }
    }

    fn spread_small(&self, simplex: &[Vec<f64>], values: &[f64]) -> bool {
        let f_spread = values
            .iter()
            .map(|v| (v - values[0]).abs())
            .fold(0.0, f64::max);
        if !(f_spread <= self.ftol) {
            return false;
        }
        let x_spread = simplex[1..]
            .iter()
            .flat_map(|vertex| {
                vertex
                    .iter()
                    .zip(simplex[0].iter())
                    .map(|(a, b)| (a - b).abs())
            })
            .fold(0.0, f64::max);
        x_spread <= self.xtol
    }
}

/// Linear combination wa * a + wb * b, element-wise
fn combine(a: &[f64], b: &[f64], wa: f64, wb: f64) -> Vec<f64> {
    a.iter().zip(b.iter()).map(|(x, y)| wa * x + wb * y).collect()
}
