//! Batch gradient descent for a single-feature linear model.

use crate::trainer::loss::Residuals;

/// Gradient descent configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientDescent {
    pub learning_rate: f64,
    pub max_iterations: usize,

    /// Training stops once the cost changes by less than this between two iterations.
    pub convergence_threshold: f64,

    /// Progress is logged every so many iterations.
    pub log_interval: usize,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iterations: 10000,
            convergence_threshold: 1e-7,
            log_interval: 1000,
        }
    }
}

/// Outcome of a gradient descent run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fit {
    pub theta0: f64,
    pub theta1: f64,

    /// Iteration at which the convergence was detected, or the iteration limit.
    pub n_iterations: usize,

    /// Cost of the returned parameters.
    pub cost: f64,

    pub is_converged: bool,
}

impl GradientDescent {
    /// Fits `y = theta0 + theta1 * x` starting from the zero parameters.
    ///
    /// Convergence is checked before the update, so on convergence the returned parameters
    /// are the ones whose cost has just been measured: the last gradient step is not applied.
    #[tracing::instrument(level = "info", skip_all, fields(n_samples = x.len()))]
    pub fn fit(&self, x: &[f64], y: &[f64]) -> Fit {
        assert_eq!(x.len(), y.len(), "the sample sequences must be index-aligned");
        debug_assert!(!x.is_empty());

        let mut theta0 = 0.0;
        let mut theta1 = 0.0;
        let mut previous_cost = f64::INFINITY;
        let mut cost = f64::INFINITY;

        for iteration in 0..self.max_iterations {
            let mut residuals = Residuals::default();
            for (xi, yi) in x.iter().zip(y) {
                residuals.push(theta0 + theta1 * xi - yi, *xi);
            }
            cost = residuals.cost();

            if (previous_cost - cost).abs() < self.convergence_threshold {
                tracing::info!(iteration, cost, "converged");
                return Fit {
                    theta0,
                    theta1,
                    n_iterations: iteration,
                    cost,
                    is_converged: true,
                };
            }
            previous_cost = cost;

            let (step0, step1) = residuals.gradients(self.learning_rate);
            theta0 -= step0;
            theta1 -= step1;

            if iteration % self.log_interval == 0 {
                tracing::info!(iteration, cost, theta0, theta1);
            }
        }

        tracing::warn!(
            max_iterations = self.max_iterations,
            cost,
            "reached the iteration limit without full convergence",
        );
        Fit {
            theta0,
            theta1,
            n_iterations: self.max_iterations,
            cost,
            is_converged: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [f64; 3] = [0.0, 0.5, 1.0];
    const Y: [f64; 3] = [0.0, 0.5, 1.0];

    #[test]
    fn fit_converges_ok() {
        let fit = GradientDescent::default().fit(&X, &Y);
        assert!(fit.is_converged);
        assert!(fit.n_iterations < 1000);
        assert!(fit.cost < 1e-4);
        assert!(fit.theta0.abs() < 0.05);
        assert!((fit.theta1 - 1.0).abs() < 0.05);
    }

    #[test]
    fn fit_is_deterministic() {
        let gradient_descent = GradientDescent::default();
        assert_eq!(gradient_descent.fit(&X, &Y), gradient_descent.fit(&X, &Y));
    }

    #[test]
    fn fit_single_iteration_ok() {
        let gradient_descent = GradientDescent {
            max_iterations: 1,
            ..Default::default()
        };
        let fit = gradient_descent.fit(&X, &Y);
        assert!(!fit.is_converged);
        assert_eq!(fit.n_iterations, 1);
        // The cost of the initial zero parameters: (0.25 + 1.0) / 6.
        assert!((fit.cost - 1.25 / 6.0).abs() < 1e-12);
        assert!((fit.theta0 - 0.05).abs() < 1e-12);
        assert!((fit.theta1 - 0.125 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn fit_iteration_limit_ok() {
        let gradient_descent = GradientDescent {
            max_iterations: 5,
            ..Default::default()
        };
        let fit = gradient_descent.fit(&X, &Y);
        assert!(!fit.is_converged);
        assert_eq!(fit.n_iterations, 5);
    }

    /// Converging at iteration `k` must return the parameters after exactly `k` updates,
    /// the same as stopping at the iteration limit `k`.
    #[test]
    fn converged_step_is_not_applied() {
        let converged = GradientDescent::default().fit(&X, &Y);
        assert!(converged.is_converged);

        let limited = GradientDescent {
            max_iterations: converged.n_iterations,
            ..Default::default()
        }
        .fit(&X, &Y);
        assert!(!limited.is_converged);
        assert_eq!(limited.theta0, converged.theta0);
        assert_eq!(limited.theta1, converged.theta1);
    }

    #[test]
    fn fit_tight_threshold_ok() {
        let gradient_descent = GradientDescent {
            convergence_threshold: 1e-12,
            ..Default::default()
        };
        let fit = gradient_descent.fit(&X, &Y);
        assert!(fit.is_converged);
        assert!(fit.theta0.abs() < 1e-4);
        assert!((fit.theta1 - 1.0).abs() < 1e-4);
    }
}
