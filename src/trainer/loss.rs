/// Accumulates the residuals of a single pass over the sample.
#[derive(Default)]
pub struct Residuals {
    count: usize,
    sum: f64,
    squared_sum: f64,
    weighted_sum: f64,
}

impl Residuals {
    /// Pushes the residual `prediction - target` of the sample point `x`.
    #[inline]
    pub fn push(&mut self, residual: f64, x: f64) {
        self.sum += residual;
        self.squared_sum += residual * residual;
        self.weighted_sum += residual * x;
        self.count += 1;
    }

    /// Halved mean squared error.
    #[must_use]
    pub fn cost(&self) -> f64 {
        (1.0 / (2.0 * self.count as f64)) * self.squared_sum
    }

    /// Intercept and slope steps for the learning rate.
    #[must_use]
    pub fn gradients(&self, learning_rate: f64) -> (f64, f64) {
        let n = self.count as f64;
        (
            learning_rate * (1.0 / n) * self.sum,
            learning_rate * (1.0 / n) * self.weighted_sum,
        )
    }
}
