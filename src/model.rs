use serde::{Deserialize, Serialize};

pub use self::store::ModelStore;

pub mod store;

/// Fitted line in the original units.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Model {
    /// Intercept.
    pub theta0: f64,

    /// Slope.
    pub theta1: f64,
}

impl Model {
    #[inline]
    #[must_use]
    pub fn predict(&self, mileage: f64) -> f64 {
        estimate_price(mileage, self.theta0, self.theta1)
    }
}

#[inline]
#[must_use]
pub fn estimate_price(mileage: f64, theta0: f64, theta1: f64) -> f64 {
    theta0 + theta1 * mileage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_price_ok() {
        assert_eq!(estimate_price(0.0, 8500.0, -0.02), 8500.0);
        assert_eq!(estimate_price(2.0, 1.0, 2.0), 5.0);
        assert_eq!(estimate_price(-1.0, 1.0, 2.0), -1.0);
    }

    #[test]
    fn predict_ok() {
        let model = Model {
            theta0: 8000.0,
            theta1: -0.5,
        };
        assert_eq!(model.predict(20000.0), -2000.0);
    }
}
