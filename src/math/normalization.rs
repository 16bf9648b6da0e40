//! Min-max feature scaling.

use itertools::{Itertools, MinMaxResult};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum NormalizationError {
    #[error("cannot normalize an empty sequence")]
    Empty,

    #[error("degenerate input: all values are equal to {0}, the range is zero")]
    Degenerate(f64),
}

/// Bounds of a normalized sequence, needed to map the values back.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    #[inline]
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Rescales the values to `[0, 1]`.
///
/// A constant sequence has no range to divide by and is rejected as degenerate.
pub fn normalize(data: &[f64]) -> Result<(Vec<f64>, Range), NormalizationError> {
    let range = match data.iter().copied().minmax() {
        MinMaxResult::NoElements => return Err(NormalizationError::Empty),
        MinMaxResult::OneElement(value) => return Err(NormalizationError::Degenerate(value)),
        MinMaxResult::MinMax(min, max) => Range { min, max },
    };
    if range.span() == 0.0 {
        return Err(NormalizationError::Degenerate(range.min));
    }
    let normalized = data
        .iter()
        .map(|value| (value - range.min) / (range.max - range.min))
        .collect();
    Ok((normalized, range))
}

/// Maps the parameters fitted on normalized data back to the original units.
///
/// The operation order is kept fixed so that the results are reproducible
/// bit-for-bit.
#[must_use]
pub fn denormalize(theta0: f64, theta1: f64, x: Range, y: Range) -> (f64, f64) {
    let theta1 = theta1 * (y.max - y.min) / (x.max - x.min);
    let theta0 = y.min + (theta0 * (y.max - y.min)) - (theta1 * x.min);
    (theta0, theta1)
}
