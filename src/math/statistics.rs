use std::fmt::{Display, Formatter};

#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Coefficient of determination.
///
/// Zero when the targets have no variance to explain.
#[must_use]
pub fn r2_score(targets: &[f64], predictions: &[f64]) -> f64 {
    debug_assert_eq!(targets.len(), predictions.len());

    let mean = mean(targets);
    let total_sum_of_squares: f64 = targets.iter().map(|y| (y - mean).powi(2)).sum();
    let residual_sum_of_squares: f64 = targets
        .iter()
        .zip(predictions)
        .map(|(y, prediction)| (y - prediction).powi(2))
        .sum();
    if total_sum_of_squares != 0.0 {
        1.0 - residual_sum_of_squares / total_sum_of_squares
    } else {
        0.0
    }
}

/// Qualitative band of an R² score.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FitQuality {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl FitQuality {
    #[must_use]
    pub fn from_r2(r2: f64) -> Self {
        if r2 > 0.9 {
            Self::Excellent
        } else if r2 > 0.7 {
            Self::Good
        } else if r2 > 0.5 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}

impl Display for FitQuality {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
        })
    }
}
