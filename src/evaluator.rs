use crate::dataset::Dataset;
use crate::math::statistics::{r2_score, FitQuality};
use crate::model::{Model, ModelStore};
use crate::opts::EvaluateOpts;
use crate::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Evaluation {
    pub r2: f64,
    pub quality: FitQuality,
}

#[tracing::instrument(skip_all)]
pub fn run(opts: EvaluateOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "evaluate"));

    let model = ModelStore::new(&opts.model.model).load()?;
    let dataset = Dataset::read(&opts.dataset.data, opts.dataset.limits())
        .with_context(|| format!("failed to read `{}`", opts.dataset.data.display()))?;
    tracing::info!(n_samples = dataset.len(), "evaluating the model…");

    let evaluation = evaluate(&model, &dataset);
    println!("Model precision (R²): {:.4} {}", evaluation.r2, evaluation.quality);
    Ok(())
}

#[must_use]
pub fn evaluate(model: &Model, dataset: &Dataset) -> Evaluation {
    let predictions: Vec<f64> = dataset
        .mileages
        .iter()
        .map(|mileage| model.predict(*mileage))
        .collect();
    let r2 = r2_score(&dataset.prices, &predictions);
    Evaluation {
        r2,
        quality: FitQuality::from_r2(r2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset {
            mileages: vec![0.0, 1.0, 2.0],
            prices: vec![1.0, 3.0, 5.0],
        }
    }

    #[test]
    fn evaluate_perfect_fit() {
        let model = Model {
            theta0: 1.0,
            theta1: 2.0,
        };
        let evaluation = evaluate(&model, &dataset());
        assert!((evaluation.r2 - 1.0).abs() < 1e-12);
        assert_eq!(evaluation.quality, FitQuality::Excellent);
    }

    #[test]
    fn evaluate_mean_fit() {
        let model = Model {
            theta0: 3.0,
            theta1: 0.0,
        };
        let evaluation = evaluate(&model, &dataset());
        assert!(evaluation.r2.abs() < 1e-12);
        assert_eq!(evaluation.quality, FitQuality::Poor);
    }

    #[test]
    fn evaluate_moderate_fit() {
        // Residual sum of squares 6 against the total of 14.
        let model = Model {
            theta0: 1.0,
            theta1: 2.0,
        };
        let dataset = Dataset {
            mileages: vec![0.0, 1.0, 2.0],
            prices: vec![2.0, 1.0, 6.0],
        };
        let evaluation = evaluate(&model, &dataset);
        assert_eq!(evaluation.quality, FitQuality::Moderate);
    }
}
