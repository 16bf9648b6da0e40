//! Fits the price model on the dataset.
//!
//! Both columns are min-max normalized, the line is fitted with a batch gradient descent
//! in the normalized space and then mapped back to the original units.

use std::time::Instant;

use tracing::info;

use crate::dataset::Dataset;
use crate::helpers::format_elapsed;
use crate::math::normalization::{denormalize, normalize};
use crate::model::{Model, ModelStore};
use crate::opts::TrainOpts;
use crate::prelude::*;
use crate::trainer::descent::{Fit, GradientDescent};

pub mod descent;
pub mod loss;

#[tracing::instrument(skip_all)]
pub fn run(opts: TrainOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "train"));

    let dataset = Dataset::read(&opts.dataset.data, opts.dataset.limits())
        .with_context(|| format!("failed to read `{}`", opts.dataset.data.display()))?;
    info!(n_samples = dataset.len(), "training the model on the normalized data…");

    let start_instant = Instant::now();
    let (model, fit) = train(&dataset, opts.gradient_descent.into())?;
    info!(
        elapsed = format_elapsed(start_instant).as_str(),
        n_iterations = fit.n_iterations,
        is_converged = fit.is_converged,
        model.theta0,
        model.theta1,
        "training completed",
    );

    let store = ModelStore::new(&opts.model.model);
    store.save(&model)?;
    info!(path = %store.path().display(), "model saved");

    Ok(())
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TrainError {
    #[error("{n_mileages} mileages do not match {n_prices} prices")]
    LengthMismatch { n_mileages: usize, n_prices: usize },

    #[error("the fitted parameters are not finite (theta0 = {theta0}, theta1 = {theta1}), the data range is too narrow")]
    NonFinite { theta0: f64, theta1: f64 },
}

/// Fits the model in the original units.
pub fn train(dataset: &Dataset, gradient_descent: GradientDescent) -> Result<(Model, Fit)> {
    if dataset.mileages.len() != dataset.prices.len() {
        return Err(TrainError::LengthMismatch {
            n_mileages: dataset.mileages.len(),
            n_prices: dataset.prices.len(),
        }
        .into());
    }
    let (x, x_range) = normalize(&dataset.mileages).context("cannot normalize the mileages")?;
    let (y, y_range) = normalize(&dataset.prices).context("cannot normalize the prices")?;
    let fit = gradient_descent.fit(&x, &y);
    let (theta0, theta1) = denormalize(fit.theta0, fit.theta1, x_range, y_range);
    if !theta0.is_finite() || !theta1.is_finite() {
        return Err(TrainError::NonFinite { theta0, theta1 }.into());
    }
    Ok((Model { theta0, theta1 }, fit))
}
