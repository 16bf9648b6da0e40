//! Interactive price estimation.

use std::io::{self, BufRead, Write};

use crate::model::{Model, ModelStore};
use crate::opts::PredictOpts;
use crate::prelude::*;

const PROMPT: &str = "Enter the mileage (in km): ";

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("failed to communicate with the terminal")]
    Io(#[from] io::Error),

    #[error("no mileage entered")]
    NoInput,

    #[error("invalid input `{0}`: expected a finite number")]
    InvalidInput(String),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Prediction {
    pub mileage: f64,

    /// Estimated price, never negative.
    pub price: f64,

    /// Whether the estimate was negative and has been raised to zero.
    pub is_clamped: bool,
}

#[tracing::instrument(skip_all)]
pub fn run(opts: PredictOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "predict"));

    let model = ModelStore::new(&opts.model.model).load()?;
    let stdin = io::stdin();
    predict(&model, &mut stdin.lock(), &mut io::stdout())?;
    Ok(())
}

/// Prompts for a mileage on the input and writes the estimated price to the output.
pub fn predict(
    model: &Model,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Prediction, PredictError> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PredictError::NoInput);
    }
    let line = line.trim();
    let mileage = match line.parse::<f64>() {
        Ok(mileage) if mileage.is_finite() => mileage,
        _ => return Err(PredictError::InvalidInput(line.to_string())),
    };

    let estimate = model.predict(mileage);
    let prediction = if estimate < 0.0 {
        tracing::warn!(
            mileage,
            price = estimate,
            "predicted price is negative, the mileage may be outside the training data range",
        );
        Prediction {
            mileage,
            price: 0.0,
            is_clamped: true,
        }
    } else {
        Prediction {
            mileage,
            price: estimate,
            is_clamped: false,
        }
    };

    writeln!(
        output,
        "Estimated price for {} km: {:.2}",
        prediction.mileage, prediction.price,
    )?;
    Ok(prediction)
}
