#![warn(clippy::all)]

use std::process::ExitCode;

use clap::Parser;

use crate::opts::{Opts, Subcommand};
use crate::prelude::*;

mod dataset;
mod evaluator;
mod helpers;
mod math;
mod model;
mod opts;
mod predictor;
mod prelude;
mod trainer;
mod visualizer;

fn main() -> ExitCode {
    let Opts {
        sentry_dsn,
        traces_sample_rate,
        subcommand,
    } = Opts::parse();
    let _sentry_guard = match helpers::tracing::init(sentry_dsn, traces_sample_rate) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("failed to initialise tracing: {:#}", error);
            return ExitCode::FAILURE;
        }
    };

    ExitCode::from(report(run_subcommand(subcommand)))
}

fn run_subcommand(subcommand: Subcommand) -> Result {
    match subcommand {
        Subcommand::Train(opts) => trainer::run(opts),
        Subcommand::Predict(opts) => predictor::run(opts),
        Subcommand::Evaluate(opts) => evaluator::run(opts),
        Subcommand::Visualize(opts) => visualizer::run(opts),
    }
}

/// Reports the command error, if any, and returns the process exit code.
fn report(result: Result) -> u8 {
    match result {
        Ok(_) => 0,
        Err(error) => {
            sentry::integrations::anyhow::capture_anyhow(&error);
            tracing::error!("{:#}", error);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::model::ModelStore;

    const DATA: &str = "km,price\n240000,3650\n139800,3800\n150500,4400\n185530,4450\n\
                        176000,5250\n114800,5350\n166800,5800\n89000,5990\n144500,5999\n\
                        84000,6200\n82029,6390\n63060,6390\n74000,6600\n97500,6800\n\
                        67000,6800\n76025,6900\n48235,6900\n93000,6990\n60949,7490\n\
                        65674,7555\n54000,7990\n68500,7990\n22899,7990\n61789,8290\n";

    fn run_args(args: &[&str]) -> Result {
        let args = std::iter::once("price-estimator").chain(args.iter().copied());
        let opts = Opts::try_parse_from(args)?;
        run_subcommand(opts.subcommand)
    }

    fn path_str(path: &Path) -> Result<&str> {
        path.to_str().ok_or_else(|| anyhow!("non-UTF-8 path `{}`", path.display()))
    }

    fn report_ok(result: Result) -> Result {
        match report(result) {
            0 => Ok(()),
            code => Err(anyhow!("exit code {}", code)),
        }
    }

    #[test]
    fn train_then_evaluate_ok() -> Result {
        let directory = tempfile::tempdir()?;
        let data = directory.path().join("data.csv");
        let model = directory.path().join("model.json");
        fs::write(&data, DATA)?;
        let (data, model) = (path_str(&data)?, path_str(&model)?);

        report_ok(run_args(&["train", "--data", data, "--model", model]))?;
        let trained = ModelStore::new(model).load()?;
        assert!((trained.theta0 - 8457.5).abs() < 1.0, "theta0 = {}", trained.theta0);
        assert!((trained.theta1 + 0.02105).abs() < 1e-4, "theta1 = {}", trained.theta1);

        report_ok(run_args(&["evaluate", "--data", data, "--model", model]))?;

        let mut output = Vec::new();
        let prediction = predictor::predict(&trained, &mut "100000\n".as_bytes(), &mut output)?;
        assert!((prediction.price - trained.predict(100000.0)).abs() < 1e-9);
        assert!(String::from_utf8(output)?.contains("Estimated price for 100000 km: "));
        Ok(())
    }

    #[test]
    fn evaluate_without_model_fails() -> Result {
        let directory = tempfile::tempdir()?;
        let data = directory.path().join("data.csv");
        fs::write(&data, DATA)?;
        let model = directory.path().join("model.json");

        let result = run_args(&["evaluate", "-d", path_str(&data)?, "-m", path_str(&model)?]);
        assert!(result.is_err());
        assert_eq!(report(result), 1);
        assert!(!model.exists());
        Ok(())
    }

    #[test]
    fn train_on_invalid_data_fails() -> Result {
        let directory = tempfile::tempdir()?;
        let data = directory.path().join("data.csv");
        fs::write(&data, "km,price\n1000,abc\n")?;
        let model = directory.path().join("model.json");

        let result = run_args(&["train", "-d", path_str(&data)?, "-m", path_str(&model)?]);
        assert_eq!(report(result), 1);
        assert!(!model.exists());
        Ok(())
    }

    #[test]
    fn report_ok_is_zero() {
        assert_eq!(report(Ok(())), 0);
    }
}
