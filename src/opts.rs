//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand as ClapSubcommand};

use crate::dataset::Limits;
use crate::trainer::descent::GradientDescent;

pub mod parsers;

#[derive(Parser)]
#[clap(author, version, about, rename_all = "kebab-case")]
pub struct Opts {
    /// Sentry DSN
    #[clap(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance traces sample rate for Sentry
    #[clap(long, default_value = "0", env = "PRICE_ESTIMATOR_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(ClapSubcommand)]
pub enum Subcommand {
    Train(TrainOpts),
    Predict(PredictOpts),
    Evaluate(EvaluateOpts),
    Visualize(VisualizeOpts),
}

/// Fits the model on the dataset and saves it
#[derive(Args)]
pub struct TrainOpts {
    #[clap(flatten)]
    pub dataset: DatasetOpts,

    #[clap(flatten)]
    pub model: ModelOpts,

    #[clap(flatten)]
    pub gradient_descent: GradientDescentOpts,
}

/// Prompts for a mileage and prints the estimated price
#[derive(Args)]
pub struct PredictOpts {
    #[clap(flatten)]
    pub model: ModelOpts,
}

/// Prints the coefficient of determination of the saved model on the dataset
#[derive(Args)]
pub struct EvaluateOpts {
    #[clap(flatten)]
    pub dataset: DatasetOpts,

    #[clap(flatten)]
    pub model: ModelOpts,
}

/// Plots the dataset together with the fitted line
#[derive(Args)]
pub struct VisualizeOpts {
    #[clap(flatten)]
    pub dataset: DatasetOpts,

    #[clap(flatten)]
    pub model: ModelOpts,

    /// Output SVG file
    #[clap(short, long, default_value = "plot.svg", env = "PRICE_ESTIMATOR_PLOT")]
    pub output: PathBuf,

    /// Image width and height in pixels
    #[clap(long, default_value = "1000x600", value_parser = parsers::dimensions)]
    pub size: (u32, u32),
}

#[derive(Args)]
pub struct DatasetOpts {
    /// CSV file with `km` and `price` columns
    #[clap(short, long, default_value = "data.csv", env = "PRICE_ESTIMATOR_DATA")]
    pub data: PathBuf,

    /// Maximum accepted mileage
    #[clap(long, default_value = "1e10", value_parser = parsers::non_negative_f64)]
    pub max_mileage: f64,

    /// Maximum accepted price
    #[clap(long, default_value = "1e15", value_parser = parsers::non_negative_f64)]
    pub max_price: f64,
}

impl DatasetOpts {
    pub const fn limits(&self) -> Limits {
        Limits {
            max_mileage: self.max_mileage,
            max_price: self.max_price,
        }
    }
}

#[derive(Args)]
pub struct ModelOpts {
    /// Model JSON file
    #[clap(short, long, default_value = "model.json", env = "PRICE_ESTIMATOR_MODEL")]
    pub model: PathBuf,
}

/// Gradient descent options.
#[derive(Args, Clone, Copy)]
pub struct GradientDescentOpts {
    /// Learning rate
    #[clap(long, default_value = "0.1", value_parser = parsers::positive_f64)]
    pub learning_rate: f64,

    /// Maximum number of iterations
    #[clap(long, default_value = "10000", value_parser = parsers::non_zero_usize)]
    pub max_iterations: usize,

    /// Stop once the cost changes by less than this value
    #[clap(long, default_value = "1e-7", value_parser = parsers::positive_f64)]
    pub convergence_threshold: f64,

    /// Log the progress every so many iterations
    #[clap(long, default_value = "1000", value_parser = parsers::non_zero_usize)]
    pub log_interval: usize,
}

impl From<GradientDescentOpts> for GradientDescent {
    fn from(opts: GradientDescentOpts) -> Self {
        Self {
            learning_rate: opts.learning_rate,
            max_iterations: opts.max_iterations,
            convergence_threshold: opts.convergence_threshold,
            log_interval: opts.log_interval,
        }
    }
}
