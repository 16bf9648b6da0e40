//! Scatter plot of the dataset with the fitted line.

use std::ops::Range;
use std::path::Path;

use itertools::{Itertools, MinMaxResult};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::dataset::Dataset;
use crate::model::{Model, ModelStore};
use crate::opts::VisualizeOpts;
use crate::prelude::*;

const CAPTION: &str = "Linear Regression: Car Price vs Mileage";

#[tracing::instrument(skip_all)]
pub fn run(opts: VisualizeOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "visualize"));

    let model = ModelStore::new(&opts.model.model).load()?;
    let dataset = Dataset::read(&opts.dataset.data, opts.dataset.limits())
        .with_context(|| format!("failed to read `{}`", opts.dataset.data.display()))?;

    tracing::info!(n_samples = dataset.len(), "plotting…");
    render(&model, &dataset, &opts.output, opts.size)?;
    tracing::info!(path = %opts.output.display(), "the plot is now available");
    Ok(())
}

pub fn render(model: &Model, dataset: &Dataset, path: &Path, size: (u32, u32)) -> Result {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw(&root, model, dataset)
        .with_context(|| format!("failed to plot into `{}`", path.display()))
}

pub fn draw(root: &DrawingArea<SVGBackend, Shift>, model: &Model, dataset: &Dataset) -> Result {
    let (min_mileage, max_mileage) = bounds(dataset.mileages.iter().copied())?;
    let line = [
        (min_mileage, model.predict(min_mileage)),
        (max_mileage, model.predict(max_mileage)),
    ];
    let (min_price, max_price) =
        bounds(dataset.prices.iter().copied().chain(line.iter().map(|(_, price)| *price)))?;

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(CAPTION, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(pad(min_mileage, max_mileage), pad(min_price, max_price))?;
    chart
        .configure_mesh()
        .x_desc("Mileage (km)")
        .y_desc("Price")
        .draw()?;

    chart
        .draw_series(
            dataset
                .mileages
                .iter()
                .zip(&dataset.prices)
                .map(|(mileage, price)| Circle::new((*mileage, *price), 3, BLUE.filled())),
        )?
        .label("Data points")
        .legend(|(x, y)| Circle::new((x, y), 3, BLUE.filled()));
    chart
        .draw_series(LineSeries::new(line, RED.stroke_width(2)))?
        .label(format!("y = {:.2} + {:.6}x", model.theta0, model.theta1))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn bounds(values: impl Iterator<Item = f64>) -> Result<(f64, f64)> {
    match values.minmax() {
        MinMaxResult::NoElements => Err(anyhow!("nothing to plot")),
        MinMaxResult::OneElement(value) => Ok((value, value)),
        MinMaxResult::MinMax(min, max) => Ok((min, max)),
    }
}

/// Widens the axis range by 5% on each side, or by one unit when it is a single point.
fn pad(min: f64, max: f64) -> Range<f64> {
    let padding = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - padding)..(max + padding)
}
