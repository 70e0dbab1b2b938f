use std::path::Path;

use plotters::prelude::*;
use tracing::warn;

use crate::charts::value_bounds;
use crate::error::{PipelineError, Result};
use crate::models::CleanDataset;
use crate::utils::constants::{CHART_HEIGHT, CHART_WIDTH};

/// Scatter plot of humidity against temperature, one point per clean
/// observation. Skipped when either column is absent from the dataset.
/// Returns whether a file was written.
pub fn render_humidity_vs_temperature(dataset: &CleanDataset, path: &Path) -> Result<bool> {
    let points: Vec<(f64, f64)> = dataset
        .observations
        .iter()
        .filter_map(|obs| match (obs.temperature(), obs.humidity()) {
            (Some(t), Some(h)) if t.is_finite() && h.is_finite() => Some((t, h)),
            _ => None,
        })
        .collect();

    if points.is_empty() {
        warn!("no joint temperature/humidity observations; skipping scatter chart");
        return Ok(false);
    }

    draw_scatter(&points, path).map_err(|e| PipelineError::Chart(e.to_string()))?;
    Ok(true)
}

fn draw_scatter(
    points: &[(f64, f64)],
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let temperatures: Vec<f64> = points.iter().map(|(t, _)| *t).collect();
    let humidities: Vec<f64> = points.iter().map(|(_, h)| *h).collect();

    // Non-empty finite input, so both bounds exist.
    let Some((x_min, x_max)) = value_bounds(&temperatures) else {
        return Ok(());
    };
    let Some((y_min, y_max)) = value_bounds(&humidities) else {
        return Ok(());
    };

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Humidity vs Temperature", ("sans-serif", 28))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc("Humidity (%)")
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|(t, h)| Circle::new((*t, *h), 3, RGBColor(30, 90, 200).mix(0.4).filled())),
    )?;

    root.present()?;
    Ok(())
}
