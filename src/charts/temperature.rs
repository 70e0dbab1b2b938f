use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;
use tracing::warn;

use crate::charts::{date_label, value_bounds};
use crate::error::{PipelineError, Result};
use crate::models::TemperatureSummary;
use crate::utils::constants::{CHART_HEIGHT, CHART_WIDTH, COMBINED_CHART_HEIGHT};

/// Line chart of the daily mean temperature. Returns whether a file was
/// written; an empty or degenerate series skips the chart.
pub fn render_daily_trend(
    daily: &BTreeMap<NaiveDate, TemperatureSummary>,
    path: &Path,
) -> Result<bool> {
    let dates: Vec<NaiveDate> = daily.keys().copied().collect();
    let means: Vec<f64> = daily.values().map(|summary| summary.mean).collect();

    let Some(bounds) = value_bounds(&means) else {
        warn!("no finite daily temperature means; skipping daily trend chart");
        return Ok(false);
    };

    draw_daily_trend(&dates, &means, bounds, path)
        .map_err(|e| PipelineError::Chart(e.to_string()))?;
    Ok(true)
}

fn draw_daily_trend(
    dates: &[NaiveDate],
    means: &[f64],
    (y_min, y_max): (f64, f64),
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let x_max = dates.len().saturating_sub(1).max(1) as f64;

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Average Temperature Trend", ("sans-serif", 28))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Average Temperature (°C)")
        .x_labels(10)
        .x_label_formatter(&|x| date_label(dates, *x))
        .draw()?;

    chart.draw_series(LineSeries::new(
        means
            .iter()
            .enumerate()
            .map(|(index, mean)| (index as f64, *mean)),
        &RGBColor(200, 60, 30),
    ))?;

    root.present()?;
    Ok(())
}

/// Two-panel figure: daily mean temperature on top, daily mean humidity
/// below, sharing the date axis layout.
pub fn render_combined(
    daily_temperature: &BTreeMap<NaiveDate, f64>,
    daily_humidity: &BTreeMap<NaiveDate, f64>,
    path: &Path,
) -> Result<bool> {
    if daily_temperature.is_empty() && daily_humidity.is_empty() {
        warn!("no daily temperature or humidity data; skipping combined chart");
        return Ok(false);
    }

    draw_combined(daily_temperature, daily_humidity, path)
        .map_err(|e| PipelineError::Chart(e.to_string()))?;
    Ok(true)
}

fn draw_combined(
    daily_temperature: &BTreeMap<NaiveDate, f64>,
    daily_humidity: &BTreeMap<NaiveDate, f64>,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, COMBINED_CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    draw_daily_panel(
        &panels[0],
        daily_temperature,
        "Daily Average Temperature",
        "Temperature (°C)",
        RGBColor(200, 60, 30),
    )?;
    draw_daily_panel(
        &panels[1],
        daily_humidity,
        "Daily Average Humidity",
        "Humidity (%)",
        RGBColor(30, 90, 200),
    )?;

    root.present()?;
    Ok(())
}

fn draw_daily_panel<DB>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    series: &BTreeMap<NaiveDate, f64>,
    title: &str,
    y_desc: &str,
    color: RGBColor,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let dates: Vec<NaiveDate> = series.keys().copied().collect();
    let means: Vec<f64> = series.values().copied().collect();

    // An absent or degenerate column leaves the panel empty rather than
    // failing the whole figure.
    let Some((y_min, y_max)) = value_bounds(&means) else {
        return Ok(());
    };
    let x_max = dates.len().saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(y_desc)
        .x_labels(8)
        .x_label_formatter(&|x| date_label(&dates, *x))
        .draw()?;

    chart.draw_series(LineSeries::new(
        means
            .iter()
            .enumerate()
            .map(|(index, mean)| (index as f64, *mean)),
        &color,
    ))?;

    Ok(())
}
