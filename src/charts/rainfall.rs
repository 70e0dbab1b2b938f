use std::collections::BTreeMap;
use std::path::Path;

use plotters::prelude::*;
use tracing::warn;

use crate::error::{PipelineError, Result};
use crate::models::RainfallSeries;
use crate::processors::calendar::month_name;
use crate::utils::constants::{CHART_HEIGHT, CHART_WIDTH};

/// Bar chart of monthly rainfall. Under the fallback branch the bars show
/// rainy-day counts instead of magnitudes, with labels to match. Returns
/// whether a file was written.
pub fn render_monthly_rainfall(series: &RainfallSeries, path: &Path) -> Result<bool> {
    let (bars, title, y_desc) = match series {
        RainfallSeries::Absent => {
            warn!("rainfall series absent; no chart rendered");
            return Ok(false);
        }
        RainfallSeries::MonthlyTotals(totals) => (
            totals.clone(),
            "Monthly Rainfall Totals",
            "Total Rainfall (mm)",
        ),
        RainfallSeries::RainyDayCounts(counts) => (
            counts
                .iter()
                .map(|(month, count)| (*month, f64::from(*count)))
                .collect::<BTreeMap<u32, f64>>(),
            "Rainy Days per Month",
            "Rainy Days Count",
        ),
    };

    draw_bars(&bars, title, y_desc, path).map_err(|e| PipelineError::Chart(e.to_string()))?;
    Ok(true)
}

fn draw_bars(
    bars: &BTreeMap<u32, f64>,
    title: &str,
    y_desc: &str,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let y_max = bars
        .values()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.05;

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 70)
        .build_cartesian_2d((1u32..13u32).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc(y_desc)
        .x_labels(12)
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(month) | SegmentValue::Exact(month) => {
                month_name(*month).to_string()
            }
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(30, 90, 200).mix(0.7).filled())
            .data(bars.iter().map(|(month, value)| (*month, *value))),
    )?;

    root.present()?;
    Ok(())
}
