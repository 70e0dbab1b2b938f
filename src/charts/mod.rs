pub mod humidity;
pub mod rainfall;
pub mod temperature;

pub use humidity::render_humidity_vs_temperature;
pub use rainfall::render_monthly_rainfall;
pub use temperature::{render_combined, render_daily_trend};

use chrono::NaiveDate;

/// Axis label for an index position on a date axis.
pub(crate) fn date_label(dates: &[NaiveDate], x: f64) -> String {
    dates
        .get(x.round() as usize)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Padded y-axis bounds over finite values. `None` when nothing finite is
/// left to plot.
pub(crate) fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.05).max(1.0);
    Some((min - pad, max + pad))
}
