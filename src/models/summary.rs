use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Four-number descriptive summary of one numeric column within a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// Per-group climate aggregate for the month and season groupings.
///
/// Each field is `None` when its source column is absent from the dataset,
/// so consumers degrade without re-checking column presence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClimateSummary {
    pub mean_temperature: Option<f64>,
    pub mean_humidity: Option<f64>,
    pub total_precipitation: Option<f64>,
}

/// Outcome of the rainfall fallback selection over the monthly table.
///
/// `RainyDayCounts` is the degenerate-signal branch: when every monthly
/// precipitation total is exactly zero the magnitude series is assumed to
/// come from an absent or dead sensor and the rain-indicator counts are
/// reported instead. A genuinely rain-free period triggers the same branch;
/// the input data carries no signal to tell the two apart.
#[derive(Debug, Clone, PartialEq)]
pub enum RainfallSeries {
    /// No precipitation column in the dataset; nothing to plot.
    Absent,
    /// Total precipitation per month, in millimeters.
    MonthlyTotals(BTreeMap<u32, f64>),
    /// Number of observations flagged rainy, per month.
    RainyDayCounts(BTreeMap<u32, u32>),
}

impl RainfallSeries {
    pub fn is_absent(&self) -> bool {
        matches!(self, RainfallSeries::Absent)
    }
}
