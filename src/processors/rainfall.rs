use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{
    CleanDataset, ClimateSummary, ContinuousColumn, IndicatorColumn, RainfallSeries,
};

/// Decides what the monthly rainfall output should show.
///
/// Three-way branch, evaluated in order:
/// 1. no precipitation column in the dataset -> nothing to plot;
/// 2. every monthly total sums to exactly zero -> the magnitude series is
///    treated as a dead or absent sensor and the rain-indicator counts are
///    reported instead;
/// 3. otherwise the true monthly totals.
///
/// Known limitation: branch 2 cannot distinguish a dead sensor from a
/// genuinely rain-free period; both flip the output to rainy-day counts.
pub struct RainfallSelector;

impl RainfallSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn select(
        &self,
        dataset: &CleanDataset,
        monthly: &BTreeMap<u32, ClimateSummary>,
    ) -> RainfallSeries {
        if !dataset.columns.has(ContinuousColumn::Precipitation) {
            warn!("no precipitation column in dataset; skipping rainfall output");
            return RainfallSeries::Absent;
        }

        let totals: BTreeMap<u32, f64> = monthly
            .iter()
            .map(|(month, summary)| (*month, summary.total_precipitation.unwrap_or(0.0)))
            .collect();

        // The degenerate check is a global property of the whole table,
        // not per month.
        let grand_total: f64 = totals.values().sum();
        if grand_total == 0.0 {
            if !dataset.columns.has_indicator(IndicatorColumn::Rain) {
                warn!("precipitation totals are all zero and no rain indicator exists; skipping rainfall output");
                return RainfallSeries::Absent;
            }

            warn!("precipitation totals are all zero; falling back to rainy-day counts");
            return RainfallSeries::RainyDayCounts(self.rainy_days_by_month(dataset));
        }

        RainfallSeries::MonthlyTotals(totals)
    }

    fn rainy_days_by_month(&self, dataset: &CleanDataset) -> BTreeMap<u32, u32> {
        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for obs in &dataset.observations {
            *counts.entry(obs.month).or_insert(0) += u32::from(obs.rain());
        }
        counts
    }
}

impl Default for RainfallSelector {
    fn default() -> Self {
        Self::new()
    }
}
