use tracing::warn;

use crate::models::{
    CoercedObservation, ColumnPresence, ContinuousColumn, TimestampedObservation,
};

/// What the missing-value policy did to a batch of coerced observations.
#[derive(Debug, Clone, Default)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub rows_dropped: usize,
    pub imputed: Vec<(ContinuousColumn, usize)>,
    pub degenerate: Vec<ContinuousColumn>,
}

impl CleaningReport {
    pub fn rows_surviving(&self) -> usize {
        self.rows_in - self.rows_dropped
    }

    pub fn total_imputed(&self) -> usize {
        self.imputed.iter().map(|(_, count)| count).sum()
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Rows: {} read, {} dropped (unparseable timestamp), {} surviving",
            self.rows_in,
            self.rows_dropped,
            self.rows_surviving()
        )];

        if self.imputed.is_empty() {
            lines.push("Imputation: no missing values".to_string());
        } else {
            let detail: Vec<String> = self
                .imputed
                .iter()
                .map(|(col, count)| format!("{} x{}", col.display_name(), count))
                .collect();
            lines.push(format!(
                "Imputation: {} values filled with column means ({})",
                self.total_imputed(),
                detail.join(", ")
            ));
        }

        for col in &self.degenerate {
            lines.push(format!(
                "Warning: column {} has no parseable values; its statistics are undefined",
                col.display_name()
            ));
        }

        lines.join("\n")
    }
}

/// Row-level drop for unparseable timestamps, then column-mean imputation
/// for the continuous readings.
///
/// The row filter always runs first: means are computed over surviving rows
/// only, so an excluded row never contributes to another row's imputed
/// value. Indicator columns are untouched here; the coercer has already
/// zero-defaulted them.
pub struct MissingValuePolicy;

impl MissingValuePolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(
        &self,
        observations: Vec<CoercedObservation>,
        presence: &ColumnPresence,
    ) -> (Vec<TimestampedObservation>, CleaningReport) {
        let mut report = CleaningReport {
            rows_in: observations.len(),
            ..CleaningReport::default()
        };

        let mut surviving = self.drop_missing_timestamps(observations, &mut report);
        self.impute_column_means(&mut surviving, presence, &mut report);

        (surviving, report)
    }

    /// Step 1: drop every row whose timestamp is the missing sentinel.
    fn drop_missing_timestamps(
        &self,
        observations: Vec<CoercedObservation>,
        report: &mut CleaningReport,
    ) -> Vec<TimestampedObservation> {
        let mut surviving = Vec::with_capacity(observations.len());

        for obs in observations {
            match obs.timestamp {
                Some(timestamp) => surviving.push(TimestampedObservation {
                    timestamp,
                    values: obs.values,
                    indicators: obs.indicators,
                    extras: obs.extras,
                }),
                None => report.rows_dropped += 1,
            }
        }

        surviving
    }

    /// Step 2: replace each missing continuous value with the arithmetic
    /// mean of its column's non-missing values over the surviving rows.
    ///
    /// A column with no parseable values at all has an undefined mean; the
    /// missing entries are filled with NaN and the condition is surfaced as
    /// a warning instead of a fabricated number.
    fn impute_column_means(
        &self,
        observations: &mut [TimestampedObservation],
        presence: &ColumnPresence,
        report: &mut CleaningReport,
    ) {
        for col in presence.continuous_columns() {
            let mut sum = 0.0;
            let mut count = 0usize;
            let mut missing = 0usize;

            for obs in observations.iter() {
                match obs.values.get(col) {
                    Some(value) => {
                        sum += value;
                        count += 1;
                    }
                    None => missing += 1,
                }
            }

            if missing == 0 {
                continue;
            }

            let mean = if count > 0 {
                sum / count as f64
            } else {
                warn!(
                    column = col.display_name(),
                    "column has no parseable values; imputed statistics are undefined"
                );
                report.degenerate.push(col);
                f64::NAN
            };

            for obs in observations.iter_mut() {
                if obs.values.get(col).is_none() {
                    obs.values.set(col, Some(mean));
                }
            }

            report.imputed.push((col, missing));
        }
    }
}

impl Default for MissingValuePolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContinuousValues, IndicatorValues, SchemaBinding};
    use crate::processors::coercer::parse_timestamp;

    fn presence(headers: &[&str]) -> ColumnPresence {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        SchemaBinding::bind(&headers).unwrap().presence()
    }

    fn observation(timestamp: Option<&str>, temperature: Option<f64>) -> CoercedObservation {
        let mut values = ContinuousValues::default();
        values.set(ContinuousColumn::Temperature, temperature);
        CoercedObservation {
            timestamp: timestamp.and_then(parse_timestamp),
            values,
            indicators: IndicatorValues::default(),
            extras: Vec::new(),
        }
    }

    #[test]
    fn test_mean_imputation() {
        let presence = presence(&["datetime_utc", "_tempm"]);
        let rows = vec![
            observation(Some("1996-11-01 11:00:00"), Some(10.0)),
            observation(Some("1996-11-02 11:00:00"), None),
            observation(Some("1996-11-03 11:00:00"), Some(30.0)),
        ];

        let (surviving, report) = MissingValuePolicy::new().apply(rows, &presence);

        assert_eq!(surviving.len(), 3);
        // Mean of the two non-missing values, n = 2.
        assert_eq!(
            surviving[1].values.get(ContinuousColumn::Temperature),
            Some(20.0)
        );
        assert_eq!(report.imputed, vec![(ContinuousColumn::Temperature, 1)]);
        assert!(report.degenerate.is_empty());
    }

    #[test]
    fn test_row_filter_runs_before_imputation() {
        let presence = presence(&["datetime_utc", "_tempm"]);
        // The unparseable-timestamp row carries an extreme reading that
        // would skew the mean if it were counted.
        let rows = vec![
            observation(Some("1996-11-01 11:00:00"), Some(10.0)),
            observation(None, Some(1000.0)),
            observation(Some("1996-11-03 11:00:00"), None),
        ];

        let (surviving, report) = MissingValuePolicy::new().apply(rows, &presence);

        assert_eq!(report.rows_dropped, 1);
        assert_eq!(surviving.len(), 2);
        assert_eq!(
            surviving[1].values.get(ContinuousColumn::Temperature),
            Some(10.0)
        );
    }

    #[test]
    fn test_degenerate_column_stays_nan() {
        let presence = presence(&["datetime_utc", "_tempm"]);
        let rows = vec![
            observation(Some("1996-11-01 11:00:00"), None),
            observation(Some("1996-11-02 11:00:00"), None),
        ];

        let (surviving, report) = MissingValuePolicy::new().apply(rows, &presence);

        assert_eq!(report.degenerate, vec![ContinuousColumn::Temperature]);
        let value = surviving[0].values.get(ContinuousColumn::Temperature);
        assert!(value.is_some_and(f64::is_nan));
    }

    #[test]
    fn test_absent_columns_are_not_imputed() {
        let presence = presence(&["datetime_utc", "_tempm"]);
        let rows = vec![observation(Some("1996-11-01 11:00:00"), Some(10.0))];

        let (surviving, report) = MissingValuePolicy::new().apply(rows, &presence);

        // Humidity is not in the dataset; it stays absent rather than
        // becoming a degenerate column.
        assert_eq!(surviving[0].values.get(ContinuousColumn::Humidity), None);
        assert!(report.degenerate.is_empty());
    }

    #[test]
    fn test_no_missing_values_reports_clean() {
        let presence = presence(&["datetime_utc", "_tempm"]);
        let rows = vec![
            observation(Some("1996-11-01 11:00:00"), Some(10.0)),
            observation(Some("1996-11-02 11:00:00"), Some(12.0)),
        ];

        let (_, report) = MissingValuePolicy::new().apply(rows, &presence);

        assert_eq!(report.rows_dropped, 0);
        assert!(report.imputed.is_empty());
        assert!(report.summary().contains("no missing values"));
    }
}
