use std::path::Path;

use crate::error::Result;
use crate::models::CleanDataset;
use crate::processors::calendar::month_name;
use crate::utils::constants::{DERIVED_COLUMNS, EXPORT_TIMESTAMP_FORMAT, TIMESTAMP_COLUMN};

/// Writes the cleaned dataset back out as CSV.
///
/// Column order: timestamp, present continuous columns in schema order,
/// present indicator columns in schema order, pass-through extras, then the
/// derived calendar columns. No synthetic row-index column.
pub struct CleanDatasetWriter;

impl CleanDatasetWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, dataset: &CleanDataset, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut headers: Vec<String> = vec![TIMESTAMP_COLUMN.to_string()];
        headers.extend(
            dataset
                .columns
                .continuous_columns()
                .map(|col| col.raw_name().to_string()),
        );
        headers.extend(
            dataset
                .columns
                .indicator_columns()
                .map(|col| col.raw_name().to_string()),
        );
        headers.extend(dataset.extra_columns.iter().cloned());
        headers.extend(DERIVED_COLUMNS.iter().map(|name| name.to_string()));
        writer.write_record(&headers)?;

        for obs in &dataset.observations {
            let mut record: Vec<String> =
                vec![obs.timestamp.format(EXPORT_TIMESTAMP_FORMAT).to_string()];

            for col in dataset.columns.continuous_columns() {
                record.push(match obs.values.get(col) {
                    Some(value) => format_value(value),
                    None => String::new(),
                });
            }
            for col in dataset.columns.indicator_columns() {
                record.push(obs.indicators.get(col).to_string());
            }
            record.extend(obs.extras.iter().cloned());

            record.push(obs.date.to_string());
            record.push(obs.year.to_string());
            record.push(obs.month.to_string());
            record.push(obs.day.to_string());
            record.push(month_name(obs.month).to_string());
            record.push(obs.season.label().to_string());

            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CleanDatasetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        // Degenerate all-missing columns export their undefined marker
        // rather than a fabricated number.
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CleanObservation, ContinuousColumn, ContinuousValues, IndicatorColumn, IndicatorValues,
        SchemaBinding, Season,
    };
    use crate::processors::coercer::parse_timestamp;
    use chrono::Datelike;
    use tempfile::TempDir;

    fn sample_dataset() -> CleanDataset {
        let headers: Vec<String> = ["datetime_utc", "_tempm", "_rain", "_conds"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let binding = SchemaBinding::bind(&headers).unwrap();

        let timestamp = parse_timestamp("19961101-11:00").unwrap();
        let date = timestamp.date();
        let mut values = ContinuousValues::default();
        values.set(ContinuousColumn::Temperature, Some(21.5));
        let mut indicators = IndicatorValues::default();
        indicators.set(IndicatorColumn::Rain, 1);

        CleanDataset {
            observations: vec![CleanObservation {
                timestamp,
                date,
                year: date.year(),
                month: date.month(),
                day: date.day(),
                season: Season::from_month(date.month()),
                values,
                indicators,
                extras: vec!["Smoke".to_string()],
            }],
            columns: binding.presence(),
            extra_columns: vec!["_conds".to_string()],
        }
    }

    #[test]
    fn test_write_cleaned_dataset() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("cleaned_weather.csv");

        CleanDatasetWriter::new().write(&sample_dataset(), &path)?;

        let contents = std::fs::read_to_string(&path)?;
        let mut lines = contents.lines();

        assert_eq!(
            lines.next(),
            Some("datetime_utc,_tempm,_rain,_conds,date,year,month,day,month_name,season")
        );
        assert_eq!(
            lines.next(),
            Some("1996-11-01 11:00:00,21.5,1,Smoke,1996-11-01,1996,11,1,November,Post-Monsoon")
        );
        assert_eq!(lines.next(), None);

        Ok(())
    }
}
