use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    CoercedObservation, ContinuousColumn, ContinuousValues, IndicatorColumn, IndicatorValues,
    RawTable, SchemaBinding,
};
use crate::utils::constants::{DATE_FORMATS, TIMESTAMP_FORMATS};

/// Converts raw string fields into typed values per the logical column set.
///
/// Coercion never fails a row or the run: an unparseable timestamp becomes
/// the `None` sentinel for the row filter to act on, an unparseable numeric
/// value becomes missing, and an unparseable indicator defaults to 0.
pub struct TypeCoercer;

impl TypeCoercer {
    pub fn new() -> Self {
        Self
    }

    pub fn coerce(&self, table: &RawTable, binding: &SchemaBinding) -> Vec<CoercedObservation> {
        table
            .rows
            .iter()
            .map(|row| self.coerce_row(row, binding))
            .collect()
    }

    fn coerce_row(&self, row: &[String], binding: &SchemaBinding) -> CoercedObservation {
        let timestamp = row
            .get(binding.timestamp_position())
            .and_then(|field| parse_timestamp(field));

        let mut values = ContinuousValues::default();
        for col in ContinuousColumn::ALL {
            if let Some(position) = binding.continuous_position(col) {
                values.set(col, row.get(position).and_then(|field| parse_reading(field)));
            }
        }

        let mut indicators = IndicatorValues::default();
        for col in IndicatorColumn::ALL {
            if let Some(position) = binding.indicator_position(col) {
                let flag = row.get(position).map_or(0, |field| parse_indicator(field));
                indicators.set(col, flag);
            }
        }

        let extras = binding
            .extras()
            .iter()
            .map(|(_, position)| row.get(*position).cloned().unwrap_or_default())
            .collect();

        CoercedObservation {
            timestamp,
            values,
            indicators,
            extras,
        }
    }
}

impl Default for TypeCoercer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a timestamp field against the accepted layouts, first match wins.
/// Date-only layouts parse to midnight.
pub fn parse_timestamp(field: &str) -> Option<NaiveDateTime> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(field, format) {
            return Some(timestamp);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(field, format) {
            return Some(date.and_hms_opt(0, 0, 0)?);
        }
    }

    None
}

/// Parse a continuous reading. Non-finite parses (`NaN`, `inf`) count as
/// missing so they cannot poison column means.
pub fn parse_reading(field: &str) -> Option<f64> {
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Parse an indicator flag to 0 or 1. Any nonzero numeric maps to 1;
/// zero, empty, and unparseable input map to 0.
pub fn parse_indicator(field: &str) -> u8 {
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value != 0.0 => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTable;

    fn bind(headers: &[&str]) -> SchemaBinding {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        SchemaBinding::bind(&headers).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(1996, 11, 1)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();

        assert_eq!(parse_timestamp("19961101-11:00"), Some(expected));
        assert_eq!(parse_timestamp("1996-11-01 11:00:00"), Some(expected));
        assert_eq!(parse_timestamp("1996-11-01T11:00:00"), Some(expected));

        let midnight = NaiveDate::from_ymd_opt(1996, 11, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("1996-11-01"), Some(midnight));
    }

    #[test]
    fn test_parse_timestamp_failure_is_sentinel() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("1996-13-40 25:00:00"), None);
    }

    #[test]
    fn test_parse_reading() {
        assert_eq!(parse_reading("21.5"), Some(21.5));
        assert_eq!(parse_reading("  -3 "), Some(-3.0));
        assert_eq!(parse_reading("0"), Some(0.0));
        assert_eq!(parse_reading(""), None);
        assert_eq!(parse_reading("N/A"), None);
        // Non-finite parses are missing, not valid readings.
        assert_eq!(parse_reading("NaN"), None);
        assert_eq!(parse_reading("inf"), None);
    }

    #[test]
    fn test_parse_indicator() {
        assert_eq!(parse_indicator("1"), 1);
        assert_eq!(parse_indicator("1.0"), 1);
        assert_eq!(parse_indicator("0"), 0);
        assert_eq!(parse_indicator(""), 0);
        assert_eq!(parse_indicator("yes"), 0);
        // Out-of-range numerics clamp to the flag domain.
        assert_eq!(parse_indicator("5"), 1);
    }

    #[test]
    fn test_coerce_rows() {
        let binding = bind(&["datetime_utc", "_tempm", "_rain", "_conds"]);
        let table = RawTable::new(
            vec![
                "datetime_utc".to_string(),
                "_tempm".to_string(),
                "_rain".to_string(),
                "_conds".to_string(),
            ],
            vec![
                vec![
                    "19961101-11:00".to_string(),
                    "21.5".to_string(),
                    "1".to_string(),
                    "Smoke".to_string(),
                ],
                vec![
                    "garbage".to_string(),
                    "oops".to_string(),
                    "".to_string(),
                    "Haze".to_string(),
                ],
            ],
        );

        let coerced = TypeCoercer::new().coerce(&table, &binding);

        assert_eq!(coerced.len(), 2);
        assert!(coerced[0].timestamp.is_some());
        assert_eq!(coerced[0].values.get(ContinuousColumn::Temperature), Some(21.5));
        assert_eq!(coerced[0].indicators.get(IndicatorColumn::Rain), 1);
        assert_eq!(coerced[0].extras, vec!["Smoke".to_string()]);

        // Bad row: timestamp sentinel, missing reading, zero-defaulted flag.
        assert!(coerced[1].timestamp.is_none());
        assert_eq!(coerced[1].values.get(ContinuousColumn::Temperature), None);
        assert_eq!(coerced[1].indicators.get(IndicatorColumn::Rain), 0);
    }

    #[test]
    fn test_absent_columns_stay_missing() {
        let binding = bind(&["datetime_utc", "_tempm"]);
        let table = RawTable::new(
            vec!["datetime_utc".to_string(), "_tempm".to_string()],
            vec![vec!["19961101-11:00".to_string(), "21.5".to_string()]],
        );

        let coerced = TypeCoercer::new().coerce(&table, &binding);

        assert_eq!(coerced[0].values.get(ContinuousColumn::Humidity), None);
        assert_eq!(coerced[0].indicators.get(IndicatorColumn::Rain), 0);
    }
}
