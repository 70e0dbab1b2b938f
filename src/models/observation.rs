use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::schema::{ColumnPresence, ContinuousColumn, IndicatorColumn};

/// The raw table as read from disk: one header row plus string-valued rows.
///
/// Values stay untyped until the coercer runs; the only transformation the
/// schema normalizer applies is header whitespace stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Continuous readings for one observation, indexed by logical column.
///
/// `None` means missing: either the value failed coercion or the column is
/// absent from the dataset entirely (the accompanying `ColumnPresence`
/// distinguishes the two).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuousValues([Option<f64>; ContinuousColumn::COUNT]);

impl ContinuousValues {
    pub fn get(&self, col: ContinuousColumn) -> Option<f64> {
        self.0[col.index()]
    }

    pub fn set(&mut self, col: ContinuousColumn, value: Option<f64>) {
        self.0[col.index()] = value;
    }
}

/// Indicator flags for one observation. Always 0 or 1; unparseable or
/// missing input values have already been defaulted to 0 by the coercer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorValues([u8; IndicatorColumn::COUNT]);

impl IndicatorValues {
    pub fn get(&self, col: IndicatorColumn) -> u8 {
        self.0[col.index()]
    }

    pub fn set(&mut self, col: IndicatorColumn, value: u8) {
        self.0[col.index()] = value;
    }
}

/// One observation after type coercion, before the missing-value policy.
///
/// A `None` timestamp is the missing sentinel for an unparseable
/// `datetime_utc`; such rows are dropped wholesale by the row filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedObservation {
    pub timestamp: Option<NaiveDateTime>,
    pub values: ContinuousValues,
    pub indicators: IndicatorValues,
    pub extras: Vec<String>,
}

/// One observation that survived the timestamp filter.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampedObservation {
    pub timestamp: NaiveDateTime,
    pub values: ContinuousValues,
    pub indicators: IndicatorValues,
    pub extras: Vec<String>,
}

/// A fixed four-way classification of the calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Summer,
    Monsoon,
    PostMonsoon,
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Summer,
        Season::Monsoon,
        Season::PostMonsoon,
    ];

    /// Classify a calendar month. Total over 1–12: December–February is
    /// winter, March–May summer, June–September monsoon, everything else
    /// post-monsoon.
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Summer,
            6..=9 => Season::Monsoon,
            _ => Season::PostMonsoon,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::PostMonsoon => "Post-Monsoon",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A fully cleaned observation: valid timestamp, derived calendar fields,
/// imputed continuous values, zero-defaulted indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanObservation {
    pub timestamp: NaiveDateTime,
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub season: Season,
    pub values: ContinuousValues,
    pub indicators: IndicatorValues,
    pub extras: Vec<String>,
}

impl CleanObservation {
    pub fn temperature(&self) -> Option<f64> {
        self.values.get(ContinuousColumn::Temperature)
    }

    pub fn humidity(&self) -> Option<f64> {
        self.values.get(ContinuousColumn::Humidity)
    }

    pub fn precipitation(&self) -> Option<f64> {
        self.values.get(ContinuousColumn::Precipitation)
    }

    pub fn rain(&self) -> u8 {
        self.indicators.get(IndicatorColumn::Rain)
    }
}

/// The cleaned dataset handed to the aggregator and the output sinks.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanDataset {
    pub observations: Vec<CleanObservation>,
    pub columns: ColumnPresence,
    pub extra_columns: Vec<String>,
}

impl CleanDataset {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
