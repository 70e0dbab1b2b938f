use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::utils::constants::TIMESTAMP_COLUMN;

/// A real-valued sensor reading declared by the logical column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContinuousColumn {
    DewPoint,
    HeatIndex,
    Humidity,
    Precipitation,
    Pressure,
    Temperature,
    Visibility,
    WindDirection,
    WindGust,
    WindChill,
    WindSpeed,
}

impl ContinuousColumn {
    pub const COUNT: usize = 11;

    pub const ALL: [ContinuousColumn; Self::COUNT] = [
        ContinuousColumn::DewPoint,
        ContinuousColumn::HeatIndex,
        ContinuousColumn::Humidity,
        ContinuousColumn::Precipitation,
        ContinuousColumn::Pressure,
        ContinuousColumn::Temperature,
        ContinuousColumn::Visibility,
        ContinuousColumn::WindDirection,
        ContinuousColumn::WindGust,
        ContinuousColumn::WindChill,
        ContinuousColumn::WindSpeed,
    ];

    /// Column name as it appears in the raw table header.
    pub fn raw_name(&self) -> &'static str {
        match self {
            ContinuousColumn::DewPoint => "_dewptm",
            ContinuousColumn::HeatIndex => "_heatindexm",
            ContinuousColumn::Humidity => "_hum",
            ContinuousColumn::Precipitation => "_precipm",
            ContinuousColumn::Pressure => "_pressurem",
            ContinuousColumn::Temperature => "_tempm",
            ContinuousColumn::Visibility => "_vism",
            ContinuousColumn::WindDirection => "_wdird",
            ContinuousColumn::WindGust => "_wgustm",
            ContinuousColumn::WindChill => "_windchillm",
            ContinuousColumn::WindSpeed => "_wspdm",
        }
    }

    pub fn from_raw_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|col| col.raw_name() == name)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContinuousColumn::DewPoint => "Dew Point",
            ContinuousColumn::HeatIndex => "Heat Index",
            ContinuousColumn::Humidity => "Humidity",
            ContinuousColumn::Precipitation => "Precipitation",
            ContinuousColumn::Pressure => "Pressure",
            ContinuousColumn::Temperature => "Temperature",
            ContinuousColumn::Visibility => "Visibility",
            ContinuousColumn::WindDirection => "Wind Direction",
            ContinuousColumn::WindGust => "Wind Gust",
            ContinuousColumn::WindChill => "Wind Chill",
            ContinuousColumn::WindSpeed => "Wind Speed",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// A binary flag for a weather phenomenon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorColumn {
    Fog,
    Hail,
    Rain,
    Snow,
    Thunder,
    Tornado,
}

impl IndicatorColumn {
    pub const COUNT: usize = 6;

    pub const ALL: [IndicatorColumn; Self::COUNT] = [
        IndicatorColumn::Fog,
        IndicatorColumn::Hail,
        IndicatorColumn::Rain,
        IndicatorColumn::Snow,
        IndicatorColumn::Thunder,
        IndicatorColumn::Tornado,
    ];

    pub fn raw_name(&self) -> &'static str {
        match self {
            IndicatorColumn::Fog => "_fog",
            IndicatorColumn::Hail => "_hail",
            IndicatorColumn::Rain => "_rain",
            IndicatorColumn::Snow => "_snow",
            IndicatorColumn::Thunder => "_thunder",
            IndicatorColumn::Tornado => "_tornado",
        }
    }

    pub fn from_raw_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|col| col.raw_name() == name)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IndicatorColumn::Fog => "Fog",
            IndicatorColumn::Hail => "Hail",
            IndicatorColumn::Rain => "Rain",
            IndicatorColumn::Snow => "Snow",
            IndicatorColumn::Thunder => "Thunder",
            IndicatorColumn::Tornado => "Tornado",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// Resolved positions of the logical columns within a normalized header row.
///
/// Binding happens once, before coercion. Columns declared by the logical
/// schema but absent from the input are recorded as absent here; every
/// downstream presence check goes through this binding rather than probing
/// the header again. Columns the schema does not declare are kept as
/// pass-through extras.
#[derive(Debug, Clone)]
pub struct SchemaBinding {
    timestamp: usize,
    continuous: [Option<usize>; ContinuousColumn::COUNT],
    indicators: [Option<usize>; IndicatorColumn::COUNT],
    extras: Vec<(String, usize)>,
}

impl SchemaBinding {
    /// Bind the logical column set against a normalized header row.
    ///
    /// The timestamp column is the only one that must exist: without it no
    /// row can survive the timestamp filter, so its absence is an error
    /// rather than an empty dataset.
    pub fn bind(headers: &[String]) -> Result<Self> {
        let mut timestamp = None;
        let mut continuous = [None; ContinuousColumn::COUNT];
        let mut indicators = [None; IndicatorColumn::COUNT];
        let mut extras = Vec::new();

        for (position, header) in headers.iter().enumerate() {
            if header == TIMESTAMP_COLUMN {
                timestamp.get_or_insert(position);
            } else if let Some(col) = ContinuousColumn::from_raw_name(header) {
                continuous[col.index()].get_or_insert(position);
            } else if let Some(col) = IndicatorColumn::from_raw_name(header) {
                indicators[col.index()].get_or_insert(position);
            } else {
                extras.push((header.clone(), position));
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| PipelineError::MissingColumn(TIMESTAMP_COLUMN.to_string()))?;

        Ok(Self {
            timestamp,
            continuous,
            indicators,
            extras,
        })
    }

    pub fn timestamp_position(&self) -> usize {
        self.timestamp
    }

    pub fn continuous_position(&self, col: ContinuousColumn) -> Option<usize> {
        self.continuous[col.index()]
    }

    pub fn indicator_position(&self, col: IndicatorColumn) -> Option<usize> {
        self.indicators[col.index()]
    }

    /// Pass-through column names in input order, paired with their positions.
    pub fn extras(&self) -> &[(String, usize)] {
        &self.extras
    }

    pub fn presence(&self) -> ColumnPresence {
        ColumnPresence {
            continuous: self.continuous.map(|pos| pos.is_some()),
            indicators: self.indicators.map(|pos| pos.is_some()),
        }
    }
}

/// Which logical columns were actually bound in the input dataset.
///
/// Travels with the clean data so every consumer can degrade gracefully on
/// absent columns instead of re-probing headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPresence {
    continuous: [bool; ContinuousColumn::COUNT],
    indicators: [bool; IndicatorColumn::COUNT],
}

impl ColumnPresence {
    pub fn has(&self, col: ContinuousColumn) -> bool {
        self.continuous[col.index()]
    }

    pub fn has_indicator(&self, col: IndicatorColumn) -> bool {
        self.indicators[col.index()]
    }

    /// Continuous columns present in the dataset, in schema order.
    pub fn continuous_columns(&self) -> impl Iterator<Item = ContinuousColumn> + '_ {
        ContinuousColumn::ALL
            .into_iter()
            .filter(move |col| self.has(*col))
    }

    /// Indicator columns present in the dataset, in schema order.
    pub fn indicator_columns(&self) -> impl Iterator<Item = IndicatorColumn> + '_ {
        IndicatorColumn::ALL
            .into_iter()
            .filter(move |col| self.has_indicator(*col))
    }
}
