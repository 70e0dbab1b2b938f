use std::fs::File;
use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::models::RawTable;

/// Reads a raw observation CSV into an untyped [`RawTable`].
///
/// Rows shorter than the header are tolerated: missing trailing fields read
/// as empty strings and fall out as missing values during coercion. A
/// missing or unreadable input file is the one fatal condition on the input
/// path.
pub struct ObservationReader {
    flexible: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { flexible: true }
    }

    pub fn with_flexible(flexible: bool) -> Self {
        Self { flexible }
    }

    pub fn read_observations(&self, path: &Path) -> Result<RawTable> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(self.flexible)
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(PipelineError::InvalidFormat(format!(
                "no header row in {}",
                path.display()
            )));
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            // Pad short rows so positional lookups stay in bounds.
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(RawTable::new(headers, rows))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
