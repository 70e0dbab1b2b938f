use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::{ClimateSummary, Season, TemperatureSummary};

/// Renders the narrative Markdown report from the yearly and seasonal
/// summary tables.
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(
        &self,
        yearly: &BTreeMap<i32, TemperatureSummary>,
        seasonal: &BTreeMap<Season, ClimateSummary>,
        path: &Path,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);

        writeln!(out, "# Weather Data Analysis Report")?;
        writeln!(out)?;
        writeln!(
            out,
            "This report summarizes key insights from the weather dataset."
        )?;
        writeln!(out)?;

        writeln!(out, "## Yearly Temperature Summary")?;
        writeln!(out)?;
        writeln!(
            out,
            "Below are the yearly average, minimum, and maximum temperatures."
        )?;
        writeln!(out)?;
        self.write_yearly_table(&mut out, yearly)?;
        writeln!(out)?;

        writeln!(out, "## Seasonal Summary")?;
        writeln!(out)?;
        writeln!(
            out,
            "The table below shows average temperature, humidity, and total rainfall for each season."
        )?;
        writeln!(out)?;
        self.write_seasonal_table(&mut out, seasonal)?;
        writeln!(out)?;

        writeln!(out, "## Observations")?;
        writeln!(out)?;
        writeln!(out, "- Identify the hottest and coldest years.")?;
        writeln!(out, "- Describe which season has the highest rainfall.")?;
        writeln!(
            out,
            "- Comment on the relationship between humidity and temperature."
        )?;

        out.flush()?;
        Ok(())
    }

    fn write_yearly_table<W: Write>(
        &self,
        out: &mut W,
        yearly: &BTreeMap<i32, TemperatureSummary>,
    ) -> Result<()> {
        if yearly.is_empty() {
            writeln!(out, "No temperature data available.")?;
            return Ok(());
        }

        writeln!(out, "| Year | Mean (°C) | Min (°C) | Max (°C) | Std Dev |")?;
        writeln!(out, "|---:|---:|---:|---:|---:|")?;
        for (year, summary) in yearly {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                year,
                format_stat(summary.mean),
                format_stat(summary.min),
                format_stat(summary.max),
                format_stat(summary.std_dev),
            )?;
        }

        Ok(())
    }

    fn write_seasonal_table<W: Write>(
        &self,
        out: &mut W,
        seasonal: &BTreeMap<Season, ClimateSummary>,
    ) -> Result<()> {
        if seasonal.is_empty() {
            writeln!(out, "No seasonal data available.")?;
            return Ok(());
        }

        writeln!(
            out,
            "| Season | Avg Temperature (°C) | Avg Humidity (%) | Total Rainfall (mm) |"
        )?;
        writeln!(out, "|---|---:|---:|---:|")?;
        for (season, summary) in seasonal {
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                season.label(),
                format_optional(summary.mean_temperature),
                format_optional(summary.mean_humidity),
                format_optional(summary.total_precipitation),
            )?;
        }

        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_stat(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "n/a".to_string()
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format_stat(value),
        None => "n/a".to_string(),
    }
}
