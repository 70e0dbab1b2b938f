use std::path::Path;

use tracing::warn;

use crate::charts;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::{CleanDataset, ContinuousColumn, RainfallSeries};
use crate::processors::{clean_raw_table, Aggregator, CleaningReport, RainfallSelector};
use crate::readers::ObservationReader;
use crate::utils::constants::{
    CLEANED_DATASET_FILE, COMBINED_PLOT, DAILY_TEMPERATURE_PLOT, HUMIDITY_TEMPERATURE_PLOT,
    MONTHLY_RAINFALL_PLOT,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CleanDatasetWriter, ReportWriter};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            data_dir,
            plots_dir,
            report_file,
        } => run_pipeline(&input, &data_dir, &plots_dir, &report_file),

        Commands::Clean { input, output } => run_clean(&input, &output),

        Commands::Stats { input } => run_stats(&input),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // try_init so a second invocation in-process does not panic.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

fn run_pipeline(input: &Path, data_dir: &Path, plots_dir: &Path, report_file: &Path) -> Result<()> {
    println!("Loading data from: {}", input.display());

    let progress = ProgressReporter::new_spinner("Cleaning observations...", false);
    let (dataset, report) = clean_input(input)?;
    progress.finish_with_message(&format!("Cleaned {} observations", dataset.len()));

    println!("\n{}", report.summary());

    prepare_output_dirs(data_dir, plots_dir, report_file)?;

    let aggregator = Aggregator::new();
    let daily = aggregator.daily_temperature(&dataset);
    let monthly_temperature = aggregator.monthly_temperature(&dataset);
    let yearly = aggregator.yearly_temperature(&dataset);
    let monthly_climate = aggregator.monthly_climate(&dataset);
    let seasonal = aggregator.seasonal_climate(&dataset);
    println!(
        "Computed {} daily, {} monthly, {} yearly temperature groups",
        daily.len(),
        monthly_temperature.len(),
        yearly.len()
    );

    let rainfall = RainfallSelector::new().select(&dataset, &monthly_climate);

    let cleaned_path = data_dir.join(CLEANED_DATASET_FILE);
    CleanDatasetWriter::new().write(&dataset, &cleaned_path)?;
    println!("Cleaned data exported to: {}", cleaned_path.display());

    ReportWriter::new().write(&yearly, &seasonal, report_file)?;
    println!("Report generated at: {}", report_file.display());

    render_charts(&dataset, &aggregator, &daily, &rainfall, plots_dir);

    println!("\nPipeline complete!");
    Ok(())
}

fn run_clean(input: &Path, output: &Path) -> Result<()> {
    println!("Loading data from: {}", input.display());

    let (dataset, report) = clean_input(input)?;
    println!("\n{}", report.summary());

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    CleanDatasetWriter::new().write(&dataset, output)?;
    println!("Cleaned data exported to: {}", output.display());

    Ok(())
}

fn run_stats(input: &Path) -> Result<()> {
    println!("Loading data from: {}", input.display());

    let (dataset, report) = clean_input(input)?;
    println!("\n{}", report.summary());

    let aggregator = Aggregator::new();
    let daily = aggregator.daily_temperature(&dataset);
    let yearly = aggregator.yearly_temperature(&dataset);
    let monthly_climate = aggregator.monthly_climate(&dataset);
    let seasonal = aggregator.seasonal_climate(&dataset);

    println!("\n--- DAILY TEMPERATURE ---");
    println!("{} daily groups", daily.len());

    println!("\n--- YEARLY TEMPERATURE ---");
    for (year, summary) in &yearly {
        println!(
            "{}: mean {}, min {}, max {}, std {}",
            year,
            fmt_stat(summary.mean),
            fmt_stat(summary.min),
            fmt_stat(summary.max),
            fmt_stat(summary.std_dev)
        );
    }

    println!("\n--- MONTHLY SUMMARY ---");
    for (month, summary) in &monthly_climate {
        println!(
            "{}: avg temp {}, avg humidity {}, total rainfall {}",
            crate::processors::calendar::month_name(*month),
            fmt_opt(summary.mean_temperature),
            fmt_opt(summary.mean_humidity),
            fmt_opt(summary.total_precipitation)
        );
    }

    println!("\n--- SEASONAL SUMMARY ---");
    for (season, summary) in &seasonal {
        println!(
            "{}: avg temp {}, avg humidity {}, total rainfall {}",
            season,
            fmt_opt(summary.mean_temperature),
            fmt_opt(summary.mean_humidity),
            fmt_opt(summary.total_precipitation)
        );
    }

    match RainfallSelector::new().select(&dataset, &monthly_climate) {
        RainfallSeries::Absent => println!("\nRainfall: no precipitation data"),
        RainfallSeries::MonthlyTotals(_) => println!("\nRainfall: monthly magnitude totals"),
        RainfallSeries::RainyDayCounts(_) => {
            println!("\nRainfall: rainy-day counts (all magnitudes were zero)")
        }
    }

    Ok(())
}

fn clean_input(input: &Path) -> Result<(CleanDataset, CleaningReport)> {
    let raw = ObservationReader::new().read_observations(input)?;
    clean_raw_table(raw)
}

/// Create the output directories if absent. Idempotent; an existing
/// directory is not an error.
fn prepare_output_dirs(data_dir: &Path, plots_dir: &Path, report_file: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    std::fs::create_dir_all(plots_dir)?;
    if let Some(parent) = report_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn render_charts(
    dataset: &CleanDataset,
    aggregator: &Aggregator,
    daily: &std::collections::BTreeMap<chrono::NaiveDate, crate::models::TemperatureSummary>,
    rainfall: &RainfallSeries,
    plots_dir: &Path,
) {
    let daily_trend_path = plots_dir.join(DAILY_TEMPERATURE_PLOT);
    report_chart(
        "daily temperature trend",
        &daily_trend_path,
        charts::render_daily_trend(daily, &daily_trend_path),
    );

    let rainfall_path = plots_dir.join(MONTHLY_RAINFALL_PLOT);
    report_chart(
        "monthly rainfall",
        &rainfall_path,
        charts::render_monthly_rainfall(rainfall, &rainfall_path),
    );

    let scatter_path = plots_dir.join(HUMIDITY_TEMPERATURE_PLOT);
    report_chart(
        "humidity vs temperature",
        &scatter_path,
        charts::render_humidity_vs_temperature(dataset, &scatter_path),
    );

    let combined_path = plots_dir.join(COMBINED_PLOT);
    let daily_temperature = aggregator.daily_mean(dataset, ContinuousColumn::Temperature);
    let daily_humidity = aggregator.daily_mean(dataset, ContinuousColumn::Humidity);
    report_chart(
        "combined temperature and humidity",
        &combined_path,
        charts::render_combined(&daily_temperature, &daily_humidity, &combined_path),
    );
}

/// Chart failures degrade the same way absent-column plots do; only the
/// input path may abort the run.
fn report_chart(label: &str, path: &Path, outcome: Result<bool>) {
    match outcome {
        Ok(true) => println!("Saved: {}", path.display()),
        Ok(false) => println!("Skipped {} chart (no data)", label),
        Err(e) => warn!("failed to render {} chart: {}", label, e),
    }
}

fn fmt_stat(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "n/a".to_string()
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), fmt_stat)
}
