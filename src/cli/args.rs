use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-report")]
#[command(about = "Weather observation cleaning and reporting pipeline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: clean, aggregate, chart, export, report
    Run {
        #[arg(short, long, help = "Input CSV file of raw observations")]
        input: PathBuf,

        #[arg(
            long,
            default_value = "data",
            help = "Directory for the cleaned dataset"
        )]
        data_dir: PathBuf,

        #[arg(long, default_value = "plots", help = "Directory for rendered charts")]
        plots_dir: PathBuf,

        #[arg(long, default_value = "report.md", help = "Markdown report path")]
        report_file: PathBuf,
    },

    /// Clean the raw observations and export the cleaned dataset
    Clean {
        #[arg(short, long, help = "Input CSV file of raw observations")]
        input: PathBuf,

        #[arg(
            short,
            long,
            default_value = "data/cleaned_weather.csv",
            help = "Output path for the cleaned dataset"
        )]
        output: PathBuf,
    },

    /// Print summary statistics without writing any artifacts
    Stats {
        #[arg(short, long, help = "Input CSV file of raw observations")]
        input: PathBuf,
    },
}
