use clap::Parser;
use weather_report::cli::{run, Cli};
use weather_report::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
