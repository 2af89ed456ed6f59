use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use log::info;
use market_data::calendar::UsFederalCalendar;
use market_data::fixture::{self, FixtureSpec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "generate_fixture")]
#[command(about = "Write a CSV of constant-valued bars for every US business day")]
struct Cli {
    /// Destination CSV file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Ticker symbol written on every row
    #[arg(long)]
    symbol: Option<String>,
    /// First date of the range (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last date of the range (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let defaults = FixtureSpec::default();
    let spec = FixtureSpec {
        symbol: cli.symbol.unwrap_or(defaults.symbol),
        start: cli.start.unwrap_or(defaults.start),
        end: cli.end.unwrap_or(defaults.end),
        output: cli.output.unwrap_or(defaults.output),
        ..defaults
    };

    let bars = fixture::sentinel_bars(&spec, &UsFederalCalendar)?;
    fixture::write_csv_file(&spec.output, &bars)?;
    info!("Fixture generation finished");

    Ok(())
}
