use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use stock_forecast::runner::DEFAULT_OUTPUT_SMOOTHING;
use stock_forecast::{ForecastRunner, ModelConfig, RunnerConfig};

#[derive(Parser)]
#[command(name = "predict")]
#[command(about = "Forecast closing prices from CSV bars on stdin, writing JSON to stdout")]
struct Cli {
    /// Forecast period: "1 week", "1 month", "3 months", "1 year" or "5 years"
    period: String,
    /// Smooth the forecast with a centered moving average
    #[arg(long)]
    smooth: bool,
    /// Window of the forecast smoothing
    #[arg(long, value_name = "N", default_value_t = DEFAULT_OUTPUT_SMOOTHING)]
    smooth_window: usize,
    /// Smooth the history with a window of N before fitting
    #[arg(long, value_name = "N")]
    smooth_history: Option<usize>,
    /// Simulated paths for the uncertainty interval (0 for the analytic band)
    #[arg(long, value_name = "N", default_value_t = 1000)]
    uncertainty_samples: usize,
    /// Probability mass covered by the uncertainty interval
    #[arg(long, value_name = "W", default_value_t = 0.8)]
    interval_width: f64,
    /// Seed for interval simulation
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Read bars from this file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Report model fit details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = RunnerConfig {
        model: ModelConfig {
            uncertainty_samples: cli.uncertainty_samples,
            interval_width: cli.interval_width,
            seed: cli.seed,
            verbose: cli.verbose,
            ..ModelConfig::default()
        },
        output_smoothing: cli.smooth.then_some(cli.smooth_window),
        history_smoothing: cli.smooth_history,
    };
    debug!("Runner configuration: {:?}", config);

    let runner = ForecastRunner::new(config)?;
    let input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Cannot open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    runner.run(&cli.period, input, io::stdout().lock())?;

    Ok(())
}
