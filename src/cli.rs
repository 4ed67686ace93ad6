use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Caudal streamflow bias-correction and validation toolkit.
#[derive(Parser)]
#[command(
    name = "caudal",
    version,
    about = "Streamflow bias-correction and validation toolkit"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Bias-correct a simulated series against an observed gauge record.
    Correct(CorrectArgs),
    /// Bias-correct a forecast bundle using the historical record.
    Forecast(ForecastArgs),
    /// Run the full validation pipeline and write a diagnostics JSON.
    Evaluate(EvaluateArgs),
}

/// Arguments for the `correct` subcommand.
#[derive(clap::Args)]
pub struct CorrectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "caudal.toml")]
    pub config: PathBuf,

    /// Path to observed gauge CSV.
    #[arg(long)]
    pub observed: PathBuf,

    /// Path to simulated discharge CSV.
    #[arg(long)]
    pub simulated: PathBuf,

    /// Path for the corrected CSV output.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "caudal.toml")]
    pub config: PathBuf,

    /// Path to observed gauge CSV.
    #[arg(long)]
    pub observed: PathBuf,

    /// Path to simulated discharge CSV (historical reference).
    #[arg(long)]
    pub simulated: PathBuf,

    /// Path to forecast-stats CSV (ensemble statistics + high-res).
    #[arg(long)]
    pub forecast: PathBuf,

    /// Optional path to prior forecast-record CSV.
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Directory for the corrected bundle CSVs.
    #[arg(short, long)]
    pub output_dir: PathBuf,
}

/// Arguments for the `evaluate` subcommand.
#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "caudal.toml")]
    pub config: PathBuf,

    /// Path to observed gauge CSV.
    #[arg(long)]
    pub observed: PathBuf,

    /// Path to simulated discharge CSV.
    #[arg(long)]
    pub simulated: PathBuf,

    /// Path for diagnostics JSON output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
