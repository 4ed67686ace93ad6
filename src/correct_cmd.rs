//! Correct command: bias-correct a simulated series and write it out.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use caudal_bias::correct_series;
use caudal_io::{read_observed, read_simulated, write_series_csv};

use crate::cli::CorrectArgs;
use crate::config::CaudalConfig;
use crate::convert;

pub fn run(args: CorrectArgs) -> Result<()> {
    let _cmd = info_span!("correct").entered();

    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: CaudalConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    info!(path = %args.observed.display(), "reading observed gauge record");
    let observed = read_observed(&args.observed)
        .with_context(|| format!("failed to read observed CSV: {}", args.observed.display()))?;

    info!(path = %args.simulated.display(), "reading simulated discharge");
    let simulated = read_simulated(&args.simulated)
        .with_context(|| format!("failed to read simulated CSV: {}", args.simulated.display()))?;

    let window = &config.correction;
    let observed = observed.restrict_years(window.start_year, window.end_year);
    let simulated = simulated.restrict_years(window.start_year, window.end_year);
    info!(
        observed = observed.len(),
        simulated = simulated.len(),
        "series restricted to comparison window"
    );

    let correction_config = convert::build_correction_config(&config.correction);
    let result = correct_series(&simulated, &observed, &correction_config)
        .context("bias correction failed")?;

    if !result.skipped_months().is_empty() {
        warn!(
            months = ?result.skipped_months(),
            "months skipped: insufficient or degenerate reference data"
        );
    }
    if !result.failed_partitions().is_empty() {
        warn!(
            partitions = ?result.failed_partitions(),
            "partitions dropped: values outside the historical range"
        );
    }

    write_series_csv(&args.output, result.series())
        .with_context(|| format!("failed to write corrected CSV: {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        samples = result.series().len(),
        "corrected series written"
    );

    Ok(())
}
