//! Forecast command: bias-correct a forecast bundle against the
//! historical record and write the raw and corrected products.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use caudal_bias::{BiasError, correct_forecast};
use caudal_io::{
    ForecastBundle, read_forecast_record, read_forecast_stats, read_observed, read_simulated,
    write_forecast_csv, write_series_csv,
};
use caudal_series::TimeSeries;

use crate::cli::ForecastArgs;
use crate::config::CaudalConfig;
use crate::convert;

pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();

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

    info!(path = %args.forecast.display(), "reading forecast stats");
    let bundle = read_forecast_stats(&args.forecast)
        .with_context(|| format!("failed to read forecast CSV: {}", args.forecast.display()))?;

    let correction_config = convert::build_correction_config(&config.correction);
    let correct_one = |series: &TimeSeries| -> Result<TimeSeries, BiasError> {
        correct_forecast(&simulated, &observed, series, &correction_config)
    };

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create: {}", args.output_dir.display()))?;

    write_forecast_csv(&args.output_dir.join("forecast_raw.csv"), &bundle)
        .context("failed to write raw forecast bundle")?;

    let corrected: ForecastBundle = bundle
        .map(correct_one)
        .context("forecast bias correction failed")?;
    write_forecast_csv(&args.output_dir.join("forecast_corrected.csv"), &corrected)
        .context("failed to write corrected forecast bundle")?;
    info!(horizon = corrected.mean.len(), "forecast bundle corrected");

    if let Some(record_path) = &args.record {
        run_record(
            record_path,
            &args.output_dir,
            &simulated,
            &observed,
            &correction_config,
        )?;
    }

    Ok(())
}

/// Corrects the prior-issuance record, when one is supplied.
fn run_record(
    record_path: &Path,
    output_dir: &Path,
    simulated: &TimeSeries,
    observed: &TimeSeries,
    config: &caudal_bias::CorrectionConfig,
) -> Result<()> {
    info!(path = %record_path.display(), "reading forecast record");
    let record = read_forecast_record(record_path)
        .with_context(|| format!("failed to read record CSV: {}", record_path.display()))?;

    write_series_csv(&output_dir.join("record_raw.csv"), &record)
        .context("failed to write raw forecast record")?;

    let corrected = correct_forecast(simulated, observed, &record, config)
        .context("forecast record correction failed")?;
    write_series_csv(&output_dir.join("record_corrected.csv"), &corrected)
        .context("failed to write corrected forecast record")?;
    info!(samples = corrected.len(), "forecast record corrected");

    Ok(())
}
