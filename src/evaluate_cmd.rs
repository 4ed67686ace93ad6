//! Evaluate command: the full validation pipeline for one station,
//! written as a single diagnostics JSON.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::{info, info_span};

use caudal_bias::correct_series;
use caudal_climatology::{daily_average, monthly_average};
use caudal_io::{read_observed, read_simulated};
use caudal_metrics::build_table;
use caudal_series::{MergedSeries, TimeSeries};
use caudal_stats::scatter_summary;
use caudal_volume::integrate;

use crate::cli::EvaluateArgs;
use crate::config::CaudalConfig;
use crate::convert;

pub fn run(args: EvaluateArgs) -> Result<()> {
    let _cmd = info_span!("evaluate").entered();

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

    let raw = MergedSeries::inner_join(&simulated, &observed);
    info!(rows = raw.len(), "raw series merged");

    let correction_config = convert::build_correction_config(&config.correction);
    let result = correct_series(&simulated, &observed, &correction_config)
        .context("bias correction failed")?;
    let corrected = MergedSeries::inner_join(result.series(), &observed);
    info!(rows = corrected.len(), "corrected series merged");

    let codes = convert::build_metric_codes(&config.metrics);
    let params = convert::build_metric_params(&config.metrics);
    let raw_table = build_table(&raw, &codes, &params).context("raw metrics table failed")?;
    let corrected_table =
        build_table(&corrected, &codes, &params).context("corrected metrics table failed")?;

    let raw_scatter = scatter_summary(&raw).context("raw regression failed")?;
    let corrected_scatter = scatter_summary(&corrected).context("corrected regression failed")?;

    let diagnostics = json!({
        "window": {
            "start_year": window.start_year,
            "end_year": window.end_year,
        },
        "correction": {
            "corrected_months": result.corrected_months(),
            "skipped_months": result.skipped_months(),
            "failed_partitions": result.failed_partitions(),
        },
        "metrics": {
            "raw": raw_table,
            "corrected": corrected_table,
        },
        "regression": {
            "raw": scatter_json(&raw_scatter),
            "corrected": scatter_json(&corrected_scatter),
        },
        "climatology": {
            "raw": climatology_json(&raw)?,
            "corrected": climatology_json(&corrected)?,
        },
        "volume": {
            "observed_total_mm3": volume_total(&observed)?,
            "simulated_total_mm3": volume_total(&simulated)?,
            "corrected_total_mm3": volume_total(result.series())?,
        },
    });

    let output = args
        .output
        .unwrap_or_else(|| args.simulated.with_extension("diagnostics.json"));
    let rendered =
        serde_json::to_string_pretty(&diagnostics).context("failed to render diagnostics")?;
    std::fs::write(&output, rendered)
        .with_context(|| format!("failed to write diagnostics: {}", output.display()))?;
    info!(path = %output.display(), "diagnostics written");

    Ok(())
}

fn scatter_json(summary: &caudal_stats::ScatterSummary) -> Value {
    json!({
        "slope": summary.regression.slope,
        "intercept": summary.regression.intercept,
        "correlation": summary.regression.correlation,
        "min_value": summary.min_value,
        "max_value": summary.max_value,
    })
}

fn climatology_json(merged: &MergedSeries) -> Result<Value> {
    let daily = daily_average(merged).context("daily climatology failed")?;
    let monthly = monthly_average(merged).context("monthly climatology failed")?;
    Ok(json!({
        "daily": {
            "keys": daily.keys,
            "sim": nullable(&daily.sim),
            "obs": nullable(&daily.obs),
        },
        "monthly": {
            "months": monthly.months,
            "sim": nullable(&monthly.sim),
            "obs": nullable(&monthly.obs),
        },
    }))
}

/// Integrates a series after dropping gaps; the Simpson total only.
fn volume_total(series: &TimeSeries) -> Result<Value> {
    let summary = integrate(&series.drop_nan()).context("volume integration failed")?;
    Ok(json!(summary.total))
}

/// JSON has no NaN; empty groups serialize as null.
fn nullable(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|&v| if v.is_finite() { Some(v) } else { None })
        .collect()
}
