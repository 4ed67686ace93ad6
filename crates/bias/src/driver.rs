//! Driver routines: whole-series and forecast-horizon correction.

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use caudal_series::TimeSeries;

use crate::cdf::Extrapolation;
use crate::config::CorrectionConfig;
use crate::error::BiasError;
use crate::model::MonthModel;
use crate::result::CorrectionResult;

/// Corrects a multi-year simulated series against the observed record.
///
/// Each calendar month present in `simulated` is fitted once, pooling that
/// month's samples across every year of both series; the model is then
/// applied to each (year, month) partition of `simulated` in chronological
/// order. Months whose reference fit fails are skipped (their partitions
/// produce no output rows), as are partitions with no samples — neither
/// aborts the run.
///
/// # Errors
///
/// Returns [`BiasError::EmptySeries`] when `simulated` is empty and
/// [`BiasError::NoCorrectableMonths`] when every month's fit failed.
pub fn correct_series(
    simulated: &TimeSeries,
    observed: &TimeSeries,
    config: &CorrectionConfig,
) -> Result<CorrectionResult, BiasError> {
    config.validate()?;
    if simulated.is_empty() {
        return Err(BiasError::EmptySeries { role: "simulated" });
    }

    // Fit each calendar month once; the reference pools all years, so the
    // model is identical for every year's partition of that month.
    let mut models: [Option<MonthModel>; 12] = Default::default();
    let mut corrected_months = Vec::new();
    let mut skipped_months = Vec::new();

    for month in 1u32..=12 {
        let sim_ref = simulated.month_subset(month);
        if sim_ref.is_empty() {
            continue;
        }
        let obs_ref = observed.month_subset(month);
        match MonthModel::fit(&sim_ref, &obs_ref, month, config) {
            Ok(model) => {
                models[(month - 1) as usize] = Some(model);
                corrected_months.push(month);
            }
            Err(
                e @ (BiasError::InsufficientReference { .. }
                | BiasError::DegenerateReference { .. }),
            ) => {
                debug!(month, error = %e, "skipping month: reference fit failed");
                skipped_months.push(month);
            }
            Err(e) => return Err(e),
        }
    }

    if corrected_months.is_empty() {
        return Err(BiasError::NoCorrectableMonths {
            skipped_months,
        });
    }

    let mut stamps: Vec<NaiveDateTime> = Vec::with_capacity(simulated.len());
    let mut values: Vec<f64> = Vec::with_capacity(simulated.len());
    let mut failed_partitions = Vec::new();

    for year in simulated.years() {
        for month in 1u32..=12 {
            let Some(model) = &models[(month - 1) as usize] else {
                continue;
            };
            let partition = simulated.year_month_subset(year, month);
            if partition.is_empty() {
                continue;
            }
            match model.correct_batch(&partition, config.extrapolation()) {
                Ok(corrected) => {
                    stamps.extend_from_slice(corrected.stamps());
                    values.extend_from_slice(corrected.values());
                }
                Err(e @ BiasError::OutOfDomain { .. }) => {
                    debug!(year, month, error = %e, "dropping partition: value left domain");
                    failed_partitions.push((year, month));
                }
                Err(e) => return Err(e),
            }
        }
    }

    // Partitions were visited in (year, month) order, so the concatenation
    // is already chronological.
    let series = TimeSeries::from_parts(stamps, values)?;
    Ok(CorrectionResult::new(
        series,
        corrected_months,
        skipped_months,
        failed_partitions,
    ))
}

/// Corrects a short forecast horizon.
///
/// The single reference month is the calendar month of the forecast's first
/// timestamp; the whole horizon is one batch. Linear extrapolation is
/// always enabled here — a forecast may exceed the historical range, and
/// failing the horizon for one peak value would defeat its purpose.
///
/// # Errors
///
/// Returns [`BiasError::EmptySeries`] for an empty forecast, or a fit error
/// when the starting month lacks usable reference data.
pub fn correct_forecast(
    simulated: &TimeSeries,
    observed: &TimeSeries,
    forecast: &TimeSeries,
    config: &CorrectionConfig,
) -> Result<TimeSeries, BiasError> {
    config.validate()?;
    let month = forecast
        .first_stamp()
        .map(|s| s.month())
        .ok_or(BiasError::EmptySeries { role: "forecast" })?;

    let sim_ref = simulated.month_subset(month);
    let obs_ref = observed.month_subset(month);
    let model = MonthModel::fit(&sim_ref, &obs_ref, month, config)?;
    model.correct_batch(forecast, Extrapolation::Linear)
}
