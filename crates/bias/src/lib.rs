//! Empirical quantile-mapping bias correction for simulated streamflow.
//!
//! This crate adjusts a model-simulated discharge series against observed
//! gauge data, one calendar month at a time.
//!
//! # Pipeline
//!
//! 1. **Fit** one empirical histogram per calendar month for both the
//!    simulated and observed reference subsets (Sturges bin count,
//!    integer-rounded domain, leading edge forced below zero)
//! 2. **Tabulate** the empirical CDFs: flow → probability for the simulated
//!    side, probability → flow for the observed side
//! 3. **Map** each simulated value: simCDF → probability → obs inverse CDF,
//!    clamped at zero
//!
//! `NaN` values pass through unchanged.
//!
//! # Two driver modes
//!
//! - [`correct_series`] partitions a multi-year simulation by (year, month)
//!   and maps each partition through its month's model. Out-of-domain
//!   values are a hard failure for the affected partition only.
//! - [`correct_forecast`] corrects a short forecast horizon through the
//!   single model of the horizon's starting month, with linear
//!   extrapolation enabled (forecast peaks may exceed historical bounds).
//!
//! # Quick Start
//!
//! ```no_run
//! use caudal_bias::{CorrectionConfig, correct_series};
//! use caudal_series::TimeSeries;
//!
//! # fn get(_: &str) -> TimeSeries { unimplemented!() }
//! let simulated: TimeSeries = get("simulated");
//! let observed: TimeSeries = get("observed");
//!
//! let config = CorrectionConfig::new();
//! let result = correct_series(&simulated, &observed, &config).unwrap();
//! println!("corrected {} samples", result.series().len());
//! ```

mod cdf;
mod config;
mod driver;
mod error;
mod histogram;
mod model;
mod result;

pub use cdf::{EmpiricalCdf, Extrapolation};
pub use config::CorrectionConfig;
pub use driver::{correct_forecast, correct_series};
pub use error::BiasError;
pub use model::MonthModel;
pub use result::CorrectionResult;

use caudal_series::TimeSeries;
use chrono::Datelike;

/// Corrects one batch against explicit month-scoped reference subsets.
///
/// `simulated_reference` and `observed_reference` must already be filtered
/// to the same calendar month across all historical years; `batch` is the
/// series to transform. This is the single-model building block behind the
/// drivers; prefer [`correct_series`] / [`correct_forecast`] for whole-series
/// work.
///
/// # Errors
///
/// Returns [`BiasError`] if either reference subset cannot support a model,
/// or if a batch value falls outside the interpolation domain while
/// `config` disables extrapolation.
pub fn correct(
    simulated_reference: &TimeSeries,
    observed_reference: &TimeSeries,
    batch: &TimeSeries,
    config: &CorrectionConfig,
) -> Result<TimeSeries, BiasError> {
    config.validate()?;
    let month = simulated_reference
        .first_stamp()
        .map(|s| s.month())
        .ok_or(BiasError::EmptySeries {
            role: "simulated reference",
        })?;
    let model = MonthModel::fit(simulated_reference, observed_reference, month, config)?;
    model.correct_batch(batch, config.extrapolation())
}
