//! The per-calendar-month correction model.

use caudal_series::TimeSeries;

use crate::cdf::{EmpiricalCdf, Extrapolation};
use crate::config::CorrectionConfig;
use crate::error::BiasError;
use crate::histogram::{EdgeSide, HistogramModel};

/// The fitted quantile-mapping model for one calendar month.
///
/// Holds the simulated flow → probability table and the observed
/// probability → flow inverse, both built from that month's pooled
/// historical samples across all years.
#[derive(Debug, Clone)]
pub struct MonthModel {
    month: u32,
    sim_cdf: EmpiricalCdf,
    obs_inverse: EmpiricalCdf,
}

impl MonthModel {
    /// Fits the model from the month-scoped reference subsets.
    ///
    /// `simulated_reference` and `observed_reference` hold every historical
    /// sample of calendar month `month`, across all years. Missing observed
    /// values are dropped here; the simulated side is expected to be free of
    /// NaN (upstream floors artifacts instead of blanking them).
    ///
    /// # Errors
    ///
    /// Returns [`BiasError::InsufficientReference`] or
    /// [`BiasError::DegenerateReference`] when either side cannot support a
    /// monotone CDF.
    pub fn fit(
        simulated_reference: &TimeSeries,
        observed_reference: &TimeSeries,
        month: u32,
        config: &CorrectionConfig,
    ) -> Result<Self, BiasError> {
        let observed = observed_reference.drop_nan();
        let min_samples = config.min_reference_samples();

        let sim_hist =
            HistogramModel::fit(simulated_reference.values(), EdgeSide::Simulated, month, min_samples)?;
        let obs_hist =
            HistogramModel::fit(observed.values(), EdgeSide::Observed, month, min_samples)?;

        // Forward table: flow → probability, from the simulated histogram.
        let sim_cdf = EmpiricalCdf::from_table(&sim_hist.upper_edges, &sim_hist.cumulative, month)?;
        // Inverse table: probability → flow, columns of the observed
        // histogram swapped.
        let obs_inverse =
            EmpiricalCdf::from_table(&obs_hist.cumulative, &obs_hist.upper_edges, month)?;

        Ok(Self {
            month,
            sim_cdf,
            obs_inverse,
        })
    }

    /// The calendar month (1..=12) this model corrects.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Maps one simulated value through simCDF → probability → observed
    /// inverse CDF, clamping the result at zero.
    ///
    /// `NaN` passes through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BiasError::OutOfDomain`] when the value (or its mapped
    /// probability) leaves the tables and `extrapolation` is
    /// [`Extrapolation::Fail`].
    pub fn correct_value(
        &self,
        value: f64,
        extrapolation: Extrapolation,
    ) -> Result<f64, BiasError> {
        if value.is_nan() {
            return Ok(f64::NAN);
        }
        let probability = self.sim_cdf.eval(value, extrapolation)?;
        let corrected = self.obs_inverse.eval(probability, extrapolation)?;
        Ok(if corrected < 0.0 { 0.0 } else { corrected })
    }

    /// Maps every value of `batch`, preserving its timestamps.
    ///
    /// # Errors
    ///
    /// Fails on the first out-of-domain value when `extrapolation` is
    /// [`Extrapolation::Fail`]; no partial output is produced.
    pub fn correct_batch(
        &self,
        batch: &TimeSeries,
        extrapolation: Extrapolation,
    ) -> Result<TimeSeries, BiasError> {
        let mut corrected = Vec::with_capacity(batch.len());
        for &v in batch.values() {
            corrected.push(self.correct_value(v, extrapolation)?);
        }
        Ok(TimeSeries::from_parts(batch.stamps().to_vec(), corrected)?)
    }
}
