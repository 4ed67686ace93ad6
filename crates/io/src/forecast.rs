//! The ensemble forecast product split into its component series.

use caudal_series::TimeSeries;

/// One forecast issuance: five ensemble-statistics series on a shared
/// cadence plus the hourly high-resolution run over a shorter horizon.
///
/// The five statistics series carry identical timestamps by construction;
/// `high_res` is time-aligned independently.
#[derive(Debug, Clone)]
pub struct ForecastBundle {
    pub mean: TimeSeries,
    pub max: TimeSeries,
    pub min: TimeSeries,
    pub std_dev_lower: TimeSeries,
    pub std_dev_upper: TimeSeries,
    pub high_res: TimeSeries,
}

impl ForecastBundle {
    /// Applies one mapping to each component series.
    pub fn map<F, E>(&self, mut f: F) -> Result<ForecastBundle, E>
    where
        F: FnMut(&TimeSeries) -> Result<TimeSeries, E>,
    {
        Ok(ForecastBundle {
            mean: f(&self.mean)?,
            max: f(&self.max)?,
            min: f(&self.min)?,
            std_dev_lower: f(&self.std_dev_lower)?,
            std_dev_upper: f(&self.std_dev_upper)?,
            high_res: f(&self.high_res)?,
        })
    }
}
