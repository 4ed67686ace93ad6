//! Daily-of-year and monthly-of-year climatology averages.
//!
//! Both aggregations are pure reductions over a merged
//! (simulated, observed) series: each column is averaged independently
//! across all years for every calendar grouping key present. Keys with no
//! samples are absent from the result, never zero-filled.

mod error;

pub use error::ClimatologyError;

use caudal_series::MergedSeries;
use chrono::Datelike;

/// Day-of-year climatology: one row per `(month, day)` present in the
/// input, chronologically ordered within the calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyClimatology {
    /// `(month, day)` grouping keys, ascending.
    pub keys: Vec<(u32, u32)>,
    /// Mean simulated flow per key.
    pub sim: Vec<f64>,
    /// Mean observed flow per key.
    pub obs: Vec<f64>,
}

/// Month-of-year climatology: one row per calendar month present.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyClimatology {
    /// Calendar months (1..=12) present, ascending.
    pub months: Vec<u32>,
    /// Mean simulated flow per month.
    pub sim: Vec<f64>,
    /// Mean observed flow per month.
    pub obs: Vec<f64>,
}

/// Per-column accumulator that skips non-finite samples.
#[derive(Default, Clone, Copy)]
struct ColumnMean {
    sum: f64,
    count: usize,
}

impl ColumnMean {
    fn push(&mut self, v: f64) {
        if v.is_finite() {
            self.sum += v;
            self.count += 1;
        }
    }

    /// NaN when the column had no finite sample for this key.
    fn finish(self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Averages each column by `(month, day)` across all years present.
///
/// The result holds at most 366 rows.
///
/// # Errors
///
/// Returns [`ClimatologyError::EmptyInput`] when the merged series has no
/// rows.
pub fn daily_average(merged: &MergedSeries) -> Result<DailyClimatology, ClimatologyError> {
    if merged.is_empty() {
        return Err(ClimatologyError::EmptyInput);
    }

    let mut groups: std::collections::BTreeMap<(u32, u32), (ColumnMean, ColumnMean)> =
        std::collections::BTreeMap::new();
    for (i, stamp) in merged.stamps().iter().enumerate() {
        let key = (stamp.month(), stamp.day());
        let entry = groups.entry(key).or_default();
        entry.0.push(merged.sim()[i]);
        entry.1.push(merged.obs()[i]);
    }

    let mut keys = Vec::with_capacity(groups.len());
    let mut sim = Vec::with_capacity(groups.len());
    let mut obs = Vec::with_capacity(groups.len());
    for (key, (s, o)) in groups {
        keys.push(key);
        sim.push(s.finish());
        obs.push(o.finish());
    }

    Ok(DailyClimatology { keys, sim, obs })
}

/// Averages each column by calendar month across all years present.
///
/// The result holds at most 12 rows.
///
/// # Errors
///
/// Returns [`ClimatologyError::EmptyInput`] when the merged series has no
/// rows.
pub fn monthly_average(merged: &MergedSeries) -> Result<MonthlyClimatology, ClimatologyError> {
    if merged.is_empty() {
        return Err(ClimatologyError::EmptyInput);
    }

    let mut groups: std::collections::BTreeMap<u32, (ColumnMean, ColumnMean)> =
        std::collections::BTreeMap::new();
    for (i, stamp) in merged.stamps().iter().enumerate() {
        let entry = groups.entry(stamp.month()).or_default();
        entry.0.push(merged.sim()[i]);
        entry.1.push(merged.obs()[i]);
    }

    let mut months = Vec::with_capacity(groups.len());
    let mut sim = Vec::with_capacity(groups.len());
    let mut obs = Vec::with_capacity(groups.len());
    for (month, (s, o)) in groups {
        months.push(month);
        sim.push(s.finish());
        obs.push(o.finish());
    }

    Ok(MonthlyClimatology { months, sim, obs })
}
