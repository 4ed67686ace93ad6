//! # caudal-series
//!
//! In-memory single-variable time series for daily streamflow, plus the
//! merged (simulated, observed) pairing used by every downstream analysis.
//!
//! ## Invariants
//!
//! - Timestamps are strictly increasing (no duplicates).
//! - Values are `f64`; `NaN` marks a missing observation.
//! - Series are immutable once built: every operation returns a new value.
//!
//! ## Quick Start
//!
//! ```
//! use caudal_series::{TimeSeries, MergedSeries};
//! use chrono::NaiveDate;
//!
//! let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! let sim = TimeSeries::from_pairs(vec![(d(2020, 1, 1), 10.0), (d(2020, 1, 2), 12.0)]).unwrap();
//! let obs = TimeSeries::from_pairs(vec![(d(2020, 1, 2), 11.0), (d(2020, 1, 3), 9.0)]).unwrap();
//!
//! let merged = MergedSeries::inner_join(&sim, &obs);
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged.sim(), &[12.0]);
//! assert_eq!(merged.obs(), &[11.0]);
//! ```

mod error;
mod merged;
mod timeseries;

pub use error::SeriesError;
pub use merged::MergedSeries;
pub use timeseries::TimeSeries;
