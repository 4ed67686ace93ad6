//! Goodness-of-fit metrics over paired (simulated, observed) streamflow.
//!
//! The public surface is [`build_table`]: a caller names the metrics it
//! wants by their hydrostats abbreviation, optionally tunes the few that
//! take extra constants through [`MetricParams`], and gets back one scalar
//! per code. Unknown codes fail the whole call — a partial table silently
//! missing a requested metric is worse than no table.

mod error;
mod formulas;
mod params;
mod table;

pub use error::MetricsError;
pub use params::MetricParams;
pub use table::{SUPPORTED_CODES, build_table};
