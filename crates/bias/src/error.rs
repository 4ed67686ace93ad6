//! Error types for the caudal-bias crate.

/// Error type for all fallible operations in the caudal-bias crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BiasError {
    /// Returned when a required input series holds no samples.
    #[error("{role} series is empty")]
    EmptySeries {
        /// Which input was empty.
        role: &'static str,
    },

    /// Returned when a reference month holds too few samples to build a
    /// histogram.
    #[error(
        "insufficient {side} reference data for month {month}: {count} samples (need {needed})"
    )]
    InsufficientReference {
        /// Calendar month (1..=12).
        month: u32,
        /// Which reference subset was short.
        side: &'static str,
        /// Samples available.
        count: usize,
        /// Samples required.
        needed: usize,
    },

    /// Returned when a reference month cannot form a monotone CDF
    /// (zero bin width or too few distinct table points).
    #[error("degenerate reference distribution for month {month}: {reason}")]
    DegenerateReference {
        /// Calendar month (1..=12).
        month: u32,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a value falls outside the interpolation domain and
    /// extrapolation is disabled.
    #[error("value {value} outside interpolation domain [{lo}, {hi}]")]
    OutOfDomain {
        /// The offending value.
        value: f64,
        /// Lower bound of the table domain.
        lo: f64,
        /// Upper bound of the table domain.
        hi: f64,
    },

    /// Returned when no calendar month present in the simulation could be
    /// fitted against the observed record.
    #[error("no month could be bias-corrected (skipped: {skipped_months:?})")]
    NoCorrectableMonths {
        /// Calendar months (1..=12) whose reference fit failed.
        skipped_months: Vec<u32>,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// A series-level invariant was violated while assembling output.
    #[error(transparent)]
    Series(#[from] caudal_series::SeriesError),
}
