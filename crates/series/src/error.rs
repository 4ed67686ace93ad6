//! Error types for the caudal-series crate.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the caudal-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when two entries share the same timestamp.
    #[error("duplicate timestamp: {stamp}")]
    DuplicateStamp {
        /// The repeated timestamp.
        stamp: NaiveDateTime,
    },

    /// Returned when the timestamp and value slices differ in length.
    #[error("length mismatch: {stamps_len} timestamps but {values_len} values")]
    LengthMismatch {
        /// Length of the timestamp slice.
        stamps_len: usize,
        /// Length of the value slice.
        values_len: usize,
    },

    /// Returned when pre-built timestamps are not in ascending order.
    #[error("timestamps out of order at position {position}")]
    Unsorted {
        /// Index of the first offending entry.
        position: usize,
    },
}
