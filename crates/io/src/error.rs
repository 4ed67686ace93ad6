//! Error types for caudal-io.

use thiserror::Error;

/// Error type for all fallible operations in the caudal-io crate.
#[derive(Debug, Error)]
pub enum IoError {
    /// The source held no usable rows for this station.
    #[error("no data available")]
    NoData,

    /// Wraps a failure from the CSV layer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// A cell or payload field could not be interpreted.
    #[error("parse error: {reason}")]
    Parse {
        /// Description of the value and why it failed.
        reason: String,
    },

    /// A required column is absent from the header row.
    #[error("column '{name}' not found in header")]
    MissingColumn {
        /// Name of the missing column.
        name: String,
    },

    /// A constructed series violated a series invariant.
    #[error(transparent)]
    Series(#[from] caudal_series::SeriesError),

    /// Wraps a filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Parse {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_no_data() {
        assert_eq!(IoError::NoData.to_string(), "no data available");
    }

    #[test]
    fn display_csv() {
        let err = IoError::Csv {
            reason: "ragged row".to_string(),
        };
        assert_eq!(err.to_string(), "csv error: ragged row");
    }

    #[test]
    fn display_missing_column() {
        let err = IoError::MissingColumn {
            name: "mean (m^3/s)".to_string(),
        };
        assert_eq!(err.to_string(), "column 'mean (m^3/s)' not found in header");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
