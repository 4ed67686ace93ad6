//! Error types for the caudal-stats crate.

/// Error type for all fallible operations in the caudal-stats crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Returned when a regression input cannot support a fit
    /// (too few finite pairs or a constant predictor).
    #[error("degenerate regression input: {reason}")]
    DegenerateInput {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_display() {
        let e = StatsError::DegenerateInput {
            reason: "constant predictor".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "degenerate regression input: constant predictor"
        );
    }
}
