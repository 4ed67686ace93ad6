use thiserror::Error;

/// Errors from building a goodness-of-fit table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// One or more requested codes name no known metric. The whole call
    /// fails; no partial table is returned.
    #[error("unsupported metric code(s): {}", codes.join(", "))]
    UnsupportedMetric { codes: Vec<String> },

    /// The merged series holds no row where both columns are finite.
    #[error("no finite (simulated, observed) pairs to evaluate")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = MetricsError::UnsupportedMetric {
            codes: vec!["FOO".into(), "BAR".into()],
        };
        assert_eq!(err.to_string(), "unsupported metric code(s): FOO, BAR");
        assert_eq!(
            MetricsError::EmptyInput.to_string(),
            "no finite (simulated, observed) pairs to evaluate"
        );
    }
}
