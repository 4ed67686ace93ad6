use thiserror::Error;

/// Errors from the climatology aggregations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClimatologyError {
    #[error("cannot aggregate an empty merged series")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ClimatologyError::EmptyInput.to_string(),
            "cannot aggregate an empty merged series"
        );
    }
}
