use thiserror::Error;

/// Errors from volume integration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolumeError {
    #[error("need at least 3 samples to integrate, got {len}")]
    TooShort { len: usize },
}
