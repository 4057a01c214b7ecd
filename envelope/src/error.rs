//! Error types for envelope operations.

use std::fmt;

/// Result type for envelope operations.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Errors raised while unwrapping a payload envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EnvelopeError {
    /// The payload carried the zlib signature but did not inflate.
    Inflate { reason: String },

    /// Inflated output grew past the configured limit.
    LimitsExceeded { limit: usize, actual: usize },
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflate { reason } => write!(f, "zlib inflate failed: {reason}"),
            Self::LimitsExceeded { limit, actual } => {
                write!(f, "inflated payload limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl std::error::Error for EnvelopeError {}
