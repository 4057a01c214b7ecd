//! Store errors.

use std::fmt;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by [`crate::MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A write would grow a table past its configured cap.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Tables with a size cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Members,
    Reports,
    Battles,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => write!(f, "{kind} limit exceeded: {actual} > {limit}"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Members => "roster members",
            Self::Reports => "summary reports",
            Self::Battles => "battle reports",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for StoreError {}
