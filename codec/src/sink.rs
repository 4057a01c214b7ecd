//! The persistence boundary.

use std::collections::BTreeSet;
use std::fmt;

use records::{BattleReport, MemberId, RosterEntry, SummaryReport};

use crate::error::CodecError;

/// Receives fully decoded records. Implemented by the storage layer.
///
/// Each method is called at most once per message with the whole batch.
pub trait RecordSink {
    type Error;

    /// Replaces the stored roster.
    ///
    /// Implementations upsert `entries`, delete every stored member whose id
    /// is not in `keep_ids`, then recompute the per-group history.
    fn replace_roster(
        &mut self,
        entries: &[RosterEntry],
        keep_ids: &BTreeSet<MemberId>,
    ) -> Result<(), Self::Error>;

    /// Saves summary reports at the position of interest.
    fn save_reports(&mut self, reports: &[SummaryReport]) -> Result<(), Self::Error>;

    /// Upserts enriched battle reports by `battle_id`.
    fn save_battles(&mut self, battles: &[BattleReport]) -> Result<(), Self::Error>;
}

/// Failure while processing one message end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError<E> {
    /// The message could not be decoded.
    Decode(CodecError),
    /// The sink rejected the decoded records.
    Sink(E),
}

impl<E: fmt::Display> fmt::Display for ProcessError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "decode failed: {err}"),
            Self::Sink(err) => write!(f, "sink failed: {err}"),
        }
    }
}

impl<E> std::error::Error for ProcessError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Sink(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Full;

    impl fmt::Display for Full {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "disk full")
        }
    }

    impl std::error::Error for Full {}

    #[test]
    fn sink_error_display_and_source() {
        use std::error::Error;
        let err: ProcessError<Full> = ProcessError::Sink(Full);
        assert_eq!(err.to_string(), "sink failed: disk full");
        assert!(err.source().is_some());
    }

    #[test]
    fn decode_error_display() {
        let err: ProcessError<Full> = ProcessError::Decode(CodecError::EmptyPayload);
        assert_eq!(err.to_string(), "decode failed: empty payload");
    }
}
