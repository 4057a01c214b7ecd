//! Command identifiers and the raw message handed in by the transport.

/// Command id of the alliance roster snapshot.
pub const ROSTER_SNAPSHOT_ID: u32 = 103;

/// Command id of the combat/report feed.
pub const COMBAT_REPORT_ID: u32 = 92;

/// Commands this crate knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Command {
    RosterSnapshot = ROSTER_SNAPSHOT_ID,
    CombatReport = COMBAT_REPORT_ID,
}

impl Command {
    /// Parses a command id. Unknown ids are not an error; they are ignored.
    #[must_use]
    pub const fn parse(id: u32) -> Option<Self> {
        match id {
            ROSTER_SNAPSHOT_ID => Some(Self::RosterSnapshot),
            COMBAT_REPORT_ID => Some(Self::CombatReport),
            _ => None,
        }
    }

    #[must_use]
    pub const fn id(self) -> u32 {
        self as u32
    }
}

/// One captured message: a command id and its still-wrapped payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage<'a> {
    pub command_id: u32,
    pub payload: &'a [u8],
}

impl<'a> RawMessage<'a> {
    #[must_use]
    pub const fn new(command_id: u32, payload: &'a [u8]) -> Self {
        Self {
            command_id,
            payload,
        }
    }

    #[must_use]
    pub const fn command(&self) -> Option<Command> {
        Command::parse(self.command_id)
    }
}
