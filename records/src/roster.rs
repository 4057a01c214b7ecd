//! Alliance member roster entries.

use serde::{Deserialize, Serialize};

/// Member identifier as assigned by the game server.
pub type MemberId = i64;

/// One alliance member as of the latest roster snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: MemberId,
    pub name: String,
    /// Lifetime contribution points.
    pub contribution: i64,
    /// Merit points ("wu") for the current period.
    pub wu: i64,
    pub power: i64,
    /// Alliance sub-group the member is assigned to; empty when ungrouped.
    pub group: String,
    pub position: String,
}

impl RosterEntry {
    /// Creates an entry with only the identifying fields set.
    #[must_use]
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>, wu: i64) -> Self {
        self.group = group.into();
        self.wu = wu;
        self
    }
}
