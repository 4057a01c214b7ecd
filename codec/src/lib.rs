//! Message decoding for stzb capture.
//!
//! This is the main pipeline crate. It ties the `envelope` unwrapper to the
//! `records` types: a raw `(command id, payload)` pair is unwrapped, routed
//! by command, mapped from loosely typed JSON rows into records, and for
//! detailed battles refined by the combat field decoder.
//!
//! # Features
//!
//! - Command dispatch with detailed-capture and report-capture switches
//! - Best-effort row mapping that skips malformed rows and reports them
//! - Roster snapshot decoding with the id set needed for stale-row cleanup
//! - Position filtering for summary reports
//! - Advancement and hero-info decoding for both battle sides
//!
//! # Design Principles
//!
//! - **Skip, don't fail** - A bad row never costs the rest of the message.
//! - **Stateless** - Every call takes its configuration by reference.
//! - **Deterministic** - Derived battle fields depend only on raw fields.

mod combat;
mod command;
mod config;
mod dispatch;
mod error;
mod roster;
mod rows;
mod sink;

pub use combat::{
    attacker_advancement, defender_advancement, enrich, hero_roster, split_slots, Advancement,
    HeroIdentity,
};
pub use command::{Command, RawMessage, COMBAT_REPORT_ID, ROSTER_SNAPSHOT_ID};
pub use config::DecodeConfig;
pub use dispatch::{decode_message, process_message, Decoded, Outcome};
pub use error::{CodecError, CodecResult, JsonKind, RowSkip, SkipReason};
pub use roster::{map_roster, RosterSnapshot};
pub use rows::{map_battles, map_object_rows, map_summary, parse_rows, MappedRows, SummaryBatch};
pub use sink::{ProcessError, RecordSink};
