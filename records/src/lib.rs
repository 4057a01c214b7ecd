//! Record types produced by the stzb capture pipeline.
//!
//! This crate defines the shapes handed to the persistence layer:
//! - [`RosterEntry`] for alliance member snapshots
//! - [`SummaryReport`] for condensed alliance event rows
//! - [`BattleReport`] for detailed 1v1 combat records and their derived lineups
//! - [`WidRepr`], the tagged union covering the loosely typed `wid` field
//!
//! # Design Principles
//!
//! - **Normalise at the boundary** - Loosely typed wire values are resolved
//!   to one canonical form during deserialisation and never escape as JSON.
//! - **Plain data** - Records carry no behaviour beyond construction helpers.

mod battle;
mod null;
mod report;
mod roster;
mod wid;

pub use battle::{BattleReport, HeroSlot, SideLineup, HERO_SLOTS};
pub use null::null_as_default;
pub use report::SummaryReport;
pub use roster::{MemberId, RosterEntry};
pub use wid::{deserialize_wid, WidRepr};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = RosterEntry::default();
        let _ = SummaryReport::default();
        let _ = BattleReport::default();
        let _ = SideLineup::default();
        let _ = WidRepr::Integer(0);
        let _: MemberId = 0;
        assert_eq!(HERO_SLOTS, 3);
    }

    #[test]
    fn records_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RosterEntry>();
        assert_send_sync::<SummaryReport>();
        assert_send_sync::<BattleReport>();
    }
}
