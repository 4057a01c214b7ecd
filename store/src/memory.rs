//! The in-memory store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Local, NaiveDate};
use codec::RecordSink;
use records::{BattleReport, MemberId, RosterEntry, SummaryReport};

use crate::error::{LimitKind, StoreError, StoreResult};
use crate::history::{group_stats, GroupWuHistory};

/// Size caps for the in-memory tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub max_members: usize,
    pub max_reports: usize,
    pub max_battles: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            // Alliances cap out well below this
            max_members: 4096,
            max_reports: 1_000_000,
            max_battles: 1_000_000,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_members: 16,
            max_reports: 16,
            max_battles: 16,
        }
    }

    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_members: usize::MAX,
            max_reports: usize::MAX,
            max_battles: usize::MAX,
        }
    }
}

/// What a roster replacement did to the stored members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterChange {
    pub inserted: Vec<MemberId>,
    pub updated: Vec<MemberId>,
    pub removed: Vec<MemberId>,
}

/// Record tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: StoreConfig,
    roster: BTreeMap<MemberId, RosterEntry>,
    reports: BTreeMap<i64, SummaryReport>,
    battles: BTreeMap<i64, BattleReport>,
    history: BTreeMap<(NaiveDate, String), GroupWuHistory>,
    record_date: Option<NaiveDate>,
    last_change: RosterChange,
}

impl MemoryStore {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Pins the date history rows are recorded under. Defaults to today.
    #[must_use]
    pub fn with_record_date(mut self, date: NaiveDate) -> Self {
        self.record_date = Some(date);
        self
    }

    pub fn set_record_date(&mut self, date: NaiveDate) {
        self.record_date = Some(date);
    }

    /// Stored members ordered by id.
    pub fn roster(&self) -> impl Iterator<Item = &RosterEntry> {
        self.roster.values()
    }

    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&RosterEntry> {
        self.roster.get(&id)
    }

    #[must_use]
    pub fn member_ids(&self) -> BTreeSet<MemberId> {
        self.roster.keys().copied().collect()
    }

    pub fn reports(&self) -> impl Iterator<Item = &SummaryReport> {
        self.reports.values()
    }

    #[must_use]
    pub fn battle(&self, battle_id: i64) -> Option<&BattleReport> {
        self.battles.get(&battle_id)
    }

    pub fn battles(&self) -> impl Iterator<Item = &BattleReport> {
        self.battles.values()
    }

    /// History rows ordered by date, then group.
    pub fn history(&self) -> impl Iterator<Item = &GroupWuHistory> {
        self.history.values()
    }

    /// History rows recorded on `date`.
    pub fn history_on(&self, date: NaiveDate) -> impl Iterator<Item = &GroupWuHistory> {
        self.history
            .iter()
            .filter(move |((day, _), _)| *day == date)
            .map(|(_, row)| row)
    }

    /// The effect of the most recent roster replacement.
    #[must_use]
    pub fn last_roster_change(&self) -> &RosterChange {
        &self.last_change
    }

    /// Upserts `entries` and removes every member not in `keep_ids`.
    pub fn apply_roster(
        &mut self,
        entries: &[RosterEntry],
        keep_ids: &BTreeSet<MemberId>,
    ) -> StoreResult<RosterChange> {
        let incoming: BTreeSet<MemberId> = entries.iter().map(|entry| entry.id).collect();
        let surviving = self
            .roster
            .keys()
            .filter(|id| keep_ids.contains(id) && !incoming.contains(id))
            .count();
        let resulting = surviving + incoming.len();
        if resulting > self.config.max_members {
            return Err(StoreError::LimitsExceeded {
                kind: LimitKind::Members,
                limit: self.config.max_members,
                actual: resulting,
            });
        }

        let mut change = RosterChange::default();
        for entry in entries {
            if self.roster.insert(entry.id, entry.clone()).is_some() {
                change.updated.push(entry.id);
            } else {
                change.inserted.push(entry.id);
            }
        }
        // Duplicate ids within one snapshot count once.
        change.updated.retain(|id| !change.inserted.contains(id));
        change.updated.sort_unstable();
        change.updated.dedup();

        self.roster.retain(|id, _| {
            let keep = keep_ids.contains(id);
            if !keep {
                change.removed.push(*id);
            }
            keep
        });
        Ok(change)
    }

    /// Recomputes the history rows for `date` from the current roster.
    ///
    /// Rows for groups present today are created or overwritten; rows for
    /// other days are left alone.
    pub fn recompute_history(&mut self, date: NaiveDate) {
        for stats in group_stats(self.roster.values()) {
            let key = (date, stats.group.clone());
            self.history
                .insert(key, GroupWuHistory::from_stats(stats, date));
        }
    }

    fn record_date(&self) -> NaiveDate {
        self.record_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn check_capacity<K: Ord, V>(
        table: &BTreeMap<K, V>,
        incoming: impl Iterator<Item = K>,
        kind: LimitKind,
        limit: usize,
    ) -> StoreResult<()> {
        let fresh: BTreeSet<K> = incoming.filter(|key| !table.contains_key(key)).collect();
        let actual = table.len() + fresh.len();
        if actual > limit {
            return Err(StoreError::LimitsExceeded {
                kind,
                limit,
                actual,
            });
        }
        Ok(())
    }
}

impl RecordSink for MemoryStore {
    type Error = StoreError;

    fn replace_roster(
        &mut self,
        entries: &[RosterEntry],
        keep_ids: &BTreeSet<MemberId>,
    ) -> Result<(), Self::Error> {
        let change = self.apply_roster(entries, keep_ids)?;
        tracing::info!(
            inserted = change.inserted.len(),
            updated = change.updated.len(),
            removed = change.removed.len(),
            "roster replaced"
        );
        let date = self.record_date();
        self.recompute_history(date);
        tracing::info!(%date, "group history recomputed");
        self.last_change = change;
        Ok(())
    }

    fn save_reports(&mut self, reports: &[SummaryReport]) -> Result<(), Self::Error> {
        Self::check_capacity(
            &self.reports,
            reports.iter().map(|report| report.battle_id),
            LimitKind::Reports,
            self.config.max_reports,
        )?;
        for report in reports {
            self.reports.insert(report.battle_id, report.clone());
        }
        tracing::info!(saved = reports.len(), "summary reports saved");
        Ok(())
    }

    fn save_battles(&mut self, battles: &[BattleReport]) -> Result<(), Self::Error> {
        Self::check_capacity(
            &self.battles,
            battles.iter().map(|battle| battle.battle_id),
            LimitKind::Battles,
            self.config.max_battles,
        )?;
        for battle in battles {
            self.battles.insert(battle.battle_id, battle.clone());
        }
        tracing::info!(saved = battles.len(), "battle reports saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn member(id: i64, group: &str, wu: i64) -> RosterEntry {
        RosterEntry::new(id, format!("m{id}")).with_group(group, wu)
    }

    fn ids(entries: &[RosterEntry]) -> BTreeSet<MemberId> {
        entries.iter().map(|entry| entry.id).collect()
    }

    #[test]
    fn roster_replacement_reports_changes() {
        let mut store = MemoryStore::new(StoreConfig::for_testing());
        let first = vec![member(1, "a", 1), member(2, "a", 2), member(3, "b", 3)];
        let change = store.apply_roster(&first, &ids(&first)).unwrap();
        assert_eq!(change.inserted, vec![1, 2, 3]);
        assert!(change.removed.is_empty());

        let second = vec![member(2, "a", 5), member(3, "b", 3), member(4, "b", 0)];
        let change = store.apply_roster(&second, &ids(&second)).unwrap();
        assert_eq!(change.inserted, vec![4]);
        assert_eq!(change.updated, vec![2, 3]);
        assert_eq!(change.removed, vec![1]);
        assert_eq!(store.member_ids(), BTreeSet::from([2, 3, 4]));
        assert_eq!(store.member(2).map(|m| m.wu), Some(5));
    }

    #[test]
    fn duplicate_ids_in_snapshot_last_wins() {
        let mut store = MemoryStore::new(StoreConfig::for_testing());
        let entries = vec![member(1, "a", 1), member(1, "a", 9)];
        let change = store.apply_roster(&entries, &ids(&entries)).unwrap();
        assert_eq!(change.inserted, vec![1]);
        assert!(change.updated.is_empty());
        assert_eq!(store.member(1).map(|m| m.wu), Some(9));
    }

    #[test]
    fn roster_limit_is_checked_before_writing() {
        let config = StoreConfig {
            max_members: 2,
            ..StoreConfig::for_testing()
        };
        let mut store = MemoryStore::new(config);
        let entries = vec![member(1, "a", 0), member(2, "a", 0), member(3, "a", 0)];
        let err = store.apply_roster(&entries, &ids(&entries)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::LimitsExceeded {
                kind: LimitKind::Members,
                actual: 3,
                ..
            }
        ));
        assert_eq!(store.roster().count(), 0);
    }

    #[test]
    fn history_is_recomputed_per_day() {
        let mut store = MemoryStore::new(StoreConfig::for_testing()).with_record_date(date(1));
        let first = vec![member(1, "a", 10), member(2, "a", 0)];
        store.replace_roster(&first, &ids(&first)).unwrap();
        let second = vec![member(1, "a", 20), member(2, "a", 4)];
        store.replace_roster(&second, &ids(&second)).unwrap();

        let today: Vec<_> = store.history_on(date(1)).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].total_wu, 24);
        assert_eq!(today[0].average_wu, 12);
        assert_eq!(today[0].zero_wu_count, 0);

        store.set_record_date(date(2));
        store.replace_roster(&first, &ids(&first)).unwrap();
        assert_eq!(store.history().count(), 2);
        assert_eq!(store.history_on(date(2)).next().map(|h| h.total_wu), Some(10));
    }

    #[test]
    fn battles_upsert_by_id() {
        let mut store = MemoryStore::new(StoreConfig::for_testing());
        let mut battle = BattleReport {
            battle_id: 7,
            ..BattleReport::default()
        };
        store.save_battles(&[battle.clone()]).unwrap();
        battle.result = 2;
        store.save_battles(&[battle]).unwrap();
        assert_eq!(store.battles().count(), 1);
        assert_eq!(store.battle(7).map(|b| b.result), Some(2));
    }

    #[test]
    fn report_limit_counts_only_new_ids() {
        let config = StoreConfig {
            max_reports: 1,
            ..StoreConfig::for_testing()
        };
        let mut store = MemoryStore::new(config);
        let report = SummaryReport {
            battle_id: 1,
            ..SummaryReport::default()
        };
        store.save_reports(&[report.clone()]).unwrap();
        store.save_reports(&[report]).unwrap();
        let other = SummaryReport {
            battle_id: 2,
            ..SummaryReport::default()
        };
        assert!(store.save_reports(&[other]).is_err());
        assert_eq!(store.reports().count(), 1);
    }
}
