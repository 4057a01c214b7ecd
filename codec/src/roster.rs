//! Roster snapshot mapping.
//!
//! Roster rows are positional arrays rather than objects:
//! `[id, name, contribution, wu, power, group, position, ...]`.
//! Only the id is required; other columns are read leniently.

use std::collections::BTreeSet;

use records::{MemberId, RosterEntry, WidRepr};
use serde_json::Value;

use crate::error::{CodecResult, JsonKind, RowSkip, SkipReason};
use crate::rows::parse_rows;

mod column {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const CONTRIBUTION: usize = 2;
    pub const WU: usize = 3;
    pub const POWER: usize = 4;
    pub const GROUP: usize = 5;
    pub const POSITION: usize = 6;
}

/// One decoded roster snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterSnapshot {
    pub entries: Vec<RosterEntry>,
    /// Every member id present in this snapshot. Stored members outside
    /// this set are stale.
    pub keep_ids: BTreeSet<MemberId>,
    pub skipped: Vec<RowSkip>,
}

impl RosterSnapshot {
    /// Returns the stored ids that this snapshot no longer contains.
    pub fn stale_ids<I>(&self, stored: I) -> Vec<MemberId>
    where
        I: IntoIterator<Item = MemberId>,
    {
        stored
            .into_iter()
            .filter(|id| !self.keep_ids.contains(id))
            .collect()
    }

    /// Returns the ids in this snapshot that are not yet stored.
    #[must_use]
    pub fn new_ids(&self, stored: &BTreeSet<MemberId>) -> Vec<MemberId> {
        self.keep_ids.difference(stored).copied().collect()
    }
}

/// Maps a roster payload into entries and the set of ids to keep.
pub fn map_roster(payload: &[u8]) -> CodecResult<RosterSnapshot> {
    let mut snapshot = RosterSnapshot::default();
    for (index, row) in parse_rows(payload)?.into_iter().enumerate() {
        match roster_row(&row) {
            Ok(entry) => {
                snapshot.keep_ids.insert(entry.id);
                snapshot.entries.push(entry);
            }
            Err(reason) => {
                tracing::warn!(row = index, %reason, "skipping roster row");
                snapshot.skipped.push(RowSkip { index, reason });
            }
        }
    }
    Ok(snapshot)
}

fn roster_row(row: &Value) -> Result<RosterEntry, SkipReason> {
    let Value::Array(items) = row else {
        return Err(SkipReason::NotAnArray {
            found: JsonKind::of(row),
        });
    };
    let Some(first) = items.first() else {
        return Err(SkipReason::EmptyRow);
    };
    let id = member_id(first).ok_or(SkipReason::InvalidMemberId {
        found: JsonKind::of(first),
    })?;
    Ok(RosterEntry {
        id,
        name: text_at(items, column::NAME),
        contribution: int_at(items, column::CONTRIBUTION),
        wu: int_at(items, column::WU),
        power: int_at(items, column::POWER),
        group: text_at(items, column::GROUP),
        position: items
            .get(column::POSITION)
            .map(|value| WidRepr::from_value(value.clone()).canonical())
            .unwrap_or_default(),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn member_id(value: &Value) -> Option<MemberId> {
    let Value::Number(number) = value else {
        return None;
    };
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|float| float.trunc() as i64))
}

#[allow(clippy::cast_possible_truncation)]
fn int_at(items: &[Value], idx: usize) -> i64 {
    match items.get(idx) {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(text)) => text.parse().unwrap_or(0),
        _ => 0,
    }
}

fn text_at(items: &[Value], idx: usize) -> String {
    match items.get(idx) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_positional_rows() {
        let payload = br#"[
            [1, "alpha", 5400, 1200, 88000, "vanguard", 120045],
            [2.0, "bravo", 10, 0, 500, "", "9"]
        ]"#;
        let snapshot = map_roster(payload).unwrap();
        assert_eq!(snapshot.entries.len(), 2);
        let alpha = &snapshot.entries[0];
        assert_eq!(alpha.id, 1);
        assert_eq!(alpha.name, "alpha");
        assert_eq!(alpha.contribution, 5400);
        assert_eq!(alpha.wu, 1200);
        assert_eq!(alpha.power, 88000);
        assert_eq!(alpha.group, "vanguard");
        assert_eq!(alpha.position, "120045");
        assert_eq!(snapshot.entries[1].id, 2);
        assert_eq!(snapshot.keep_ids, BTreeSet::from([1, 2]));
    }

    #[test]
    fn short_rows_default_missing_columns() {
        let snapshot = map_roster(b"[[42]]").unwrap();
        assert_eq!(snapshot.entries, vec![RosterEntry::new(42, "")]);
    }

    #[test]
    fn invalid_rows_are_skipped() {
        let payload = br#"[
            {"id": 1},
            [],
            ["3", "named"],
            [4, "kept"]
        ]"#;
        let snapshot = map_roster(payload).unwrap();
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].name, "kept");
        assert_eq!(snapshot.keep_ids, BTreeSet::from([4]));
        let reasons: Vec<&SkipReason> = snapshot.skipped.iter().map(|s| &s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                &SkipReason::NotAnArray {
                    found: JsonKind::Object
                },
                &SkipReason::EmptyRow,
                &SkipReason::InvalidMemberId {
                    found: JsonKind::String
                },
            ]
        );
    }

    #[test]
    fn mistyped_columns_are_lenient() {
        let payload = br#"[[5, null, "77", true, 1.9, 3]]"#;
        let entry = &map_roster(payload).unwrap().entries[0];
        assert_eq!(entry.name, "");
        assert_eq!(entry.contribution, 77);
        assert_eq!(entry.wu, 0);
        assert_eq!(entry.power, 1);
        assert_eq!(entry.group, "3");
    }

    #[test]
    fn stale_and_new_ids() {
        let first = map_roster(b"[[1],[2],[3]]").unwrap();
        let second = map_roster(b"[[2],[3],[4]]").unwrap();
        assert_eq!(second.stale_ids(first.keep_ids.iter().copied()), vec![1]);
        assert_eq!(second.new_ids(&first.keep_ids), vec![4]);
    }
}
