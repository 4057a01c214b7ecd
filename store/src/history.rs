//! Per-group merit ("wu") statistics derived from the roster.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use records::RosterEntry;
use serde::{Deserialize, Serialize};

/// Current statistics for one roster group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupStats {
    pub group: String,
    pub member_count: usize,
    pub total_wu: i64,
    /// Mean wu rounded half away from zero.
    pub average_wu: i64,
    pub zero_wu_count: usize,
}

/// One history row: a group's statistics on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupWuHistory {
    pub group: String,
    pub member_count: usize,
    pub total_wu: i64,
    pub average_wu: i64,
    pub zero_wu_count: usize,
    pub record_date: NaiveDate,
}

impl GroupWuHistory {
    #[must_use]
    pub fn from_stats(stats: GroupStats, record_date: NaiveDate) -> Self {
        Self {
            group: stats.group,
            member_count: stats.member_count,
            total_wu: stats.total_wu,
            average_wu: stats.average_wu,
            zero_wu_count: stats.zero_wu_count,
            record_date,
        }
    }
}

/// Aggregates roster entries by group, ordered by group name.
///
/// Ungrouped members (empty group) form their own group.
pub fn group_stats<'a, I>(entries: I) -> Vec<GroupStats>
where
    I: IntoIterator<Item = &'a RosterEntry>,
{
    let mut groups: BTreeMap<&str, GroupStats> = BTreeMap::new();
    for entry in entries {
        let stats = groups
            .entry(entry.group.as_str())
            .or_insert_with(|| GroupStats {
                group: entry.group.clone(),
                ..GroupStats::default()
            });
        stats.member_count += 1;
        stats.total_wu = stats.total_wu.saturating_add(entry.wu);
        if entry.wu == 0 {
            stats.zero_wu_count += 1;
        }
    }
    groups
        .into_values()
        .map(|mut stats| {
            stats.average_wu = rounded_mean(stats.total_wu, stats.member_count);
            stats
        })
        .collect()
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn rounded_mean(total: i64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    (total as f64 / count as f64).round() as i64
}
