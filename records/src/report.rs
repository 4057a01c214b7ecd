//! Condensed alliance event reports.

use serde::{Deserialize, Serialize};

use crate::null::null_as_default;
use crate::wid::deserialize_wid;

/// One alliance-wide event row from the summary report feed.
///
/// Missing and `null` fields take their defaults; `wid` is stored in
/// canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryReport {
    #[serde(deserialize_with = "null_as_default")]
    pub battle_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub time: i64,
    #[serde(deserialize_with = "deserialize_wid")]
    pub wid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wid_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_union_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_clan_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_union_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_clan_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_hp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_hp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub npc: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub result: i64,
}

impl SummaryReport {
    /// Returns `true` if this report happened at the given location.
    #[must_use]
    pub fn is_at(&self, wid: &str) -> bool {
        self.wid == wid
    }
}
