//! Detailed 1v1 battle reports.

use serde::{Deserialize, Serialize};

use crate::null::null_as_default;
use crate::wid::deserialize_wid;

/// Number of hero slots per side.
pub const HERO_SLOTS: usize = 3;

/// Derived stats for one hero slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeroSlot {
    pub id: i64,
    pub level: i64,
    /// Advancement ("star") tier.
    pub star: i64,
}

/// Derived lineup for one side of a battle.
///
/// `heroes[0]` is hero 1. Everything here is recomputed from the raw
/// advancement and hero-info strings and is all zero when those are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideLineup {
    pub heroes: [HeroSlot; HERO_SLOTS],
    pub total_star: i64,
}

impl SideLineup {
    /// Returns hero `n` (1-based), matching the wire's hero numbering.
    #[must_use]
    pub fn hero(&self, n: usize) -> Option<&HeroSlot> {
        n.checked_sub(1).and_then(|idx| self.heroes.get(idx))
    }
}

/// One detailed battle record, keyed by `battle_id`.
///
/// The string fields are copied verbatim from the wire; `null` reads as the
/// field default. `attack` and `defend` are derived and never read from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleReport {
    #[serde(deserialize_with = "null_as_default")]
    pub battle_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_help_id: String,
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
    pub defend_clan_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_union_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_advance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_all_hero_info: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attacker_gear_info: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_advance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_all_hero_info: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defender_gear_info: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_hero_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_hero_type_advance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_hero_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_hero_type_advance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_hp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub defend_hp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub npc: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub all_skill_info: String,
    #[serde(deserialize_with = "null_as_default")]
    pub result: i64,
    /// Attacking team id.
    #[serde(deserialize_with = "null_as_default")]
    pub attack_idu: String,
    /// Defending team id.
    #[serde(deserialize_with = "null_as_default")]
    pub defend_idu: String,

    #[serde(skip_deserializing)]
    pub attack: SideLineup,
    #[serde(skip_deserializing)]
    pub defend: SideLineup,
}
