//! Combat field decoding for detailed battle reports.
//!
//! Advancement and hero-info fields are small delimited languages: `;`
//! separates slots and `,` separates the values inside a slot. Empty values
//! are dropped and a slot left with no values is removed, so later slots
//! shift down. Existing captures depend on that shift.
//!
//! The attacker and defender advancement layouts differ. The attacker
//! string carries a non-hero slot first and heroes 1..3 after it. The
//! defender string lists heroes 3..1 first and carries the non-hero slot
//! fourth. Each side has its own function below so the two layouts cannot
//! drift into one another.

use records::{BattleReport, HeroSlot, SideLineup, HERO_SLOTS};

/// Attacker advancement slot that does not describe a hero.
const ATTACKER_SKIP_SLOT: usize = 0;

/// Defender advancement slot that does not describe a hero.
const DEFENDER_SKIP_SLOT: usize = 3;

/// Star tiers extracted from one advancement string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advancement {
    /// `stars[0]` is hero 1.
    pub stars: [i64; HERO_SLOTS],
    /// Sum over every non-skipped slot, including slots past hero 3.
    pub total: i64,
}

/// Hero id and level extracted from one hero-info string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeroIdentity {
    pub id: i64,
    pub level: i64,
}

/// Splits a delimited field into slots of non-empty values.
#[must_use]
pub fn split_slots(raw: &str) -> Vec<Vec<&str>> {
    raw.split(';')
        .filter_map(|slot| {
            let values: Vec<&str> = slot.split(',').filter(|value| !value.is_empty()).collect();
            (!values.is_empty()).then_some(values)
        })
        .collect()
}

fn leading_star(slot: &[&str]) -> Option<i64> {
    slot.first().and_then(|value| value.parse().ok())
}

/// Parses the attacker advancement string.
///
/// Slot 0 is skipped; slots 1, 2 and 3 are heroes 1, 2 and 3.
#[must_use]
pub fn attacker_advancement(raw: &str) -> Advancement {
    let mut advancement = Advancement::default();
    for (idx, slot) in split_slots(raw).iter().enumerate() {
        if idx == ATTACKER_SKIP_SLOT {
            continue;
        }
        let Some(star) = leading_star(slot) else {
            continue;
        };
        if let Some(hero) = advancement.stars.get_mut(idx - 1) {
            *hero = star;
        }
        advancement.total = advancement.total.saturating_add(star);
    }
    advancement
}

/// Parses the defender advancement string.
///
/// Slot 3 is skipped; slots 0, 1 and 2 are heroes 3, 2 and 1.
#[must_use]
pub fn defender_advancement(raw: &str) -> Advancement {
    let mut advancement = Advancement::default();
    for (idx, slot) in split_slots(raw).iter().enumerate() {
        if idx == DEFENDER_SKIP_SLOT {
            continue;
        }
        let Some(star) = leading_star(slot) else {
            continue;
        };
        if let Some(hero) = HERO_SLOTS.checked_sub(idx + 1) {
            advancement.stars[hero] = star;
        }
        advancement.total = advancement.total.saturating_add(star);
    }
    advancement
}

/// Parses a hero-info string into heroes 1..3, in natural order for both sides.
///
/// Slots need an id and a level; shorter slots and slots past hero 3 are
/// ignored. Values that do not parse become zero.
#[must_use]
pub fn hero_roster(raw: &str) -> [HeroIdentity; HERO_SLOTS] {
    let mut heroes = [HeroIdentity::default(); HERO_SLOTS];
    for (hero, slot) in heroes.iter_mut().zip(split_slots(raw)) {
        if let [id, level, ..] = slot.as_slice() {
            *hero = HeroIdentity {
                id: id.parse().unwrap_or(0),
                level: level.parse().unwrap_or(0),
            };
        }
    }
    heroes
}

fn lineup(advancement: Advancement, roster: [HeroIdentity; HERO_SLOTS]) -> SideLineup {
    let mut heroes = [HeroSlot::default(); HERO_SLOTS];
    for ((slot, identity), star) in heroes.iter_mut().zip(roster).zip(advancement.stars) {
        *slot = HeroSlot {
            id: identity.id,
            level: identity.level,
            star,
        };
    }
    SideLineup {
        heroes,
        total_star: advancement.total,
    }
}

/// Recomputes both derived lineups from the report's raw fields.
#[must_use]
pub fn enrich(mut report: BattleReport) -> BattleReport {
    report.attack = lineup(
        attacker_advancement(&report.attack_advance),
        hero_roster(&report.attack_all_hero_info),
    );
    report.defend = lineup(
        defender_advancement(&report.defend_advance),
        hero_roster(&report.defend_all_hero_info),
    );
    report
}
