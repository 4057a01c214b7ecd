use chrono::NaiveDate;
use codec::{process_message, DecodeConfig, Outcome, RawMessage, COMBAT_REPORT_ID, ROSTER_SNAPSHOT_ID};
use store::{MemoryStore, StoreConfig};

fn record_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn roster_payload(ids: &[i64]) -> Vec<u8> {
    let rows: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!([id, format!("member{id}"), 0, id * 10, 0, "front"]))
        .collect();
    serde_json::to_vec(&rows).unwrap()
}

#[test]
fn successive_rosters_mark_stale_and_new_members() {
    let config = DecodeConfig::for_testing();
    let mut store = MemoryStore::new(StoreConfig::for_testing()).with_record_date(record_date());

    let first = roster_payload(&[1, 2, 3]);
    process_message(&RawMessage::new(ROSTER_SNAPSHOT_ID, &first), &config, &mut store).unwrap();

    let second = roster_payload(&[2, 3, 4]);
    let outcome =
        process_message(&RawMessage::new(ROSTER_SNAPSHOT_ID, &second), &config, &mut store)
            .unwrap();
    assert_eq!(
        outcome,
        Outcome::Roster {
            members: 3,
            skipped: 0
        }
    );

    let change = store.last_roster_change();
    assert_eq!(change.removed, vec![1]);
    assert_eq!(change.inserted, vec![4]);
    assert_eq!(change.updated, vec![2, 3]);
    assert!(store.member(1).is_none());
    assert_eq!(store.member(4).map(|m| m.name.as_str()), Some("member4"));
}

#[test]
fn roster_message_recomputes_group_history() {
    let config = DecodeConfig::for_testing();
    let mut store = MemoryStore::new(StoreConfig::for_testing()).with_record_date(record_date());

    let payload = roster_payload(&[0, 1, 2]);
    process_message(&RawMessage::new(ROSTER_SNAPSHOT_ID, &payload), &config, &mut store).unwrap();

    let rows: Vec<_> = store.history_on(record_date()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].group, "front");
    assert_eq!(rows[0].member_count, 3);
    assert_eq!(rows[0].total_wu, 30);
    assert_eq!(rows[0].average_wu, 10);
    assert_eq!(rows[0].zero_wu_count, 1);
}

#[test]
fn detailed_battles_land_enriched() {
    let config = DecodeConfig::for_testing().with_detailed_capture(true);
    let mut store = MemoryStore::new(StoreConfig::for_testing());
    let payload = br#"[[{
        "battle_id": 55,
        "wid": 3004.0,
        "attack_advance": "1,2;3,4;5,6;7,8",
        "defend_advance": "1,2;3,4;5,6;7,8",
        "attack_all_hero_info": "100,10;200,20;300,30",
        "defend_all_hero_info": "100,10;200,20;300,30"
    }]]"#;
    process_message(&RawMessage::new(COMBAT_REPORT_ID, payload), &config, &mut store).unwrap();

    let battle = store.battle(55).unwrap();
    assert_eq!(battle.wid, "3004");
    assert_eq!(battle.attack.heroes.map(|h| h.star), [3, 5, 7]);
    assert_eq!(battle.defend.heroes.map(|h| h.star), [5, 3, 1]);
    assert_eq!(battle.attack.heroes.map(|h| h.id), [100, 200, 300]);
    assert_eq!(battle.defend.heroes.map(|h| h.level), [10, 20, 30]);
}

#[test]
fn store_limits_surface_as_sink_errors() {
    let config = DecodeConfig::for_testing();
    let mut store = MemoryStore::new(StoreConfig {
        max_members: 2,
        ..StoreConfig::for_testing()
    });
    let payload = roster_payload(&[1, 2, 3]);
    let err = process_message(&RawMessage::new(ROSTER_SNAPSHOT_ID, &payload), &config, &mut store)
        .unwrap_err();
    assert!(matches!(err, codec::ProcessError::Sink(store::StoreError::LimitsExceeded { .. })));
    assert_eq!(store.roster().count(), 0);
}
