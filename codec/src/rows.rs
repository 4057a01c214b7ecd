//! Best-effort mapping of JSON row arrays into records.
//!
//! Combat messages are a top-level array of rows. Each row is itself an
//! array whose first element is an object holding the record; anything after
//! it is ignored. A row that does not fit is skipped and reported, never
//! fatal to the rest of the message.

use records::{BattleReport, SummaryReport};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::combat;
use crate::error::{CodecError, CodecResult, JsonKind, RowSkip, SkipReason};

/// Records mapped from one message plus the rows that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRows<T> {
    pub records: Vec<T>,
    pub skipped: Vec<RowSkip>,
}

impl<T> MappedRows<T> {
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl<T> Default for MappedRows<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Summary reports from one message, split by the position of interest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryBatch {
    /// Every row that mapped.
    pub all: Vec<SummaryReport>,
    /// The rows located at the position of interest.
    pub matched: Vec<SummaryReport>,
    pub skipped: Vec<RowSkip>,
}

/// Parses an unwrapped payload into its top-level rows.
pub fn parse_rows(payload: &[u8]) -> CodecResult<Vec<Value>> {
    if payload.is_empty() {
        return Err(CodecError::EmptyPayload);
    }
    let value: Value = serde_json::from_slice(payload).map_err(|err| CodecError::Json {
        reason: err.to_string(),
    })?;
    match value {
        Value::Array(rows) => Ok(rows),
        other => Err(CodecError::NotAnArray {
            found: JsonKind::of(&other),
        }),
    }
}

/// Maps `[[{record}, ...], ...]` rows into `T`, skipping rows that do not fit.
pub fn map_object_rows<T: DeserializeOwned>(rows: Vec<Value>) -> MappedRows<T> {
    let mut mapped = MappedRows::default();
    for (index, row) in rows.into_iter().enumerate() {
        match object_row(row) {
            Ok(record) => mapped.records.push(record),
            Err(reason) => {
                tracing::warn!(row = index, %reason, "skipping row");
                mapped.skipped.push(RowSkip { index, reason });
            }
        }
    }
    mapped
}

fn object_row<T: DeserializeOwned>(row: Value) -> Result<T, SkipReason> {
    let found = JsonKind::of(&row);
    let Value::Array(items) = row else {
        return Err(SkipReason::NotAnArray { found });
    };
    let Some(first) = items.into_iter().next() else {
        return Err(SkipReason::EmptyRow);
    };
    if !first.is_object() {
        return Err(SkipReason::NotAnObject {
            found: JsonKind::of(&first),
        });
    }
    serde_json::from_value(first).map_err(|err| SkipReason::Mapping {
        reason: err.to_string(),
    })
}

/// Maps a summary report message and selects rows at `position`.
pub fn map_summary(payload: &[u8], position: &str) -> CodecResult<SummaryBatch> {
    let MappedRows { records, skipped } = map_object_rows::<SummaryReport>(parse_rows(payload)?);
    let matched = records
        .iter()
        .filter(|report| report.is_at(position))
        .cloned()
        .collect();
    Ok(SummaryBatch {
        all: records,
        matched,
        skipped,
    })
}

/// Maps a detailed battle message and derives each report's lineups.
pub fn map_battles(payload: &[u8]) -> CodecResult<MappedRows<BattleReport>> {
    let MappedRows { records, skipped } = map_object_rows::<BattleReport>(parse_rows(payload)?);
    Ok(MappedRows {
        records: records.into_iter().map(combat::enrich).collect(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_rows_rejects_empty_payload() {
        assert_eq!(parse_rows(b""), Err(CodecError::EmptyPayload));
    }

    #[test]
    fn parse_rows_rejects_invalid_json() {
        assert!(matches!(parse_rows(b"[[{"), Err(CodecError::Json { .. })));
    }

    #[test]
    fn parse_rows_rejects_non_array() {
        assert_eq!(
            parse_rows(br#"{"battle_id":1}"#),
            Err(CodecError::NotAnArray {
                found: JsonKind::Object
            })
        );
    }

    #[test]
    fn bad_row_does_not_affect_following_rows() {
        let rows = vec![json!("bad"), json!([{"battle_id": 7}])];
        let mapped = map_object_rows::<SummaryReport>(rows);
        assert_eq!(mapped.records.len(), 1);
        assert_eq!(mapped.records[0].battle_id, 7);
        assert_eq!(
            mapped.skipped,
            vec![RowSkip {
                index: 0,
                reason: SkipReason::NotAnArray {
                    found: JsonKind::String
                },
            }]
        );
    }

    #[test]
    fn skip_reasons_for_each_shape() {
        let rows = vec![
            json!([]),
            json!([[1, 2], {"battle_id": 1}]),
            json!([{"battle_id": "not a number"}]),
            json!([{"battle_id": 3}, "trailing", 4]),
        ];
        let mapped = map_object_rows::<SummaryReport>(rows);
        assert_eq!(mapped.records.len(), 1);
        assert_eq!(mapped.records[0].battle_id, 3);
        assert_eq!(mapped.skipped_count(), 3);
        assert_eq!(mapped.skipped[0].reason, SkipReason::EmptyRow);
        assert_eq!(
            mapped.skipped[1].reason,
            SkipReason::NotAnObject {
                found: JsonKind::Array
            }
        );
        assert!(matches!(
            mapped.skipped[2].reason,
            SkipReason::Mapping { .. }
        ));
        assert_eq!(mapped.skipped[2].index, 2);
    }

    #[test]
    fn summary_partitions_by_position() {
        let payload = br#"[
            [{"battle_id": 1, "wid": "500"}],
            [{"battle_id": 2, "wid": 500}],
            [{"battle_id": 3, "wid": 500.0}],
            [{"battle_id": 4, "wid": 501}]
        ]"#;
        let batch = map_summary(payload, "500").unwrap();
        assert_eq!(batch.all.len(), 4);
        let ids: Vec<i64> = batch.matched.iter().map(|r| r.battle_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn summary_with_no_matches_still_counts_all() {
        let payload = br#"[[{"battle_id": 1, "wid": 9}], 5]"#;
        let batch = map_summary(payload, "500").unwrap();
        assert_eq!(batch.all.len(), 1);
        assert!(batch.matched.is_empty());
        assert_eq!(batch.skipped.len(), 1);
    }

    #[test]
    fn battles_are_enriched() {
        let payload = br#"[[{
            "battle_id": 10,
            "wid": 123.0,
            "attack_advance": "1,2;3,4;5,6;7,8",
            "defend_advance": "1,2;3,4;5,6;7,8",
            "attack_all_hero_info": "100,10;200,20;300,30",
            "defend_all_hero_info": ""
        }, {"ignored": true}]]"#;
        let mapped = map_battles(payload).unwrap();
        assert_eq!(mapped.records.len(), 1);
        let report = &mapped.records[0];
        assert_eq!(report.wid, "123");
        assert_eq!(report.attack.total_star, 15);
        assert_eq!(report.attack.heroes[0].id, 100);
        assert_eq!(report.defend.total_star, 9);
        assert_eq!(report.defend.heroes[0].id, 0);
    }

    #[test]
    fn empty_array_maps_nothing() {
        let mapped = map_battles(b"[]").unwrap();
        assert!(mapped.records.is_empty());
        assert_eq!(mapped.skipped_count(), 0);
    }

    #[test]
    fn battle_with_null_fields_is_kept() {
        let payload = br#"[[{
            "battle_id": 1,
            "wid": 5,
            "attacker_gear_info": null,
            "defend_hp": null,
            "attack_advance": "0;3;4;5"
        }]]"#;
        let mapped = map_battles(payload).unwrap();
        assert!(mapped.skipped.is_empty());
        assert_eq!(mapped.records.len(), 1);
        let report = &mapped.records[0];
        assert_eq!(report.attacker_gear_info, "");
        assert_eq!(report.defend_hp, 0);
        assert_eq!(report.attack.total_star, 12);
    }

    #[test]
    fn summary_with_null_fields_is_kept() {
        let payload = br#"[[{"battle_id": 2, "wid": 500, "attack_name": null, "result": null}]]"#;
        let batch = map_summary(payload, "500").unwrap();
        assert!(batch.skipped.is_empty());
        assert_eq!(batch.all.len(), 1);
        assert_eq!(batch.matched.len(), 1);
        assert_eq!(batch.matched[0].attack_name, "");
        assert_eq!(batch.matched[0].result, 0);
    }

    #[test]
    fn mistyped_field_still_skips_the_row() {
        let payload = br#"[[{"battle_id": "abc"}], [{"battle_id": 3, "npc": null}]]"#;
        let batch = map_summary(payload, "").unwrap();
        assert_eq!(batch.all.len(), 1);
        assert_eq!(batch.all[0].battle_id, 3);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].index, 0);
    }
}
