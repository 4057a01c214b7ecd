//! Inspection and replay tools for stzb capture payloads.
//!
//! This crate provides utilities for looking at captured traffic:
//!
//! - Decode one payload and render its records as JSON or text
//! - Replay a directory of captures into an in-memory store
//! - Show unwrapped and type-5 diagnostic payloads as text
//!
//! # Design Principles
//!
//! - **Same pipeline** - Tools call the `codec` entry points, never a copy.
//! - **Human-readable output** - Make it easy to see what was decoded and skipped.

use std::fmt::Write as _;
use std::path::Path;

use codec::{Decoded, RowSkip};
use serde_json::{json, Value};
use store::MemoryStore;

/// Extracts the command id from a capture file named `<command>_<anything>`.
#[must_use]
pub fn capture_command_id(path: &Path) -> Option<u32> {
    let name = path.file_stem()?.to_str()?;
    let (command, _) = name.split_once('_')?;
    command.parse().ok()
}

fn skipped_json(skipped: &[RowSkip]) -> Value {
    skipped
        .iter()
        .map(|skip| json!({ "row": skip.index, "reason": skip.reason.to_string() }))
        .collect()
}

/// Renders decoded records as JSON.
pub fn decoded_to_json(decoded: &Decoded) -> serde_json::Result<Value> {
    let value = match decoded {
        Decoded::Roster(snapshot) => json!({
            "kind": "roster",
            "entries": serde_json::to_value(&snapshot.entries)?,
            "keep_ids": snapshot.keep_ids,
            "skipped": skipped_json(&snapshot.skipped),
        }),
        Decoded::Summary(batch) => json!({
            "kind": "summary",
            "parsed": batch.all.len(),
            "matched": serde_json::to_value(&batch.matched)?,
            "skipped": skipped_json(&batch.skipped),
        }),
        Decoded::Battles(battles) => json!({
            "kind": "battles",
            "battles": serde_json::to_value(&battles.records)?,
            "skipped": skipped_json(&battles.skipped),
        }),
        Decoded::ReportCaptureDisabled => json!({ "kind": "report_capture_disabled" }),
        Decoded::Ignored { command_id } => json!({ "kind": "ignored", "command": command_id }),
    };
    Ok(value)
}

/// Renders decoded records as plain text.
#[must_use]
pub fn format_decoded_pretty(decoded: &Decoded) -> String {
    let mut out = String::new();
    match decoded {
        Decoded::Roster(snapshot) => {
            let _ = writeln!(out, "roster: {} members", snapshot.entries.len());
            for entry in &snapshot.entries {
                let _ = writeln!(
                    out,
                    "  {:>10} {:<16} group={:<10} wu={}",
                    entry.id, entry.name, entry.group, entry.wu
                );
            }
            write_skipped(&mut out, &snapshot.skipped);
        }
        Decoded::Summary(batch) => {
            let _ = writeln!(
                out,
                "summary reports: {} parsed, {} at position",
                batch.all.len(),
                batch.matched.len()
            );
            for report in &batch.matched {
                let _ = writeln!(
                    out,
                    "  {} wid={} {} -> {} result={}",
                    report.battle_id,
                    report.wid,
                    report.attack_name,
                    report.defend_name,
                    report.result
                );
            }
            write_skipped(&mut out, &batch.skipped);
        }
        Decoded::Battles(battles) => {
            let _ = writeln!(out, "battle reports: {}", battles.records.len());
            for battle in &battles.records {
                let _ = writeln!(
                    out,
                    "  {} wid={} {} vs {} result={}",
                    battle.battle_id,
                    battle.wid,
                    battle.attack_name,
                    battle.defend_name,
                    battle.result
                );
                for (label, side) in [("attack", &battle.attack), ("defend", &battle.defend)] {
                    let heroes: Vec<String> = side
                        .heroes
                        .iter()
                        .map(|hero| format!("{}@{}*{}", hero.id, hero.level, hero.star))
                        .collect();
                    let _ = writeln!(
                        out,
                        "    {label}: {} (stars {})",
                        heroes.join(" "),
                        side.total_star
                    );
                }
            }
            write_skipped(&mut out, &battles.skipped);
        }
        Decoded::ReportCaptureDisabled => {
            let _ = writeln!(out, "report capture disabled; nothing decoded");
        }
        Decoded::Ignored { command_id } => {
            let _ = writeln!(out, "command {command_id} is not decoded");
        }
    }
    out
}

fn write_skipped(out: &mut String, skipped: &[RowSkip]) {
    if skipped.is_empty() {
        return;
    }
    let _ = writeln!(out, "skipped rows:");
    for skip in skipped {
        let _ = writeln!(out, "  {skip}");
    }
}

/// Summarises the contents of a store after a replay.
#[must_use]
pub fn format_store_summary(store: &MemoryStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "members: {}", store.roster().count());
    let _ = writeln!(out, "summary reports: {}", store.reports().count());
    let _ = writeln!(out, "battle reports: {}", store.battles().count());
    let change = store.last_roster_change();
    let _ = writeln!(
        out,
        "last roster change: +{} ~{} -{}",
        change.inserted.len(),
        change.updated.len(),
        change.removed.len()
    );
    let mut history = store.history().peekable();
    if history.peek().is_some() {
        let _ = writeln!(out, "group history:");
        for row in history {
            let _ = writeln!(
                out,
                "  {} {:<10} members={} total={} avg={} zero={}",
                row.record_date,
                row.group,
                row.member_count,
                row.total_wu,
                row.average_wu,
                row.zero_wu_count
            );
        }
    }
    out
}
