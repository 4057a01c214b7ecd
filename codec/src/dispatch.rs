//! Command dispatch: route a raw message to its decoder and on to the sink.

use std::borrow::Cow;

use records::BattleReport;

use crate::command::{Command, RawMessage};
use crate::config::DecodeConfig;
use crate::error::{CodecError, CodecResult};
use crate::roster::{map_roster, RosterSnapshot};
use crate::rows::{map_battles, map_summary, MappedRows, SummaryBatch};
use crate::sink::{ProcessError, RecordSink};

/// The decoded content of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Roster(RosterSnapshot),
    Summary(SummaryBatch),
    Battles(MappedRows<BattleReport>),
    /// A summary report arrived while report capture was switched off.
    ReportCaptureDisabled,
    /// The command id is not one this crate decodes.
    Ignored { command_id: u32 },
}

/// Counts reported after a message has been handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Roster { members: usize, skipped: usize },
    Reports { parsed: usize, saved: usize, skipped: usize },
    Battles { saved: usize, skipped: usize },
    ReportCaptureDisabled,
    Ignored,
}

/// Decodes one message without touching any sink.
pub fn decode_message(message: &RawMessage<'_>, config: &DecodeConfig) -> CodecResult<Decoded> {
    let command_id = message.command_id;
    if config.debug {
        let text = envelope::unwrap_or_empty(message.payload, &config.limits);
        tracing::debug!(
            command = command_id,
            payload = %String::from_utf8_lossy(&text),
            "received message"
        );
    }

    let Some(command) = Command::parse(command_id) else {
        tracing::trace!(command = command_id, "ignoring message");
        return Ok(Decoded::Ignored { command_id });
    };

    match command {
        Command::RosterSnapshot => {
            let payload = unwrap(message, config)?;
            let snapshot = map_roster(&payload)?;
            tracing::info!(
                members = snapshot.entries.len(),
                skipped = snapshot.skipped.len(),
                "decoded roster snapshot"
            );
            Ok(Decoded::Roster(snapshot))
        }
        Command::CombatReport if config.detailed_capture => {
            tracing::info!("detailed battle capture enabled; summary report capture paused");
            let payload = unwrap(message, config)?;
            let battles = map_battles(&payload)?;
            tracing::info!(
                battles = battles.records.len(),
                skipped = battles.skipped_count(),
                "decoded battle reports"
            );
            Ok(Decoded::Battles(battles))
        }
        Command::CombatReport => {
            if !config.report_capture {
                tracing::info!("report capture disabled; skipping summary reports");
                return Ok(Decoded::ReportCaptureDisabled);
            }
            let payload = unwrap(message, config)?;
            let batch = map_summary(&payload, &config.position_of_interest)?;
            tracing::info!(
                reports = batch.all.len(),
                matched = batch.matched.len(),
                skipped = batch.skipped.len(),
                position = %config.position_of_interest,
                "decoded summary reports"
            );
            Ok(Decoded::Summary(batch))
        }
    }
}

fn unwrap<'a>(message: &RawMessage<'a>, config: &DecodeConfig) -> CodecResult<Cow<'a, [u8]>> {
    envelope::unwrap_payload(message.payload, &config.limits).map_err(|err| {
        tracing::warn!(command = message.command_id, error = %err, "dropping message");
        CodecError::from(err)
    })
}

/// Decodes one message and hands the records to `sink`.
///
/// Sink errors are returned unchanged. Empty batches are not forwarded, and
/// neither is a roster snapshot with no valid rows, so a garbled roster
/// message cannot wipe the stored roster.
pub fn process_message<S: RecordSink>(
    message: &RawMessage<'_>,
    config: &DecodeConfig,
    sink: &mut S,
) -> Result<Outcome, ProcessError<S::Error>> {
    let decoded = decode_message(message, config).map_err(ProcessError::Decode)?;
    let outcome = match decoded {
        Decoded::Roster(snapshot) => {
            if snapshot.entries.is_empty() {
                tracing::warn!("roster snapshot has no members; keeping stored roster");
            } else {
                sink.replace_roster(&snapshot.entries, &snapshot.keep_ids)
                    .map_err(ProcessError::Sink)?;
            }
            Outcome::Roster {
                members: snapshot.entries.len(),
                skipped: snapshot.skipped.len(),
            }
        }
        Decoded::Summary(batch) => {
            if !batch.matched.is_empty() {
                sink.save_reports(&batch.matched)
                    .map_err(ProcessError::Sink)?;
            }
            Outcome::Reports {
                parsed: batch.all.len(),
                saved: batch.matched.len(),
                skipped: batch.skipped.len(),
            }
        }
        Decoded::Battles(battles) => {
            if !battles.records.is_empty() {
                sink.save_battles(&battles.records)
                    .map_err(ProcessError::Sink)?;
            }
            Outcome::Battles {
                saved: battles.records.len(),
                skipped: battles.skipped_count(),
            }
        }
        Decoded::ReportCaptureDisabled => Outcome::ReportCaptureDisabled,
        Decoded::Ignored { .. } => Outcome::Ignored,
    };
    Ok(outcome)
}
