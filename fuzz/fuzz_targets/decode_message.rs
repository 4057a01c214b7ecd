#![no_main]

use codec::{decode_message, DecodeConfig, RawMessage, COMBAT_REPORT_ID, ROSTER_SNAPSHOT_ID};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };

    let command_id = match selector % 3 {
        0 => ROSTER_SNAPSHOT_ID,
        1 => COMBAT_REPORT_ID,
        _ => u32::from(selector),
    };
    let config = DecodeConfig::for_testing()
        .with_detailed_capture(selector & 0x80 != 0)
        .with_position("1");

    let _ = decode_message(&RawMessage::new(command_id, payload), &config);
});
