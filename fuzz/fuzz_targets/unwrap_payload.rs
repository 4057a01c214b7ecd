#![no_main]

use envelope::{decode_type5, is_zlib, unwrap_payload, Limits, ZLIB_MAGIC};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();

    if let Ok(plain) = unwrap_payload(data, &limits) {
        if is_zlib(data) {
            assert!(plain.len() <= limits.max_inflated_bytes);
        } else {
            assert_eq!(&*plain, data);
        }
    }

    // Force the inflate path for every input.
    let mut framed = Vec::with_capacity(data.len() + ZLIB_MAGIC.len());
    framed.extend_from_slice(&ZLIB_MAGIC);
    framed.extend_from_slice(data);
    if let Ok(plain) = unwrap_payload(&framed, &limits) {
        assert!(plain.len() <= limits.max_inflated_bytes);
    }

    let _ = decode_type5(data);
});
