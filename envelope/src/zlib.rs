//! Zlib envelope detection and inflation.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::limits::Limits;

/// Two-byte header the client writes in front of every compressed payload.
pub const ZLIB_MAGIC: [u8; 2] = [0x78, 0x9C];

/// Returns `true` if the payload starts with the zlib signature.
#[must_use]
pub fn is_zlib(data: &[u8]) -> bool {
    data.len() >= ZLIB_MAGIC.len() && data[..ZLIB_MAGIC.len()] == ZLIB_MAGIC
}

/// Unwraps a payload envelope.
///
/// Signature-prefixed input is inflated as a complete zlib stream. Any other
/// input is assumed to be plain JSON already and is returned borrowed and
/// unchanged.
pub fn unwrap_payload<'a>(data: &'a [u8], limits: &Limits) -> EnvelopeResult<Cow<'a, [u8]>> {
    if !is_zlib(data) {
        return Ok(Cow::Borrowed(data));
    }
    inflate(data, limits).map(Cow::Owned)
}

/// Unwraps a payload, mapping any envelope failure to an empty buffer.
///
/// The failure is logged; callers treat an empty result as "no data".
#[must_use]
pub fn unwrap_or_empty(data: &[u8], limits: &Limits) -> Vec<u8> {
    match unwrap_payload(data, limits) {
        Ok(bytes) => bytes.into_owned(),
        Err(err) => {
            tracing::warn!(error = %err, len = data.len(), "payload unwrap failed");
            Vec::new()
        }
    }
}

fn inflate(data: &[u8], limits: &Limits) -> EnvelopeResult<Vec<u8>> {
    // Read one byte past the limit so an oversized stream is detectable.
    let cap = u64::try_from(limits.max_inflated_bytes)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let mut decoder = ZlibDecoder::new(data).take(cap);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).min(limits.max_inflated_bytes));
    decoder
        .read_to_end(&mut out)
        .map_err(|err| EnvelopeError::Inflate {
            reason: err.to_string(),
        })?;
    if out.len() > limits.max_inflated_bytes {
        return Err(EnvelopeError::LimitsExceeded {
            limit: limits.max_inflated_bytes,
            actual: out.len(),
        });
    }
    Ok(out)
}
