//! Type-tagged XOR transform used by the diagnostic message category.

/// Leading byte that marks an XOR-obfuscated diagnostic blob.
pub const TYPE5_TAG: u8 = 5;

/// Key every body byte is XOR-combined with.
pub const TYPE5_KEY: u8 = 152;

/// Decodes a type-5 blob into text.
///
/// Returns an empty string when the input does not start with [`TYPE5_TAG`].
/// Bytes that are not valid UTF-8 after decoding are replaced lossily.
#[must_use]
pub fn decode_type5(data: &[u8]) -> String {
    match data.split_first() {
        Some((&TYPE5_TAG, body)) => {
            let plain: Vec<u8> = body.iter().map(|byte| byte ^ TYPE5_KEY).collect();
            String::from_utf8_lossy(&plain).into_owned()
        }
        _ => String::new(),
    }
}

/// Encodes bytes as a type-5 blob (tag followed by the XOR-ed body).
#[must_use]
pub fn encode_type5(plain: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(plain.len() + 1);
    out.push(TYPE5_TAG);
    out.extend(plain.iter().map(|byte| byte ^ TYPE5_KEY));
    out
}
