//! Envelope detection and unwrapping for captured stzb client payloads.
//!
//! Payloads arrive from the client's network layer either as zlib-compressed
//! JSON, as plain JSON, or (for one diagnostic message category) as a
//! type-tagged XOR blob. This crate recognises and reverses those envelopes.
//! It knows nothing about the JSON shapes inside.
//!
//! # Design Principles
//!
//! - **Signature driven** - Only inputs carrying the zlib header are inflated;
//!   everything else passes through untouched.
//! - **Bounded inflation** - Inflated output is capped by [`Limits`].
//! - **No domain knowledge** - Record mapping lives in the `codec` crate.

mod error;
mod limits;
mod type5;
mod zlib;

pub use error::{EnvelopeError, EnvelopeResult};
pub use limits::Limits;
pub use type5::{decode_type5, encode_type5, TYPE5_KEY, TYPE5_TAG};
pub use zlib::{is_zlib, unwrap_or_empty, unwrap_payload, ZLIB_MAGIC};
