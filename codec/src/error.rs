//! Error types for decoding operations.

use std::fmt;

use serde_json::Value;

/// Result type for message-level decode operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Message-level decode failures. Any of these abort one message only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// The envelope could not be unwrapped.
    Envelope(envelope::EnvelopeError),

    /// The unwrapped payload was empty.
    EmptyPayload,

    /// The payload is not valid JSON.
    Json { reason: String },

    /// The payload is JSON but the top level is not an array.
    NotAnArray { found: JsonKind },
}

/// Coarse JSON value kind, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

/// A row that was skipped while mapping a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSkip {
    /// Position of the row in the top-level array.
    pub index: usize,
    pub reason: SkipReason,
}

/// Why a row was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The row itself is not an array.
    NotAnArray { found: JsonKind },
    /// The row is an empty array.
    EmptyRow,
    /// The row's first element is not an object.
    NotAnObject { found: JsonKind },
    /// A roster row's first element is not a usable member id.
    InvalidMemberId { found: JsonKind },
    /// The record object did not fit the target record type.
    Mapping { reason: String },
}

impl From<envelope::EnvelopeError> for CodecError {
    fn from(err: envelope::EnvelopeError) -> Self {
        Self::Envelope(err)
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Envelope(err) => write!(f, "envelope error: {err}"),
            Self::EmptyPayload => write!(f, "empty payload"),
            Self::Json { reason } => write!(f, "invalid json: {reason}"),
            Self::NotAnArray { found } => write!(f, "expected top-level array, found {found}"),
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for RowSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.index, self.reason)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArray { found } => write!(f, "row is {found}, expected array"),
            Self::EmptyRow => write!(f, "row is empty"),
            Self::NotAnObject { found } => {
                write!(f, "first element is {found}, expected object")
            }
            Self::InvalidMemberId { found } => {
                write!(f, "member id is {found}, expected integer")
            }
            Self::Mapping { reason } => write!(f, "record mapping failed: {reason}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Envelope(err) => Some(err),
            _ => None,
        }
    }
}
