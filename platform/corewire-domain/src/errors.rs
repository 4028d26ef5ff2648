use std::fmt;

/// Structural failure while reading tuple-encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload shorter than the minimum length for the record kind.
    TooShort {
        kind: &'static str,
        min: usize,
        len: usize,
    },
    /// A read reached past the end of the buffer.
    Truncated { needed: usize, available: usize },
    /// An offset or length word does not fit the address space of the buffer.
    OffsetOutOfRange { offset: String },
    /// A word holds a value outside the declared type (dirty padding, bool > 1, ...).
    InvalidValue { field: &'static str },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TooShort { kind, min, len } => {
                write!(f, "{kind} payload too short: need at least {min} bytes, got {len}")
            }
            DecodeError::Truncated { needed, available } => {
                write!(f, "truncated payload: need {needed} bytes, have {available}")
            }
            DecodeError::OffsetOutOfRange { offset } => {
                write!(f, "offset out of range: {offset}")
            }
            DecodeError::InvalidValue { field } => write!(f, "invalid value for {field}"),
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer than the four header bytes were supplied.
    MalformedAction { len: usize },
    InvalidHex(String),
    UnknownActionId(u32),
    UnsupportedVersion(u8),
    OutOfRange { field: &'static str, value: String },
    Decode(DecodeError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::MalformedAction { len } => {
                write!(f, "malformed action: expected at least 4 bytes, got {len}")
            }
            CodecError::InvalidHex(msg) => write!(f, "invalid hex: {msg}"),
            CodecError::UnknownActionId(id) => write!(f, "unknown action id: {id}"),
            CodecError::UnsupportedVersion(version) => {
                write!(f, "unsupported action encoding version: {version:#04x}")
            }
            CodecError::OutOfRange { field, value } => {
                write!(f, "{field} out of range: {value}")
            }
            CodecError::Decode(err) => write!(f, "decode: {err}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DecodeError> for CodecError {
    fn from(err: DecodeError) -> Self {
        CodecError::Decode(err)
    }
}
