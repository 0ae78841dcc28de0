use crate::ParamType;

/// ABI encoding and decoding errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A read would run past the end of the buffer: an offset points outside
    /// it, or a declared length exceeds the remaining bytes.
    #[error("read of {len} bytes at offset {offset} overruns a {available} byte buffer")]
    TruncatedInput {
        /// Absolute offset of the read.
        offset: usize,
        /// Bytes requested.
        len: usize,
        /// Size of the buffer.
        available: usize,
    },
    /// The bytes are in range but not a canonical encoding: dirty padding, a
    /// bool other than 0 or 1, trailing bytes in strict mode.
    #[error("invalid data")]
    InvalidData,
    /// A type name with no primitive mapping.
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// A value that does not conform to its declared type.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// Call or revert data that starts with a different selector.
    #[error("selector mismatch: expected 0x{}, got 0x{}", hex::encode(.expected), hex::encode(.got))]
    SelectorMismatch {
        /// Selector of the function or error being decoded.
        expected: [u8; 4],
        /// Selector found in the data.
        got: [u8; 4],
    },
    /// Hex at the system boundary could not be parsed.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

impl Error {
    pub(crate) fn mismatch(expected: &ParamType, found: impl core::fmt::Display) -> Self {
        Error::TypeMismatch(format!("expected {expected}, found {found}"))
    }
}

/// ABI result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
