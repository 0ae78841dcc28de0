use ethcodec_primitives::NumericError;
use ethcodec_rlp::DecodeError;

/// Transaction encoding and decoding errors.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    /// The bytes are not valid RLP, or a field has the wrong shape.
    #[error(transparent)]
    Rlp(#[from] DecodeError),
    /// The envelope list has a field count no supported kind uses.
    #[error("no {kind} transaction has {count} fields")]
    UnsupportedArity {
        /// Envelope family that was being decoded.
        kind: &'static str,
        /// Number of fields found.
        count: usize,
    },
    /// The leading byte is neither an RLP list nor a known type byte.
    #[error("unsupported transaction type 0x{0:02x}")]
    UnsupportedType(u8),
    /// A field holds a value its position does not allow.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// Hex at the system boundary could not be parsed.
    #[error(transparent)]
    Hex(#[from] NumericError),
    /// An enclave key is not valid base64.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}

/// Transaction result type.
pub type Result<T, E = TxError> = core::result::Result<T, E>;
