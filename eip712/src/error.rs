use ethcodec_primitives::NumericError;
use ethcodec_pub_use::serde_json;

/// EIP-712 errors.
#[derive(Debug, thiserror::Error)]
pub enum Eip712Error {
    /// A field references a type that is neither atomic nor declared.
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// A value does not conform to its declared type, or a field is missing.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// The type mapping is malformed: a bad struct name or a repeated field.
    #[error("invalid type definition: {0}")]
    InvalidDefinition(String),
    /// Encoding through the ABI layer failed.
    #[error(transparent)]
    Abi(#[from] ethcodec_abi::Error),
    /// The typed data document is not valid JSON for the model.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Eip712Error {
    pub(crate) fn mismatch(ty: &str, found: impl core::fmt::Display) -> Self {
        Eip712Error::TypeMismatch(format!("expected {ty}, found {found}"))
    }

    pub(crate) fn numeric(ty: &str, err: NumericError) -> Self {
        Eip712Error::TypeMismatch(format!("{ty}: {err}"))
    }
}

/// EIP-712 result type.
pub type Result<T, E = Eip712Error> = core::result::Result<T, E>;
