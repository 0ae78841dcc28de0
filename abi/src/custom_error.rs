use ethcodec_primitives::U256;

use crate::{
    decode, encode_params,
    signature::{build_signature, parse_signature, selector, signature_hash, strip_selector},
    Bytes, Detokenize, Error, ParamType, Result, Selector, Token,
};

/// Selector of `Error(string)`, the payload of `require` and `revert` with a
/// reason.
pub const ERROR_STRING_SELECTOR: Selector = [0x08, 0xc3, 0x79, 0xa0];

/// Selector of `Panic(uint256)`, raised by failed assertions and checked
/// arithmetic.
pub const PANIC_SELECTOR: Selector = [0x4e, 0x48, 0x7b, 0x71];

/// A Solidity custom error, `error Name(t1, t2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomError {
    /// Error name.
    pub name: String,
    /// Parameter types.
    pub inputs: Vec<ParamType>,
}

impl CustomError {
    /// Creates an error description.
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>) -> Self {
        Self { name: name.into(), inputs }
    }

    /// Parses `Name(t1,t2)`.
    pub fn parse(signature: &str) -> Result<Self> {
        let (name, inputs) = parse_signature(signature)?;
        Ok(Self { name, inputs })
    }

    /// Canonical signature, `Name(t1,t2)`.
    pub fn signature(&self) -> String {
        build_signature(&self.name, &self.inputs)
    }

    /// Full keccak-256 of the signature as `0x` prefixed hex.
    pub fn signature_hash(&self) -> String {
        format!("0x{}", hex::encode(signature_hash(&self.signature())))
    }

    /// Four byte selector of the signature.
    pub fn selector(&self) -> Selector {
        selector(&self.signature())
    }

    /// Revert data: the selector followed by the encoded arguments.
    pub fn encode(&self, tokens: &[Token]) -> Result<Bytes> {
        let params = encode_params(&self.inputs, tokens)?;
        Ok([&self.selector()[..], &params].concat())
    }

    /// Decodes revert data raised by this error.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<Token>> {
        decode(&self.inputs, strip_selector(self.selector(), data)?)
    }
}

/// Decoded revert data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revert {
    /// No data: `revert()` or a failed call without a reason.
    Empty,
    /// `Error(string)`.
    Reason(String),
    /// `Panic(uint256)` with its code.
    Panic(U256),
    /// Any other selector, left for the caller to match against a
    /// [`CustomError`].
    Custom {
        /// Leading four bytes.
        selector: Selector,
        /// Encoded arguments after the selector.
        data: Bytes,
    },
}

impl Revert {
    /// Classifies revert data by selector and decodes the built-in errors.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Revert::Empty)
        }
        if data.starts_with(&ERROR_STRING_SELECTOR) {
            let tokens = decode(&[ParamType::String], &data[4..])?;
            return first::<String>(tokens).map(Revert::Reason)
        }
        if data.starts_with(&PANIC_SELECTOR) {
            let tokens = decode(&[ParamType::Uint(256)], &data[4..])?;
            return first::<U256>(tokens).map(Revert::Panic)
        }
        if data.len() < 4 {
            return Err(Error::TruncatedInput { offset: 0, len: 4, available: data.len() })
        }
        let (head, rest) = data.split_at(4);
        let mut selector = [0u8; 4];
        selector.copy_from_slice(head);
        Ok(Revert::Custom { selector, data: rest.to_vec() })
    }

    /// [`Revert::decode`] for `0x` prefixed hex.
    pub fn decode_hex(data: &str) -> Result<Self> {
        let bytes = hex::decode(data.strip_prefix("0x").unwrap_or(data))?;
        Self::decode(&bytes)
    }

    /// Decodes the arguments when this is `error`'s revert.
    pub fn as_custom(&self, error: &CustomError) -> Option<Result<Vec<Token>>> {
        match self {
            Revert::Custom { selector, data } if *selector == error.selector() => {
                Some(decode(&error.inputs, data))
            }
            _ => None,
        }
    }

    /// Short description of a panic code, as listed by the Solidity docs.
    pub fn panic_reason(&self) -> Option<&'static str> {
        let Revert::Panic(code) = self else { return None };
        if code.bit_len() > 8 {
            return None
        }
        let reason = match code.as_limbs()[0] {
            0x00 => "generic compiler panic",
            0x01 => "assertion failed",
            0x11 => "arithmetic overflow or underflow",
            0x12 => "division or modulo by zero",
            0x21 => "invalid enum value",
            0x22 => "corrupt storage byte array",
            0x31 => "pop on empty array",
            0x32 => "array index out of bounds",
            0x41 => "out of memory",
            0x51 => "call to an uninitialized function",
            _ => return None,
        };
        Some(reason)
    }
}

fn first<T: Detokenize>(tokens: Vec<Token>) -> Result<T> {
    tokens
        .into_iter()
        .next()
        .map(T::from_token)
        .unwrap_or(Err(Error::InvalidData))
}
