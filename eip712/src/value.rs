//! Coercion of JSON values into ABI words.

use ethcodec_abi::{
    util::{left_pad, right_pad},
    ParamType, Token, Word,
};
use ethcodec_primitives::{from_hex, numeric::parse_uint, signed, U256};
use ethcodec_pub_use::serde_json::Value;

use crate::{Eip712Error, Result};

/// Reads an atomic value as a token, checked against `ty`.
///
/// Integers come from JSON numbers, decimal strings or `0x` hex strings;
/// addresses and `bytesN` from hex strings; `bool` from JSON booleans.
pub(crate) fn atomic_token(ty: &ParamType, value: &Value) -> Result<Token> {
    let name = ty.to_string();
    let word = match (ty, value) {
        (ParamType::Address, Value::String(s)) => {
            let bytes = from_hex(s).map_err(|err| Eip712Error::numeric(&name, err))?;
            if bytes.len() != 20 {
                return Err(Eip712Error::mismatch(&name, format!("{} bytes", bytes.len())))
            }
            left_pad(&bytes)
        }
        (ParamType::Bool, Value::Bool(b)) => Some(Word::from(U256::from(u64::from(*b)))),
        (ParamType::Uint(bits), _) => {
            let value = read_uint(&name, value)?;
            if !signed::fits_unsigned(value, *bits) {
                return Err(Eip712Error::mismatch(&name, value))
            }
            Some(Word::from(value))
        }
        (ParamType::Int(bits), _) => {
            let value = read_int(&name, value)?;
            if !signed::fits_signed(value, *bits) {
                return Err(Eip712Error::mismatch(&name, value))
            }
            Some(Word::from(value))
        }
        (ParamType::FixedBytes(len), Value::String(s)) => {
            let bytes = from_hex(s).map_err(|err| Eip712Error::numeric(&name, err))?;
            if bytes.len() > *len {
                return Err(Eip712Error::mismatch(&name, format!("{} bytes", bytes.len())))
            }
            right_pad(&bytes)
        }
        _ => None,
    };
    word.map(Token::Word).ok_or_else(|| Eip712Error::mismatch(&name, value))
}

/// Hex string contents of a `bytes` value.
pub(crate) fn dynamic_bytes(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::String(s) => from_hex(s).map_err(|err| Eip712Error::numeric("bytes", err)),
        other => Err(Eip712Error::mismatch("bytes", other)),
    }
}

/// Contents of a `string` value.
pub(crate) fn string(value: &Value) -> Result<&str> {
    value.as_str().ok_or_else(|| Eip712Error::mismatch("string", value))
}

fn read_uint(name: &str, value: &Value) -> Result<U256> {
    match value {
        Value::Number(n) => {
            n.as_u64().map(U256::from).ok_or_else(|| Eip712Error::mismatch(name, n))
        }
        Value::String(s) => parse_uint(s).map_err(|err| Eip712Error::numeric(name, err)),
        other => Err(Eip712Error::mismatch(name, other)),
    }
}

fn read_int(name: &str, value: &Value) -> Result<U256> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(|v| signed::from_i128(v.into()))
            .ok_or_else(|| Eip712Error::mismatch(name, n)),
        Value::String(s) => signed::parse_int(s).map_err(|err| Eip712Error::numeric(name, err)),
        other => Err(Eip712Error::mismatch(name, other)),
    }
}
