//! Hex and quantity conversions.
//!
//! Two conventions meet at the JSON-RPC boundary: *quantities* (unsigned
//! integers) are rendered as minimal hex without zero padding, `0x0` for zero;
//! *data* (byte arrays, hashes, addresses) is rendered at fixed width with
//! zero padding.

use crate::U256;

/// Errors produced while parsing hex strings and quantities.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    /// The input is not valid hex.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    /// A quantity must start with `0x`.
    #[error("quantity is missing the 0x prefix")]
    MissingPrefix,
    /// A quantity must contain at least one digit.
    #[error("quantity has no digits")]
    EmptyQuantity,
    /// A quantity must not be zero padded.
    #[error("quantity has leading zeros")]
    LeadingZero,
    /// The value does not fit the requested width.
    #[error("value does not fit in {0} bytes")]
    Overflow(usize),
    /// A digit outside the expected radix.
    #[error("invalid digit in {0:?}")]
    InvalidDigit(String),
}

/// Drops a leading `0x`/`0X` if present.
pub fn strip_0x(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Renders bytes as fixed-width, `0x` prefixed lowercase hex.
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parses hex data, with or without the `0x` prefix. Odd-length input is read
/// as if it had one more leading `0`.
pub fn from_hex(input: &str) -> Result<Vec<u8>, NumericError> {
    let digits = strip_0x(input);
    if digits.len() % 2 == 1 {
        Ok(hex::decode(format!("0{digits}"))?)
    } else {
        Ok(hex::decode(digits)?)
    }
}

/// Minimal hex digits of `value`, empty for zero.
fn minimal_digits(value: U256) -> String {
    let full = hex::encode(value.to_be_bytes::<32>());
    full.trim_start_matches('0').to_owned()
}

/// Renders a quantity: minimal hex, `0x0` for zero.
pub fn encode_quantity(value: U256) -> String {
    let digits = minimal_digits(value);
    if digits.is_empty() {
        "0x0".to_owned()
    } else {
        format!("0x{digits}")
    }
}

/// Parses a quantity, rejecting anything that [`encode_quantity`] would not
/// have produced.
pub fn decode_quantity(input: &str) -> Result<U256, NumericError> {
    let digits = input
        .strip_prefix("0x")
        .ok_or(NumericError::MissingPrefix)?;
    if digits.is_empty() {
        return Err(NumericError::EmptyQuantity);
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(NumericError::LeadingZero);
    }
    if digits.len() > 64 {
        return Err(NumericError::Overflow(32));
    }
    U256::from_str_radix(digits, 16).map_err(|_| NumericError::InvalidDigit(input.to_owned()))
}

/// Renders `value` as `0x` followed by exactly `width` hex digits.
pub fn to_hex_zero_padded(value: U256, width: usize) -> Result<String, NumericError> {
    let digits = minimal_digits(value);
    if digits.len() > width {
        return Err(NumericError::Overflow(width / 2));
    }
    Ok(format!("0x{digits:0>width$}"))
}

/// Big-endian bytes of `value` left-padded to `len` bytes.
pub fn to_bytes_padded(value: U256, len: usize) -> Result<Vec<u8>, NumericError> {
    let bytes = value.to_be_bytes::<32>();
    let used = (value.bit_len() + 7) / 8;
    if used > len {
        return Err(NumericError::Overflow(len));
    }
    let mut out = vec![0u8; len];
    out[len - used..].copy_from_slice(&bytes[32 - used..]);
    Ok(out)
}

/// Parses an unsigned integer given either as decimal digits or as `0x` hex.
pub fn parse_uint(input: &str) -> Result<U256, NumericError> {
    let trimmed = input.trim();
    let (digits, radix) = match trimmed.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };
    if digits.is_empty() {
        return Err(NumericError::EmptyQuantity);
    }
    U256::from_str_radix(digits, radix).map_err(|_| NumericError::InvalidDigit(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_are_minimal() {
        assert_eq!(encode_quantity(U256::ZERO), "0x0");
        assert_eq!(encode_quantity(U256::from(1u64)), "0x1");
        assert_eq!(encode_quantity(U256::from(0x400u64)), "0x400");
        assert_eq!(encode_quantity(U256::MAX), format!("0x{}", "f".repeat(64)));
    }

    #[test]
    fn quantity_decoding_is_strict() {
        assert_eq!(decode_quantity("0x0"), Ok(U256::ZERO));
        assert_eq!(decode_quantity("0x400"), Ok(U256::from(1024u64)));
        assert_eq!(decode_quantity("400"), Err(NumericError::MissingPrefix));
        assert_eq!(decode_quantity("0x"), Err(NumericError::EmptyQuantity));
        assert_eq!(decode_quantity("0x00"), Err(NumericError::LeadingZero));
        assert_eq!(decode_quantity("0x0400"), Err(NumericError::LeadingZero));
        assert!(matches!(
            decode_quantity("0xzz"),
            Err(NumericError::InvalidDigit(_))
        ));
    }

    #[test]
    fn data_is_fixed_width() {
        assert_eq!(to_hex([0u8, 0, 1]), "0x000001");
        assert_eq!(to_hex(b""), "0x");
        assert_eq!(
            to_hex_zero_padded(U256::from(82u64), 64).unwrap(),
            format!("0x{}52", "0".repeat(62))
        );
        assert_eq!(
            to_hex_zero_padded(U256::from(0x1234u64), 2),
            Err(NumericError::Overflow(1))
        );
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(from_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(from_hex("0102").unwrap(), vec![1, 2]);
        assert_eq!(from_hex("0x102").unwrap(), vec![1, 2]);
        assert_eq!(from_hex("0x").unwrap(), Vec::<u8>::new());
        assert!(from_hex("0xgg").is_err());
    }

    #[test]
    fn padded_bytes() {
        assert_eq!(to_bytes_padded(U256::from(0x0102u64), 4).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(to_bytes_padded(U256::ZERO, 0).unwrap(), Vec::<u8>::new());
        assert_eq!(
            to_bytes_padded(U256::from(0x010203u64), 2),
            Err(NumericError::Overflow(2))
        );
    }

    #[test]
    fn uint_parsing_accepts_decimal_and_hex() {
        assert_eq!(parse_uint("84532").unwrap(), U256::from(84532u64));
        assert_eq!(parse_uint("0x14a34").unwrap(), U256::from(84532u64));
        assert!(parse_uint("").is_err());
        assert!(parse_uint("12a").is_err());
    }
}
