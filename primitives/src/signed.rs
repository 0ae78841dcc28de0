//! Two's-complement helpers for signed EVM words.
//!
//! Signed integers travel as 256 bit two's-complement words; these helpers
//! build such words and check that they fit a narrower `intN`/`uintN`.

use crate::{numeric::NumericError, U256};

/// True when the sign bit of `word` is set.
pub fn is_negative(word: U256) -> bool {
    word.bit(255)
}

/// Two's-complement word for `value`.
pub fn from_i128(value: i128) -> U256 {
    let magnitude = U256::from(value.unsigned_abs());
    if value < 0 {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

/// Parses an optionally negative decimal (or `0x` hex magnitude) into a
/// two's-complement word.
pub fn parse_int(input: &str) -> Result<U256, NumericError> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let magnitude = crate::numeric::parse_uint(digits)?;
    let limit = U256::from(1u64) << 255usize;
    if negative {
        if magnitude > limit {
            return Err(NumericError::Overflow(32));
        }
        Ok(magnitude.wrapping_neg())
    } else {
        if magnitude >= limit {
            return Err(NumericError::Overflow(32));
        }
        Ok(magnitude)
    }
}

/// True when `word`, read as two's complement, fits in an `int<bits>`.
pub fn fits_signed(word: U256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    if bits == 0 {
        return false;
    }
    let limit = U256::from(1u64) << (bits - 1);
    if is_negative(word) {
        word.wrapping_neg() <= limit
    } else {
        word < limit
    }
}

/// True when `word` fits in a `uint<bits>`.
pub fn fits_unsigned(word: U256, bits: usize) -> bool {
    word.bit_len() <= bits
}
