// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ethereum ABI params.

use core::fmt;

use ethcodec_primitives::{signed, U256};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{util::right_pad, Address, Error, ParamType, Result, Word};

/// Ethereum ABI params.
///
/// Tokens carry shape, not type: a `uint8` and an `address` are both a
/// [`Token::Word`]. Pair them with a [`ParamType`] to check or decode.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Single Word
    Word(Word),
    /// Tuple or `T[M]`
    FixedSeq(Vec<Token>),
    /// T[]
    DynSeq(Vec<Token>),
    /// String or Bytes
    PackedSeq(Vec<u8>),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(contents) => write!(f, "Word {contents:?}"),
            Token::FixedSeq(contents) => write!(f, "FixedSeq {contents:?}"),
            Token::DynSeq(contents) => write!(f, "DynSeq {contents:?}"),
            Token::PackedSeq(contents) => write!(f, "PackedSeq 0x{}", hex::encode(contents)),
        }
    }
}

impl Token {
    /// An unsigned integer word.
    pub fn uint(value: U256) -> Self {
        Token::Word(value.into())
    }

    /// A signed integer word, sign extended to 256 bits.
    pub fn int(value: i128) -> Self {
        Token::Word(signed::from_i128(value).into())
    }

    /// An address, left padded.
    pub fn address(address: Address) -> Self {
        Token::Word(address.into())
    }

    /// A boolean word.
    pub fn bool(value: bool) -> Self {
        Token::uint(U256::from(value as u8))
    }

    /// A `bytesN` value, right padded. Fails above 32 bytes.
    pub fn fixed_bytes(bytes: &[u8]) -> Result<Self> {
        right_pad(bytes).map(Token::Word).ok_or_else(|| {
            Error::TypeMismatch(format!("{} bytes do not fit a bytesN word", bytes.len()))
        })
    }

    /// A `bytes` value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Token::PackedSeq(bytes.into())
    }

    /// A `string` value.
    pub fn string(value: impl Into<String>) -> Self {
        Token::PackedSeq(value.into().into_bytes())
    }

    /// Return a reference to the underlying word for a value type
    pub fn as_word(&self) -> Option<&Word> {
        match self {
            Token::Word(word) => Some(word),
            _ => None,
        }
    }

    /// Return the underlying word read as an unsigned integer
    pub fn as_uint(&self) -> Option<U256> {
        self.as_word().map(|word| U256::from_be_bytes(word.0))
    }

    /// Return the low 20 bytes of the underlying word
    pub fn as_address(&self) -> Option<Address> {
        self.as_word().map(|word| Address::from_slice(&word[12..]))
    }

    /// Return a reference to the underlying buffer for a packed sequence
    /// (string or bytes)
    pub fn as_packed_data(&self) -> Option<&[u8]> {
        match self {
            Token::PackedSeq(buf) => Some(buf.as_ref()),
            _ => None,
        }
    }

    /// Return a reference to the underlying vector for a dynamic sequence
    pub fn as_dyn_seq(&self) -> Option<&[Token]> {
        match self {
            Token::DynSeq(buf) => Some(buf.as_ref()),
            _ => None,
        }
    }

    /// Return a reference to the underlying vector for a fixed sequence
    pub fn as_fixed_seq(&self) -> Option<&[Token]> {
        match self {
            Token::FixedSeq(buf) => Some(buf.as_ref()),
            _ => None,
        }
    }

    /// Check whether the token is a valid value of the given parameter type.
    ///
    /// Word values must fit their declared width: high bits of a `uintN`,
    /// the sign extension of an `intN`, the padding of an address or
    /// `bytesN`.
    pub fn type_check(&self, param_type: &ParamType) -> bool {
        match (param_type, self) {
            (ParamType::Address, Token::Word(word)) => word[..12].iter().all(|b| *b == 0),
            (ParamType::Uint(bits), Token::Word(word)) => {
                signed::fits_unsigned(U256::from_be_bytes(word.0), *bits)
            }
            (ParamType::Int(bits), Token::Word(word)) => {
                signed::fits_signed(U256::from_be_bytes(word.0), *bits)
            }
            (ParamType::Bool, Token::Word(word)) => {
                word[..31].iter().all(|b| *b == 0) && word[31] <= 1
            }
            (ParamType::FixedBytes(len), Token::Word(word)) => {
                *len <= 32 && word[*len..].iter().all(|b| *b == 0)
            }
            (ParamType::Bytes, Token::PackedSeq(_)) => true,
            (ParamType::String, Token::PackedSeq(buf)) => core::str::from_utf8(buf).is_ok(),
            (ParamType::Array(inner_param), Token::DynSeq(inner_tokens)) => {
                inner_tokens.iter().all(|t| t.type_check(inner_param))
            }
            (ParamType::FixedArray(inner_param, expected_size), Token::FixedSeq(inner_tokens)) => {
                inner_tokens.len() == *expected_size
                    && inner_tokens.iter().all(|t| t.type_check(inner_param))
            }
            (ParamType::Tuple(param_types), Token::FixedSeq(inner_tokens)) => {
                Token::types_check(inner_tokens, param_types)
            }
            _ => false,
        }
    }

    /// Check if all the types of the tokens match the given parameter types.
    pub fn types_check(tokens: &[Token], param_types: &[ParamType]) -> bool {
        param_types.len() == tokens.len() && {
            param_types
                .iter()
                .zip(tokens)
                .all(|(param_type, token)| token.type_check(param_type))
        }
    }

    /// Check if the token is a dynamic type resulting in prefixed encoding
    pub fn is_dynamic(&self) -> bool {
        match self {
            Token::DynSeq(_) | Token::PackedSeq(_) => true,
            Token::FixedSeq(tokens) => tokens.iter().any(Token::is_dynamic),
            _ => false,
        }
    }
}

impl From<Address> for Token {
    fn from(address: Address) -> Self {
        Token::address(address)
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Token::uint(value)
    }
}

#[cfg(test)]
mod tests {
    use ethcodec_primitives::{B160, B256, U256};

    use crate::{ParamType, Token};

    macro_rules! assert_type_check {
        ($left:expr, $right:expr,) => {
            assert!(Token::types_check($left.as_slice(), &$right.as_slice()))
        };
        ($left:expr, $right:expr) => {
            assert_type_check!($left, $right,)
        };
    }

    macro_rules! assert_not_type_check {
        ($left:expr, $right:expr,) => {
            assert!(!Token::types_check($left.as_slice(), &$right.as_slice()))
        };
        ($left:expr, $right:expr) => {
            assert_not_type_check!($left, $right,)
        };
    }

    #[test]
    fn test_type_check() {
        let zero = || Token::Word(B256::default());

        assert_type_check!(vec![zero(), zero()], vec![ParamType::Uint(256), ParamType::Bool]);
        assert_type_check!(vec![zero(), zero()], vec![ParamType::Uint(32), ParamType::Bool]);
        assert_not_type_check!(vec![zero()], vec![ParamType::Uint(32), ParamType::Bool]);
        assert_not_type_check!(vec![zero(), zero()], vec![ParamType::Uint(32)]);

        assert_type_check!(
            vec![Token::DynSeq(vec![zero(), zero()])],
            vec![ParamType::Array(Box::new(ParamType::Bool))],
        );
        assert_type_check!(
            vec![Token::DynSeq(vec![zero(), zero()])],
            vec![ParamType::Array(Box::new(ParamType::Address))],
        );
        assert_type_check!(
            vec![Token::FixedSeq(vec![zero(), zero()])],
            vec![ParamType::FixedArray(Box::new(ParamType::Bool), 2)],
        );
        assert_not_type_check!(
            vec![Token::FixedSeq(vec![zero(), zero()])],
            vec![ParamType::FixedArray(Box::new(ParamType::Bool), 3)],
        );
        assert_not_type_check!(
            vec![Token::DynSeq(vec![zero(), zero()])],
            vec![ParamType::FixedArray(Box::new(ParamType::Bool), 2)],
        );
    }

    #[test]
    fn type_check_respects_widths() {
        let big = Token::uint(U256::from(256u64));
        assert!(big.type_check(&ParamType::Uint(16)));
        assert!(!big.type_check(&ParamType::Uint(8)));

        let minus_one = Token::int(-1);
        assert!(minus_one.type_check(&ParamType::Int(8)));
        assert!(!minus_one.type_check(&ParamType::Uint(8)));
        assert!(minus_one.type_check(&ParamType::Uint(256)));

        assert!(!Token::uint(U256::from(2u64)).type_check(&ParamType::Bool));
        assert!(!Token::Word(B256::repeat_byte(0x11)).type_check(&ParamType::Address));
        assert!(Token::address(B160::repeat_byte(0x11)).type_check(&ParamType::Address));

        let two = Token::fixed_bytes(&[0xab, 0xcd]).unwrap();
        assert!(two.type_check(&ParamType::FixedBytes(2)));
        assert!(!two.type_check(&ParamType::FixedBytes(1)));
        assert!(Token::fixed_bytes(&[0u8; 33]).is_err());

        assert!(!Token::PackedSeq(vec![0xff, 0xfe]).type_check(&ParamType::String));
        assert!(Token::PackedSeq(vec![0xff, 0xfe]).type_check(&ParamType::Bytes));
    }

    #[test]
    fn test_is_dynamic() {
        assert!(!Token::Word(B256::default()).is_dynamic());
        assert!(Token::PackedSeq(vec![0, 0, 0, 0]).is_dynamic());
        assert!(Token::PackedSeq("".into()).is_dynamic());
        assert!(Token::DynSeq(vec![Token::Word(B256::default())]).is_dynamic());
        assert!(!Token::FixedSeq(vec![Token::Word(B256::default())]).is_dynamic());
        assert!(Token::FixedSeq(vec![Token::PackedSeq("".into())]).is_dynamic());
        assert!(
            Token::FixedSeq(vec![Token::DynSeq(vec![Token::Word(B256::default())])]).is_dynamic()
        );
    }

    #[test]
    fn accessors() {
        let address = B160::repeat_byte(0x22);
        assert_eq!(Token::address(address).as_address(), Some(address));
        assert_eq!(Token::uint(U256::from(7u64)).as_uint(), Some(U256::from(7u64)));
        assert_eq!(Token::string("hi").as_packed_data(), Some(&b"hi"[..]));
        assert!(Token::string("hi").as_word().is_none());
    }
}
