use bytes::{Bytes, BytesMut};

use crate::Header;

/// Reasons an RLP input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A prefix or payload runs past the end of the input.
    #[error("input too short")]
    TruncatedInput,
    /// A length prefix is not the minimal one for its payload, or does not fit
    /// in a `usize`.
    #[error("non-canonical length prefix")]
    MalformedLength,
    /// A single byte below `0x80` was wrapped in a string prefix.
    #[error("single byte below 0x80 must encode as itself")]
    NonCanonicalSingleByte,
    /// An integer payload starts with a zero byte.
    #[error("integer has leading zero bytes")]
    LeadingZero,
    /// An integer payload is wider than the target type.
    #[error("integer does not fit the target type")]
    Overflow,
    /// A fixed-size string has the wrong length.
    #[error("unexpected payload length")]
    UnexpectedLength,
    /// A list was expected.
    #[error("unexpected string")]
    UnexpectedString,
    /// A string was expected.
    #[error("unexpected list")]
    UnexpectedList,
    /// A list has the wrong number of items.
    #[error("list length mismatch: expected {expected}, got {got}")]
    ListLengthMismatch {
        /// Items expected.
        expected: usize,
        /// Items found.
        got: usize,
    },
    /// Bytes remain after the top-level item.
    #[error("trailing bytes after item")]
    TrailingBytes,
    /// Lists nest deeper than [`crate::MAX_DEPTH`].
    #[error("nesting too deep")]
    MaxDepthExceeded,
    /// Any other structural problem.
    #[error("{0}")]
    Custom(&'static str),
}

/// A type that can be read back from its canonical RLP encoding.
pub trait Decodable: Sized {
    /// Decodes one item from the front of `buf`, advancing it.
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError>;
}

/// Decodes exactly one item, rejecting trailing bytes.
pub fn decode_exact<T: Decodable>(bytes: impl AsRef<[u8]>) -> Result<T, DecodeError> {
    let mut buf = bytes.as_ref();
    let out = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(DecodeError::TrailingBytes);
    }
    Ok(out)
}

/// Reads a string header and splits its payload off the front of `buf`.
pub(crate) fn string_payload<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], DecodeError> {
    let h = Header::decode(buf)?;
    if h.list {
        return Err(DecodeError::UnexpectedList);
    }
    let (payload, rest) = buf.split_at(h.payload_length);
    *buf = rest;
    Ok(payload)
}

fn static_left_pad<const LEN: usize>(data: &[u8]) -> Result<[u8; LEN], DecodeError> {
    if data.len() > LEN {
        return Err(DecodeError::Overflow);
    }

    let mut v = [0; LEN];

    if data.is_empty() {
        return Ok(v);
    }

    if data[0] == 0 {
        return Err(DecodeError::LeadingZero);
    }

    v[LEN - data.len()..].copy_from_slice(data);
    Ok(v)
}

macro_rules! decode_integer {
    ($t:ty) => {
        impl Decodable for $t {
            fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
                let payload = string_payload(buf)?;
                Ok(<$t>::from_be_bytes(static_left_pad::<
                    { core::mem::size_of::<$t>() },
                >(payload)?))
            }
        }
    };
}

decode_integer!(u8);
decode_integer!(u16);
decode_integer!(u32);
decode_integer!(u64);
decode_integer!(u128);

impl Decodable for usize {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        usize::try_from(u64::decode(buf)?).map_err(|_| DecodeError::Overflow)
    }
}

impl Decodable for bool {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        match u8::decode(buf)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::Custom("invalid bool value, must be 0 or 1")),
        }
    }
}

#[cfg(feature = "ruint")]
impl Decodable for ruint::aliases::U256 {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let payload = string_payload(buf)?;
        Ok(Self::from_be_bytes(static_left_pad::<32>(payload)?))
    }
}

impl<const N: usize> Decodable for [u8; N] {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let payload = string_payload(buf)?;
        if payload.len() != N {
            return Err(DecodeError::UnexpectedLength);
        }
        let mut to = [0_u8; N];
        to.copy_from_slice(payload);
        Ok(to)
    }
}

impl Decodable for Bytes {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Bytes::copy_from_slice(string_payload(buf)?))
    }
}

impl Decodable for BytesMut {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(BytesMut::from(string_payload(buf)?))
    }
}

impl Decodable for String {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let payload = string_payload(buf)?;
        String::from_utf8(payload.to_vec()).map_err(|_| DecodeError::Custom("invalid utf-8 string"))
    }
}

impl<E> Decodable for Vec<E>
where
    E: Decodable,
{
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let h = Header::decode(buf)?;
        if !h.list {
            return Err(DecodeError::UnexpectedString);
        }

        let (mut payload, rest) = buf.split_at(h.payload_length);
        let mut to = Vec::new();
        while !payload.is_empty() {
            to.push(E::decode(&mut payload)?);
        }
        *buf = rest;

        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    fn check_decode<'a, T, IT>(fixtures: IT)
    where
        T: Decodable + PartialEq + core::fmt::Debug,
        IT: IntoIterator<Item = (Result<T, DecodeError>, &'a [u8])>,
    {
        for (expected, mut input) in fixtures {
            assert_eq!(T::decode(&mut input), expected);
            if expected.is_ok() {
                assert!(input.is_empty());
            }
        }
    }

    #[test]
    fn rlp_strings() {
        check_decode::<Bytes, _>(vec![
            (Ok(hex!("00")[..].to_vec().into()), &hex!("00")[..]),
            (
                Ok(hex!("6f62636465666768696a6b6c6d")[..].to_vec().into()),
                &hex!("8D6F62636465666768696A6B6C6D")[..],
            ),
            (Err(DecodeError::UnexpectedList), &hex!("C0")[..]),
        ])
    }

    #[test]
    fn rlp_fixed_length() {
        check_decode(vec![
            (
                Ok(hex!("6f62636465666768696a6b6c6d")),
                &hex!("8D6F62636465666768696A6B6C6D")[..],
            ),
            (
                Err(DecodeError::UnexpectedLength),
                &hex!("8C6F62636465666768696A6B6C")[..],
            ),
            (
                Err(DecodeError::UnexpectedLength),
                &hex!("8E6F62636465666768696A6B6C6D6E")[..],
            ),
        ])
    }

    #[test]
    fn rlp_u64() {
        check_decode(vec![
            (Ok(9_u64), &hex!("09")[..]),
            (Ok(0_u64), &hex!("80")[..]),
            (Ok(0x0505_u64), &hex!("820505")[..]),
            (Ok(0xCE05050505_u64), &hex!("85CE05050505")[..]),
            (Err(DecodeError::Overflow), &hex!("8AFFFFFFFFFFFFFFFFFF7C")[..]),
            (Err(DecodeError::TruncatedInput), &hex!("8BFFFFFFFFFFFFFFFFFF7C")[..]),
            (Err(DecodeError::UnexpectedList), &hex!("C0")[..]),
            (Err(DecodeError::LeadingZero), &hex!("00")[..]),
            (Err(DecodeError::NonCanonicalSingleByte), &hex!("8105")[..]),
            (Err(DecodeError::LeadingZero), &hex!("8200F4")[..]),
            (Err(DecodeError::MalformedLength), &hex!("B8020004")[..]),
        ])
    }

    #[test]
    fn rlp_vectors() {
        check_decode::<Vec<u64>, _>(vec![
            (Ok(vec![]), &hex!("C0")[..]),
            (Ok(vec![0xBBCCB5_u64, 0xFFC0B5_u64]), &hex!("C883BBCCB583FFC0B5")[..]),
            (Err(DecodeError::UnexpectedString), &hex!("83646f67")[..]),
        ])
    }

    #[test]
    fn strings_and_bools() {
        check_decode(vec![
            (Ok("dog".to_owned()), &hex!("83646f67")[..]),
            (Ok(String::new()), &hex!("80")[..]),
        ]);
        check_decode(vec![
            (Ok(true), &hex!("01")[..]),
            (Ok(false), &hex!("80")[..]),
            (
                Err(DecodeError::Custom("invalid bool value, must be 0 or 1")),
                &hex!("02")[..],
            ),
        ]);
    }

    #[test]
    fn exact_rejects_trailing_bytes() {
        assert_eq!(decode_exact::<u64>(hex!("0f")), Ok(15));
        assert_eq!(
            decode_exact::<u64>(hex!("0f0f")),
            Err(DecodeError::TrailingBytes)
        );
    }
}
