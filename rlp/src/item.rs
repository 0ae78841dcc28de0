use bytes::{BufMut, Bytes};

use crate::{
    decode::string_payload, length_of_length, Decodable, DecodeError, Encodable, Header,
};

/// Deepest list nesting the generic decoder accepts.
pub const MAX_DEPTH: usize = 64;

/// A generic RLP value: a byte string or a list of items.
///
/// This is the shape-only view used when the layout of a payload is not known
/// up front, e.g. to pick a transaction envelope from its field count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// A byte string, possibly empty.
    String(Bytes),
    /// An ordered list of items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// A string item.
    pub fn string(bytes: impl Into<Bytes>) -> Self {
        RlpItem::String(bytes.into())
    }

    /// A string item holding the canonical encoding of an integer or other
    /// scalar. Scalars that encode as lists are rejected.
    pub fn scalar<T: Encodable + ?Sized>(value: &T) -> Result<Self, DecodeError> {
        let mut out = Vec::with_capacity(value.length());
        value.encode(&mut out);
        let mut buf = out.as_slice();
        let payload = string_payload(&mut buf)?;
        Ok(RlpItem::String(Bytes::copy_from_slice(payload)))
    }

    /// True for byte strings.
    pub fn is_string(&self) -> bool {
        matches!(self, RlpItem::String(_))
    }

    /// True for lists.
    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// The bytes of a string item.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::String(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }

    /// The items of a list item.
    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::List(items) => Some(items),
            RlpItem::String(_) => None,
        }
    }

    /// The bytes of a string item, or `UnexpectedList`.
    pub fn expect_bytes(&self) -> Result<&[u8], DecodeError> {
        self.as_bytes().ok_or(DecodeError::UnexpectedList)
    }

    /// The items of a list item, or `UnexpectedString`.
    pub fn expect_list(&self) -> Result<&[RlpItem], DecodeError> {
        self.as_list().ok_or(DecodeError::UnexpectedString)
    }

    /// Reads this item as a typed value, applying the same canonical checks as
    /// decoding `T` from the wire.
    pub fn decode_as<T: Decodable>(&self) -> Result<T, DecodeError> {
        let mut out = Vec::with_capacity(self.length());
        self.encode(&mut out);
        crate::decode_exact(out)
    }

    /// Decodes exactly one item from `bytes`, rejecting trailing bytes.
    pub fn decode_exact(bytes: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        crate::decode_exact(bytes)
    }

    fn payload_length(&self) -> usize {
        match self {
            RlpItem::String(bytes) => bytes.len(),
            RlpItem::List(items) => items.iter().map(Encodable::length).sum(),
        }
    }

    fn decode_at_depth(buf: &mut &[u8], depth: usize) -> Result<Self, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::MaxDepthExceeded);
        }
        let mut peek = *buf;
        let h = Header::decode(&mut peek)?;
        if !h.list {
            return Ok(RlpItem::String(Bytes::copy_from_slice(string_payload(buf)?)));
        }

        let (mut payload, rest) = peek.split_at(h.payload_length);
        let mut items = Vec::new();
        while !payload.is_empty() {
            items.push(Self::decode_at_depth(&mut payload, depth + 1)?);
        }
        *buf = rest;
        Ok(RlpItem::List(items))
    }
}

impl Encodable for RlpItem {
    fn length(&self) -> usize {
        match self {
            RlpItem::String(bytes) => bytes[..].length(),
            RlpItem::List(_) => {
                let payload_length = self.payload_length();
                length_of_length(payload_length) + payload_length
            }
        }
    }

    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            RlpItem::String(bytes) => bytes[..].encode(out),
            RlpItem::List(items) => {
                Header {
                    list: true,
                    payload_length: self.payload_length(),
                }
                .encode(out);
                for item in items {
                    item.encode(out);
                }
            }
        }
    }
}

impl Decodable for RlpItem {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        Self::decode_at_depth(buf, 0)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::String(Bytes::copy_from_slice(bytes))
    }
}

impl From<&str> for RlpItem {
    fn from(text: &str) -> Self {
        RlpItem::String(Bytes::copy_from_slice(text.as_bytes()))
    }
}
