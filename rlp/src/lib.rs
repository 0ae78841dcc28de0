#![warn(missing_docs)]

//! Recursive length prefix encoding.
//!
//! Every item is either a byte string or a list of items. The prefix of an
//! item is the unique minimal prefix for its payload length; the decoder
//! rejects anything else.

mod decode;
pub use decode::{decode_exact, Decodable, DecodeError};

mod encode;
pub use encode::{
    encode_fixed_size, encode_iter, encode_list, length_of_length, list_length, Encodable,
    MaxEncodedLen, MaxEncodedLenAssoc,
};

mod header;
pub use header::Header;

mod item;
pub use item::{RlpItem, MAX_DEPTH};

pub use bytes::{BufMut, Bytes, BytesMut};

/// Prefix of the empty string, and the base of short string prefixes.
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// Prefix of the empty list, and the base of short list prefixes.
pub const EMPTY_LIST_CODE: u8 = 0xC0;

/// Longest payload that fits a single byte prefix.
pub const SHORT_PAYLOAD_MAX: usize = 55;
