use bytes::BufMut;

use crate::{length_of_length, DecodeError, EMPTY_LIST_CODE, EMPTY_STRING_CODE, SHORT_PAYLOAD_MAX};

/// The prefix of an item: whether it is a list and how long its payload is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// True for lists, false for byte strings.
    pub list: bool,
    /// Length of the payload that follows the prefix.
    pub payload_length: usize,
}

impl Header {
    /// Reads a header from the front of `buf`, advancing past the prefix.
    ///
    /// A single byte below `0x80` is its own payload: the header reports a
    /// one byte string and `buf` is left pointing at that byte.
    ///
    /// Non-minimal prefixes are rejected, as is a payload that would run past
    /// the end of `buf`.
    pub fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let prefix = *buf.first().ok_or(DecodeError::TruncatedInput)?;

        let header = match prefix {
            0x00..=0x7f => {
                return Ok(Self {
                    list: false,
                    payload_length: 1,
                })
            }
            0x80..=0xb7 => {
                *buf = &buf[1..];
                let payload_length = (prefix - EMPTY_STRING_CODE) as usize;
                if payload_length == 1 {
                    let byte = *buf.first().ok_or(DecodeError::TruncatedInput)?;
                    if byte < EMPTY_STRING_CODE {
                        return Err(DecodeError::NonCanonicalSingleByte);
                    }
                }
                Self {
                    list: false,
                    payload_length,
                }
            }
            0xb8..=0xbf => {
                *buf = &buf[1..];
                let len_of_len = (prefix - 0xb7) as usize;
                Self {
                    list: false,
                    payload_length: decode_long_length(buf, len_of_len)?,
                }
            }
            0xc0..=0xf7 => {
                *buf = &buf[1..];
                Self {
                    list: true,
                    payload_length: (prefix - EMPTY_LIST_CODE) as usize,
                }
            }
            0xf8..=0xff => {
                *buf = &buf[1..];
                let len_of_len = (prefix - 0xf7) as usize;
                Self {
                    list: true,
                    payload_length: decode_long_length(buf, len_of_len)?,
                }
            }
        };

        if buf.len() < header.payload_length {
            return Err(DecodeError::TruncatedInput);
        }

        Ok(header)
    }

    /// Writes the minimal prefix for this header.
    pub fn encode(&self, out: &mut dyn BufMut) {
        let code = if self.list {
            EMPTY_LIST_CODE
        } else {
            EMPTY_STRING_CODE
        };
        if self.payload_length <= SHORT_PAYLOAD_MAX {
            out.put_u8(code + self.payload_length as u8);
        } else {
            let len_be = self.payload_length.to_be_bytes();
            let len_be = crate::encode::zeroless_view(&len_be);
            out.put_u8(code + 0x37 + len_be.len() as u8);
            out.put_slice(len_be);
        }
    }

    /// Length of the encoded prefix.
    pub fn length(&self) -> usize {
        length_of_length(self.payload_length)
    }
}

/// Reads a big-endian payload length of `len_of_len` bytes.
fn decode_long_length(buf: &mut &[u8], len_of_len: usize) -> Result<usize, DecodeError> {
    if buf.len() < len_of_len {
        return Err(DecodeError::TruncatedInput);
    }
    let (len_bytes, rest) = buf.split_at(len_of_len);
    if len_bytes[0] == 0 || len_of_len > core::mem::size_of::<usize>() {
        return Err(DecodeError::MalformedLength);
    }
    let payload_length = len_bytes
        .iter()
        .fold(0usize, |acc, byte| (acc << 8) | *byte as usize);
    // the long form is only legal when the short form cannot express the length
    if payload_length <= SHORT_PAYLOAD_MAX {
        return Err(DecodeError::MalformedLength);
    }
    *buf = rest;
    Ok(payload_length)
}
