// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ABI decoder.

use ethcodec_primitives::{signed, U256};

use crate::{Error, ParamType, Result, Token, Word};

#[derive(Debug)]
struct DecodeResult {
    token: Token,
    new_offset: usize,
}

/// Decodes ABI compliant vector of bytes into vector of tokens described by types param.
///
/// Padding is not inspected and trailing bytes are ignored.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>> {
    decode_impl(types, data, false)
}

/// Decodes ABI compliant vector of bytes into vector of tokens described by types param.
/// Checks, that decoded data is exact as input provided
pub fn decode_validate(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>> {
    decode_impl(types, data, true)
}

fn decode_impl(types: &[ParamType], data: &[u8], validate: bool) -> Result<Vec<Token>> {
    let mut decoder = Decoder { data, validate, consumed: 0, budget: data.len() / 32 };
    let mut tokens = Vec::with_capacity(types.len());
    let mut offset = 0;
    for param in types {
        let res = decoder.decode_param(param, 0, offset)?;
        offset = res.new_offset;
        tokens.push(res.token);
    }

    if validate && decoder.consumed != data.len() {
        tracing::debug!(consumed = decoder.consumed, len = data.len(), "trailing abi data");
        return Err(Error::InvalidData)
    }

    Ok(tokens)
}

/// Reads from one buffer, remembering the furthest byte touched so strict
/// mode can reject trailing data.
///
/// Every item that reads a word of its own (a value, an offset) is charged
/// against `budget`, the number of words in the input. Offsets that point
/// several heads at the same tail run it out instead of multiplying work.
struct Decoder<'a> {
    data: &'a [u8],
    validate: bool,
    consumed: usize,
    budget: usize,
}

impl<'a> Decoder<'a> {
    fn charge(&mut self, offset: usize) -> Result<()> {
        match self.budget.checked_sub(1) {
            Some(left) => {
                self.budget = left;
                Ok(())
            }
            None => {
                tracing::debug!(offset, len = self.data.len(), "abi items outnumber input words");
                Err(Error::InvalidData)
            }
        }
    }

    fn peek(&mut self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let available = self.data.len();
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= available)
            .ok_or(Error::TruncatedInput { offset, len, available })?;
        self.consumed = self.consumed.max(end);
        Ok(&self.data[offset..end])
    }

    fn peek_32_bytes(&mut self, offset: usize) -> Result<Word> {
        self.peek(offset, 32).map(Word::from_slice)
    }

    /// Reads an offset or length word. Values that cannot index memory are
    /// treated as pointing past the end of the buffer.
    fn read_usize(&mut self, offset: usize) -> Result<usize> {
        let word = self.peek_32_bytes(offset)?;
        as_usize(&word).ok_or(Error::TruncatedInput {
            offset,
            len: usize::MAX,
            available: self.data.len(),
        })
    }

    fn take_bytes(&mut self, offset: usize, len: usize) -> Result<Vec<u8>> {
        let bytes = self.peek(offset, len)?;
        if self.validate {
            let padded_len = round_up_nearest_multiple(len, 32);
            let padding = self.peek(offset + len, padded_len - len)?;
            check_zeroes(padding)?;
        }
        Ok(bytes.to_vec())
    }

    fn decode_param(&mut self, param: &ParamType, base: usize, offset: usize) -> Result<DecodeResult> {
        let head = base.checked_add(offset).ok_or(Error::TruncatedInput {
            offset,
            len: 32,
            available: self.data.len(),
        })?;
        match param {
            ParamType::Address
            | ParamType::Int(_)
            | ParamType::Uint(_)
            | ParamType::Bool
            | ParamType::FixedBytes(_) => {
                self.charge(head)?;
                let word = self.peek_32_bytes(head)?;
                if self.validate {
                    check_word(param, &word)?;
                }
                Ok(DecodeResult { token: Token::Word(word), new_offset: offset + 32 })
            }
            ParamType::Bytes | ParamType::String => {
                self.charge(head)?;
                let tail = self.tail_offset(base, head)?;
                let len = self.read_usize(tail)?;
                let bytes = self.take_bytes(tail + 32, len)?;
                if self.validate && matches!(param, ParamType::String) {
                    core::str::from_utf8(&bytes).map_err(|_| Error::InvalidData)?;
                }
                Ok(DecodeResult { token: Token::PackedSeq(bytes), new_offset: offset + 32 })
            }
            ParamType::Array(inner) => {
                self.charge(head)?;
                let tail = self.tail_offset(base, head)?;
                let len = self.read_usize(tail)?;
                let elements = tail + 32;

                // the elements' heads alone must fit in what is left
                let available = self.data.len();
                if len
                    .checked_mul(inner.head_len().max(1))
                    .and_then(|size| size.checked_add(elements))
                    .map_or(true, |end| end > available)
                {
                    return Err(Error::TruncatedInput { offset: elements, len, available })
                }

                let mut tokens = Vec::with_capacity(len);
                let mut new_offset = 0;
                for _ in 0..len {
                    let res = self.decode_param(inner, elements, new_offset)?;
                    new_offset = res.new_offset;
                    tokens.push(res.token);
                }
                Ok(DecodeResult { token: Token::DynSeq(tokens), new_offset: offset + 32 })
            }
            ParamType::FixedArray(inner, len) => {
                // elements that read nothing cannot be bounded by the input
                if *len > 0 && inner.head_len() == 0 {
                    return Err(Error::InvalidData)
                }
                let inner = core::iter::repeat(inner.as_ref()).take(*len);
                self.decode_sequence(param, inner, base, offset, head)
            }
            ParamType::Tuple(params) => self.decode_sequence(param, params.iter(), base, offset, head),
        }
    }

    /// Decodes the components of a tuple or fixed array. Static sequences
    /// are inlined in the head; dynamic ones live behind an offset and
    /// resolve their own offsets from the start of that region.
    fn decode_sequence<'p>(
        &mut self,
        param: &ParamType,
        components: impl Iterator<Item = &'p ParamType>,
        base: usize,
        offset: usize,
        head: usize,
    ) -> Result<DecodeResult> {
        let is_dynamic = param.is_dynamic();
        let (seq_base, mut seq_offset) = if is_dynamic {
            self.charge(head)?;
            (self.tail_offset(base, head)?, 0)
        } else {
            (base, offset)
        };

        let mut tokens = vec![];
        for component in components {
            let res = self.decode_param(component, seq_base, seq_offset)?;
            seq_offset = res.new_offset;
            tokens.push(res.token);
        }

        let new_offset = if is_dynamic { offset + 32 } else { seq_offset };
        Ok(DecodeResult { token: Token::FixedSeq(tokens), new_offset })
    }

    /// Follows the offset stored at `head`, relative to `base`.
    fn tail_offset(&mut self, base: usize, head: usize) -> Result<usize> {
        let relative = self.read_usize(head)?;
        let available = self.data.len();
        base.checked_add(relative)
            .filter(|tail| *tail <= available)
            .ok_or(Error::TruncatedInput { offset: relative, len: 0, available })
    }
}

fn as_usize(word: &Word) -> Option<usize> {
    if word[..24].iter().any(|b| *b != 0) {
        return None
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(low)).ok()
}

fn check_word(param: &ParamType, word: &Word) -> Result<()> {
    let value = U256::from_be_bytes(word.0);
    let canonical = match param {
        ParamType::Address => word[..12].iter().all(|b| *b == 0),
        ParamType::Uint(bits) => signed::fits_unsigned(value, *bits),
        ParamType::Int(bits) => signed::fits_signed(value, *bits),
        ParamType::Bool => value <= U256::from(1u8),
        ParamType::FixedBytes(len) => check_fixed_bytes(word, *len).is_ok(),
        _ => true,
    };
    if canonical {
        Ok(())
    } else {
        Err(Error::InvalidData)
    }
}

fn round_up_nearest_multiple(value: usize, padding: usize) -> usize {
    (value + padding - 1) / padding * padding
}

fn check_fixed_bytes(word: &Word, len: usize) -> Result<()> {
    match len {
        0 | 33.. => Err(Error::InvalidData),
        _ => check_zeroes(&word[len..]),
    }
}

fn check_zeroes(data: &[u8]) -> Result<()> {
    if data.iter().all(|b| *b == 0) {
        Ok(())
    } else {
        Err(Error::InvalidData)
    }
}
