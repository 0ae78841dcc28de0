// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::{Error, ParamType, Result};

/// Used to convert param type represented as a string to rust structure.
pub struct Reader;

impl Reader {
    /// Converts string to param type.
    ///
    /// Accepts canonical names as well as the `uint`, `int` and `byte`
    /// aliases. Whitespace around the name and its tuple components is
    /// ignored.
    pub fn read(name: &str) -> Result<ParamType> {
        let name = name.trim();

        // arrays are read outermost suffix first, so `T[2][]` is an array of `T[2]`
        if let Some(stripped) = name.strip_suffix(']') {
            let open = stripped.rfind('[').ok_or_else(|| Error::UnknownType(name.to_owned()))?;
            let inner = Box::new(Reader::read(&stripped[..open])?);
            let size = &stripped[open + 1..];
            if size.is_empty() {
                return Ok(ParamType::Array(inner))
            }
            // elements must occupy head space and the whole head must be addressable
            return match size.parse::<usize>() {
                Ok(len) if len > 0 && inner.head_len().checked_mul(len).map_or(false, |n| n > 0) => {
                    Ok(ParamType::FixedArray(inner, len))
                }
                _ => Err(Error::UnknownType(name.to_owned())),
            }
        }

        if let Some(body) = name.strip_prefix('(').and_then(|n| n.strip_suffix(')')) {
            return Reader::read_tuple(body).map(ParamType::Tuple)
        }

        let param = match name {
            "address" => ParamType::Address,
            "bytes" => ParamType::Bytes,
            "bool" => ParamType::Bool,
            "string" => ParamType::String,
            "int" => ParamType::Int(256),
            "uint" => ParamType::Uint(256),
            "byte" => ParamType::FixedBytes(1),
            s if s.starts_with("uint") => ParamType::Uint(read_bits(name, &s[4..])?),
            s if s.starts_with("int") => ParamType::Int(read_bits(name, &s[3..])?),
            s if s.starts_with("bytes") => {
                let len = s[5..].parse::<usize>().map_err(|_| Error::UnknownType(name.to_owned()))?;
                if !(1..=32).contains(&len) {
                    return Err(Error::UnknownType(name.to_owned()))
                }
                ParamType::FixedBytes(len)
            }
            _ => return Err(Error::UnknownType(name.to_owned())),
        };
        Ok(param)
    }

    /// Splits a comma separated component list at the top nesting level and
    /// reads each component.
    pub fn read_tuple(body: &str) -> Result<Vec<ParamType>> {
        if body.trim().is_empty() {
            return Ok(vec![])
        }

        let mut components = vec![];
        let mut depth = 0usize;
        let mut last = 0;
        for (pos, c) in body.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.checked_sub(1).ok_or_else(|| Error::UnknownType(body.to_owned()))?
                }
                ',' if depth == 0 => {
                    components.push(Reader::read(&body[last..pos])?);
                    last = pos + 1;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(Error::UnknownType(body.to_owned()))
        }
        components.push(Reader::read(&body[last..])?);
        Ok(components)
    }
}

fn read_bits(name: &str, digits: &str) -> Result<usize> {
    match digits.parse::<usize>() {
        Ok(bits) if bits > 0 && bits <= 256 && bits % 8 == 0 => Ok(bits),
        _ => Err(Error::UnknownType(name.to_owned())),
    }
}
