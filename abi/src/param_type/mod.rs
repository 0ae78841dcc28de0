// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Function and event param types.

mod reader;
pub use reader::Reader;

mod writer;

/// Function and event param types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address.
    Address,
    /// Bytes.
    Bytes,
    /// Signed integer of the given bit width.
    Int(usize),
    /// Unsigned integer of the given bit width.
    Uint(usize),
    /// Boolean.
    Bool,
    /// String.
    String,
    /// Array of unknown size.
    Array(Box<ParamType>),
    /// Vector of bytes with fixed size.
    FixedBytes(usize),
    /// Array with fixed size.
    FixedArray(Box<ParamType>, usize),
    /// Tuple containing different types
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Returns true if the type is encoded behind an offset.
    ///
    /// `bytes`, `string` and `T[]` always are; tuples and `T[k]` are when any
    /// component is.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(inner) => inner.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    /// Returns true for the single-word types.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            ParamType::Address
                | ParamType::Int(_)
                | ParamType::Uint(_)
                | ParamType::Bool
                | ParamType::FixedBytes(_)
        )
    }

    /// Number of head bytes a value of this type occupies. Saturates at
    /// `usize::MAX` for static arrays too large to address.
    pub fn head_len(&self) -> usize {
        match self {
            ParamType::FixedArray(inner, len) if !self.is_dynamic() => {
                inner.head_len().saturating_mul(*len)
            }
            ParamType::Tuple(inner) if !self.is_dynamic() => {
                inner.iter().map(ParamType::head_len).fold(0, usize::saturating_add)
            }
            _ => 32,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ParamType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ParamType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Reader::read(&name).map_err(serde::de::Error::custom)
    }
}
