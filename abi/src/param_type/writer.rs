// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::fmt;

use super::ParamType;

/// Writes the canonical name used in signatures: `uint256` rather than
/// `uint`, tuples as a parenthesized component list.
impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::Int(len) => write!(f, "int{len}"),
            ParamType::Uint(len) => write!(f, "uint{len}"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::String => f.write_str("string"),
            ParamType::FixedBytes(len) => write!(f, "bytes{len}"),
            ParamType::Array(inner) => write!(f, "{inner}[]"),
            ParamType::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            ParamType::Tuple(inner) => {
                f.write_str("(")?;
                for (i, param) in inner.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParamType, Reader};

    #[test]
    fn test_write_param() {
        assert_eq!(ParamType::Address.to_string(), "address");
        assert_eq!(ParamType::Bytes.to_string(), "bytes");
        assert_eq!(ParamType::FixedBytes(32).to_string(), "bytes32");
        assert_eq!(ParamType::Uint(256).to_string(), "uint256");
        assert_eq!(ParamType::Int(64).to_string(), "int64");
        assert_eq!(ParamType::Bool.to_string(), "bool");
        assert_eq!(ParamType::String.to_string(), "string");
        assert_eq!(ParamType::Array(Box::new(ParamType::Bool)).to_string(), "bool[]");
        assert_eq!(
            ParamType::FixedArray(Box::new(ParamType::String), 2).to_string(),
            "string[2]"
        );
        assert_eq!(
            ParamType::FixedArray(Box::new(ParamType::Array(Box::new(ParamType::Bool))), 2)
                .to_string(),
            "bool[][2]"
        );
        assert_eq!(
            ParamType::Array(Box::new(ParamType::Tuple(vec![
                ParamType::Uint(256),
                ParamType::Address
            ])))
            .to_string(),
            "(uint256,address)[]"
        );
    }

    #[test]
    fn aliases_write_canonically() {
        assert_eq!(Reader::read("uint").unwrap().to_string(), "uint256");
        assert_eq!(Reader::read("( int , byte )[]").unwrap().to_string(), "(int256,bytes1)[]");
    }
}
