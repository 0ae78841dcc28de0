//! Signature strings and the selectors derived from them.

use ethcodec_primitives::keccak256;

use crate::{Error, Hash, ParamType, Reader, Result, Selector};

/// Renders `name(t1,t2,...)` with canonical type names.
pub fn build_signature(name: &str, params: &[ParamType]) -> String {
    let types = params.iter().map(ParamType::to_string).collect::<Vec<_>>();
    format!("{name}({})", types.join(","))
}

/// Keccak-256 of the signature string. The full hash is the topic of an
/// event; its first four bytes are the selector of a function or error.
pub fn signature_hash(signature: &str) -> Hash {
    keccak256(signature.as_bytes())
}

/// First four bytes of the hash of a function or error signature.
pub fn selector(signature: &str) -> Selector {
    let hash = signature_hash(signature);
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// [`selector`] rendered as `0x` followed by eight hex digits.
pub fn selector_hex(signature: &str) -> String {
    format!("0x{}", hex::encode(selector(signature)))
}

/// Splits `name(t1,t2)` into its name and parameter types.
pub(crate) fn parse_signature(signature: &str) -> Result<(String, Vec<ParamType>)> {
    let signature = signature.trim();
    let open = signature.find('(').ok_or_else(|| Error::UnknownType(signature.to_owned()))?;
    let name = signature[..open].trim();
    let params = signature[open..]
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| Error::UnknownType(signature.to_owned()))?;
    if name.is_empty() {
        return Err(Error::UnknownType(signature.to_owned()))
    }
    Ok((name.to_owned(), Reader::read_tuple(params)?))
}

/// Checks that `data` starts with `expected` and returns the rest.
pub(crate) fn strip_selector(expected: Selector, data: &[u8]) -> Result<&[u8]> {
    if data.len() < 4 {
        return Err(Error::TruncatedInput { offset: 0, len: 4, available: data.len() })
    }
    let (head, rest) = data.split_at(4);
    let mut got = [0u8; 4];
    got.copy_from_slice(head);
    if got != expected {
        return Err(Error::SelectorMismatch { expected, got })
    }
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn known_selectors() {
        assert_eq!(selector("transfer(address,uint256)"), hex!("a9059cbb"));
        assert_eq!(selector("balanceOf(address)"), hex!("70a08231"));
        assert_eq!(selector("approve(address,uint256)"), hex!("095ea7b3"));
        assert_eq!(selector_hex("Error(string)"), "0x08c379a0");
        assert_eq!(selector_hex("Panic(uint256)"), "0x4e487b71");
    }

    #[test]
    fn event_topic() {
        assert_eq!(
            signature_hash("Transfer(address,address,uint256)").0,
            hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
        );
    }

    #[test]
    fn builds_canonical_signatures() {
        let params = vec![
            ParamType::Address,
            ParamType::Uint(256),
            ParamType::Array(Box::new(ParamType::Tuple(vec![
                ParamType::Bool,
                ParamType::FixedBytes(32),
            ]))),
            ParamType::FixedArray(Box::new(ParamType::String), 2),
        ];
        assert_eq!(
            build_signature("submit", &params),
            "submit(address,uint256,(bool,bytes32)[],string[2])"
        );
        assert_eq!(build_signature("ping", &[]), "ping()");
    }

    #[test]
    fn selector_is_stable_for_built_signatures() {
        let params = [ParamType::Address, ParamType::Uint(256), ParamType::Uint(256)];
        let signature = build_signature("ERC20InsufficientBalance", &params);
        assert_eq!(selector(&signature), hex!("e450d38c"));
        assert_eq!(selector(&signature), selector(&signature));
    }

    #[test]
    fn parses_signatures() {
        let (name, params) = parse_signature("transfer(address, uint)").unwrap();
        assert_eq!(name, "transfer");
        assert_eq!(params, vec![ParamType::Address, ParamType::Uint(256)]);
        assert_eq!(parse_signature("f()").unwrap().1, vec![]);
        assert!(parse_signature("(uint256)").is_err());
        assert!(parse_signature("f(uint256").is_err());
    }

    #[test]
    fn strips_selectors() {
        let data = hex!("a9059cbb01");
        assert_eq!(strip_selector(hex!("a9059cbb"), &data).unwrap(), &[1]);
        assert!(matches!(
            strip_selector(hex!("70a08231"), &data),
            Err(Error::SelectorMismatch { .. })
        ));
        assert!(matches!(strip_selector(hex!("70a08231"), &[1]), Err(Error::TruncatedInput { .. })));
    }
}
