// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ABI encoder.

use crate::{util::pad_usize, Bytes, Error, ParamType, Result, Token, Word};

fn pad_bytes_len(bytes: &[u8]) -> usize {
    // "+ 1" because len is also appended
    (bytes.len() + 31) / 32 + 1
}

fn pad_bytes_append(data: &mut Vec<Word>, bytes: &[u8]) {
    data.push(pad_usize(bytes.len()));
    for chunk in bytes.chunks(32) {
        let mut padded = Word::default();
        padded[..chunk.len()].copy_from_slice(chunk);
        data.push(padded);
    }
}

#[derive(Debug)]
enum Mediate<'a> {
    // head
    Raw(&'a Word),
    RawArray(Vec<Mediate<'a>>),

    // head + tail
    Prefixed(&'a [u8]),
    PrefixedArray(Vec<Mediate<'a>>),
    PrefixedArrayWithLength(Vec<Mediate<'a>>),
}

impl Mediate<'_> {
    fn head_len(&self) -> usize {
        match self {
            Mediate::Raw(_) => 32,
            Mediate::RawArray(mediates) => mediates.iter().map(Mediate::head_len).sum(),
            Mediate::Prefixed(_) | Mediate::PrefixedArray(_) | Mediate::PrefixedArrayWithLength(_) => {
                32
            }
        }
    }

    fn tail_len(&self) -> usize {
        match self {
            Mediate::Raw(_) | Mediate::RawArray(_) => 0,
            Mediate::Prefixed(bytes) => 32 * pad_bytes_len(bytes),
            Mediate::PrefixedArray(mediates) => {
                mediates.iter().fold(0, |acc, m| acc + m.head_len() + m.tail_len())
            }
            Mediate::PrefixedArrayWithLength(mediates) => {
                mediates.iter().fold(32, |acc, m| acc + m.head_len() + m.tail_len())
            }
        }
    }

    fn head_append(&self, acc: &mut Vec<Word>, suffix_offset: usize) {
        match self {
            Mediate::Raw(word) => acc.push(**word),
            Mediate::RawArray(raw) => raw.iter().for_each(|mediate| mediate.head_append(acc, 0)),
            Mediate::Prefixed(_) | Mediate::PrefixedArray(_) | Mediate::PrefixedArrayWithLength(_) => {
                acc.push(pad_usize(suffix_offset))
            }
        }
    }

    fn tail_append(&self, acc: &mut Vec<Word>) {
        match self {
            Mediate::Raw(_) | Mediate::RawArray(_) => {}
            Mediate::Prefixed(bytes) => pad_bytes_append(acc, bytes),
            Mediate::PrefixedArray(mediates) => encode_head_tail_append(acc, mediates),
            Mediate::PrefixedArrayWithLength(mediates) => {
                // the length word precedes the elements, whose offsets are
                // relative to the word after it
                acc.push(pad_usize(mediates.len()));
                encode_head_tail_append(acc, mediates);
            }
        };
    }
}

/// Encodes vector of tokens into ABI compliant vector of bytes.
///
/// The layout follows the shape of the tokens alone. Use [`encode_params`]
/// when the declared types are known.
pub fn encode(tokens: &[Token]) -> Bytes {
    let mediates = tokens.iter().map(mediate_token).collect::<Vec<_>>();
    flatten(encode_head_tail(&mediates))
}

/// Type checks `tokens` against `params`, then encodes them as a parameter
/// list.
pub fn encode_params(params: &[ParamType], tokens: &[Token]) -> Result<Bytes> {
    if params.len() != tokens.len() {
        return Err(Error::TypeMismatch(format!(
            "{} values supplied for {} parameters",
            tokens.len(),
            params.len()
        )))
    }
    let mediates = params
        .iter()
        .zip(tokens)
        .map(|(param, token)| mediate_param(param, token))
        .collect::<Result<Vec<_>>>()?;

    let encoded = flatten(encode_head_tail(&mediates));
    tracing::trace!(params = params.len(), len = encoded.len(), "abi encoded parameters");
    Ok(encoded)
}

fn flatten(words: Vec<Word>) -> Bytes {
    words.into_iter().flat_map(Into::<[u8; 32]>::into).collect()
}

fn encode_head_tail(mediates: &[Mediate<'_>]) -> Vec<Word> {
    let (heads_len, tails_len) = mediates.iter().fold((0, 0), |(head_acc, tail_acc), m| {
        (head_acc + m.head_len(), tail_acc + m.tail_len())
    });

    let mut result = Vec::with_capacity((heads_len + tails_len) / 32);
    encode_head_tail_append(&mut result, mediates);

    result
}

fn encode_head_tail_append(acc: &mut Vec<Word>, mediates: &[Mediate<'_>]) {
    let heads_len = mediates.iter().fold(0, |head_acc, m| head_acc + m.head_len());

    let mut offset = heads_len;
    for mediate in mediates {
        mediate.head_append(acc, offset);
        offset += mediate.tail_len();
    }

    mediates.iter().for_each(|m| m.tail_append(acc));
}

fn mediate_token(token: &Token) -> Mediate<'_> {
    match token {
        Token::Word(word) => Mediate::Raw(word),
        Token::FixedSeq(tokens) => {
            let mediates = tokens.iter().map(mediate_token).collect();

            if token.is_dynamic() {
                Mediate::PrefixedArray(mediates)
            } else {
                Mediate::RawArray(mediates)
            }
        }
        Token::DynSeq(tokens) => {
            Mediate::PrefixedArrayWithLength(tokens.iter().map(mediate_token).collect())
        }
        Token::PackedSeq(seq) => Mediate::Prefixed(seq),
    }
}

fn mediate_param<'a>(param: &ParamType, token: &'a Token) -> Result<Mediate<'a>> {
    if !token.type_check(param) {
        return Err(Error::mismatch(param, token))
    }
    let mediate = match (param, token) {
        (ParamType::Array(inner), Token::DynSeq(tokens)) => Mediate::PrefixedArrayWithLength(
            tokens.iter().map(|t| mediate_param(inner, t)).collect::<Result<_>>()?,
        ),
        (ParamType::FixedArray(inner, _), Token::FixedSeq(tokens)) => {
            let mediates = tokens.iter().map(|t| mediate_param(inner, t)).collect::<Result<_>>()?;
            if param.is_dynamic() {
                Mediate::PrefixedArray(mediates)
            } else {
                Mediate::RawArray(mediates)
            }
        }
        (ParamType::Tuple(params), Token::FixedSeq(tokens)) => {
            let mediates = params
                .iter()
                .zip(tokens)
                .map(|(p, t)| mediate_param(p, t))
                .collect::<Result<_>>()?;
            if param.is_dynamic() {
                Mediate::PrefixedArray(mediates)
            } else {
                Mediate::RawArray(mediates)
            }
        }
        (_, Token::Word(word)) => Mediate::Raw(word),
        (_, Token::PackedSeq(bytes)) => Mediate::Prefixed(bytes),
        _ => return Err(Error::mismatch(param, token)),
    };
    Ok(mediate)
}

#[cfg(test)]
mod tests {
    use ethcodec_primitives::{B160, U256};
    use hex_literal::hex;

    use crate::{encode, encode_params, util::pad_u32, Error, ParamType, Reader, Token};

    fn address(byte: u8) -> Token {
        Token::address(B160::repeat_byte(byte))
    }

    fn types(names: &[&str]) -> Vec<ParamType> {
        names.iter().map(|name| Reader::read(name).unwrap()).collect()
    }

    #[test]
    fn encode_address() {
        let encoded = encode(&[address(0x11)]);
        let expected = hex!("0000000000000000000000001111111111111111111111111111111111111111");
        assert_eq!(encoded, expected);
    }

    #[test]
    fn encode_dynamic_array_of_addresses() {
        let addresses = Token::DynSeq(vec![address(0x11), address(0x22)]);
        let encoded = encode(&[addresses]);
        let expected = hex!(
            "
			0000000000000000000000000000000000000000000000000000000000000020
			0000000000000000000000000000000000000000000000000000000000000002
			0000000000000000000000001111111111111111111111111111111111111111
			0000000000000000000000002222222222222222222222222222222222222222
		"
        )
        .to_vec();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn encode_fixed_array_of_dynamic_array_of_addresses() {
        let array0 = Token::DynSeq(vec![address(0x11), address(0x22)]);
        let array1 = Token::DynSeq(vec![address(0x33), address(0x44)]);
        let fixed = Token::FixedSeq(vec![array0, array1]);
        let expected = hex!(
            "
			0000000000000000000000000000000000000000000000000000000000000020
			0000000000000000000000000000000000000000000000000000000000000040
			00000000000000000000000000000000000000000000000000000000000000a0
			0000000000000000000000000000000000000000000000000000000000000002
			0000000000000000000000001111111111111111111111111111111111111111
			0000000000000000000000002222222222222222222222222222222222222222
			0000000000000000000000000000000000000000000000000000000000000002
			0000000000000000000000003333333333333333333333333333333333333333
			0000000000000000000000004444444444444444444444444444444444444444
		"
        )
        .to_vec();
        assert_eq!(encode(&[fixed.clone()]), expected);
        assert_eq!(encode_params(&types(&["address[][2]"]), &[fixed]).unwrap(), expected);
    }

    #[test]
    fn encode_fixed_array_of_static_tuples_followed_by_dynamic_type() {
        let tuple1 = Token::FixedSeq(vec![
            Token::Word(pad_u32(93523141)),
            Token::Word(pad_u32(352332135)),
            address(0x44),
        ]);
        let tuple2 =
            Token::FixedSeq(vec![Token::Word(pad_u32(12411)), Token::Word(pad_u32(451)), address(0x22)]);
        let fixed = Token::FixedSeq(vec![tuple1, tuple2]);
        let s = Token::string("gavofyork");
        let expected = hex!(
            "
			0000000000000000000000000000000000000000000000000000000005930cc5
			0000000000000000000000000000000000000000000000000000000015002967
			0000000000000000000000004444444444444444444444444444444444444444
			000000000000000000000000000000000000000000000000000000000000307b
			00000000000000000000000000000000000000000000000000000000000001c3
			0000000000000000000000002222222222222222222222222222222222222222
			00000000000000000000000000000000000000000000000000000000000000e0
			0000000000000000000000000000000000000000000000000000000000000009
			6761766f66796f726b0000000000000000000000000000000000000000000000
		"
        )
        .to_vec();
        assert_eq!(encode(&[fixed.clone(), s.clone()]), expected);
        let params = types(&["(uint32,uint32,address)[2]", "string"]);
        assert_eq!(encode_params(&params, &[fixed, s]).unwrap(), expected);
    }

    #[test]
    fn encode_empty_array() {
        let encoded = encode(&[Token::DynSeq(vec![]), Token::DynSeq(vec![])]);
        let expected = hex!(
            "
			0000000000000000000000000000000000000000000000000000000000000040
			0000000000000000000000000000000000000000000000000000000000000060
			0000000000000000000000000000000000000000000000000000000000000000
			0000000000000000000000000000000000000000000000000000000000000000
		"
        )
        .to_vec();
        assert_eq!(encoded, expected);

        let encoded = encode(&[
            Token::DynSeq(vec![Token::DynSeq(vec![])]),
            Token::DynSeq(vec![Token::DynSeq(vec![])]),
        ]);
        let expected = hex!(
            "
			0000000000000000000000000000000000000000000000000000000000000040
			00000000000000000000000000000000000000000000000000000000000000a0
			0000000000000000000000000000000000000000000000000000000000000001
			0000000000000000000000000000000000000000000000000000000000000020
			0000000000000000000000000000000000000000000000000000000000000000
			0000000000000000000000000000000000000000000000000000000000000001
			0000000000000000000000000000000000000000000000000000000000000020
			0000000000000000000000000000000000000000000000000000000000000000
		"
        )
        .to_vec();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn encode_bytes_across_word_boundary() {
        let bytes = hex!(
            "
			131a3afc00d1b1e3461b955e53fc866dcf303b3eb9f4c16f89e388930f48134b
			1000000000000000000000000000000000000000000000000000000000000000
			1000000000000000000000000000000000000000000000000000000000000000
		"
        )
        .to_vec();
        let encoded = encode(&[Token::bytes(&bytes[..33]), Token::bytes(&bytes[..32])]);
        let expected = hex!(
            "
			0000000000000000000000000000000000000000000000000000000000000040
			00000000000000000000000000000000000000000000000000000000000000a0
			0000000000000000000000000000000000000000000000000000000000000021
			131a3afc00d1b1e3461b955e53fc866dcf303b3eb9f4c16f89e388930f48134b
			1000000000000000000000000000000000000000000000000000000000000000
			0000000000000000000000000000000000000000000000000000000000000020
			131a3afc00d1b1e3461b955e53fc866dcf303b3eb9f4c16f89e388930f48134b
		"
        )
        .to_vec();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn two_dynamic_arrays_point_past_the_head() {
        let address = hex!("e483dea6aa7d3831173379d81e5c08874f1042e7");
        let uint = |v: u32| Token::Word(pad_u32(v));
        let tokens = vec![
            Token::address(address.into()),
            Token::DynSeq(vec![uint(0), uint(1)]),
            Token::DynSeq(vec![uint(0), uint(0)]),
            uint(1742919454),
            uint(1743005854),
            uint(82),
        ];
        let params = types(&["address", "uint256[]", "uint256[]", "uint128", "uint128", "uint256"]);
        let encoded = encode_params(&params, &tokens).unwrap();
        assert_eq!(encoded, encode(&tokens));

        // six head words, then each array as length and two elements
        assert_eq!(encoded.len(), 192 + 96 + 96);
        assert_eq!(encoded[44..64], address);
        assert_eq!(encoded[64..96], pad_u32(192).0);
        assert_eq!(encoded[96..128], pad_u32(192 + 96).0);
        assert_eq!(encoded[192..224], pad_u32(2).0);
        assert_eq!(encoded[256..288], pad_u32(1).0);
    }

    #[test]
    fn encode_signed_and_bool() {
        let encoded = encode_params(
            &[ParamType::Int(8), ParamType::Bool],
            &[Token::int(-1), Token::bool(true)],
        )
        .unwrap();
        let expected = hex!(
            "
			ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff
			0000000000000000000000000000000000000000000000000000000000000001
		"
        );
        assert_eq!(encoded, expected.to_vec());
    }

    #[test]
    fn encode_params_rejects_mismatches() {
        let err = encode_params(&[ParamType::Uint(8)], &[Token::uint(U256::from(256u64))]);
        assert!(matches!(err, Err(Error::TypeMismatch(_))));

        let err = encode_params(&[ParamType::Bytes], &[Token::Word(pad_u32(1))]);
        assert!(matches!(err, Err(Error::TypeMismatch(_))));

        let err = encode_params(&[ParamType::Bool, ParamType::Bool], &[Token::bool(true)]);
        assert!(matches!(err, Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn encode_params_uses_declared_dynamism() {
        // an empty fixed array of strings is still behind an offset
        let param = ParamType::FixedArray(Box::new(ParamType::String), 0);
        let token = Token::FixedSeq(vec![]);
        assert_eq!(encode(&[token.clone()]), Vec::<u8>::new());
        assert_eq!(encode_params(&[param], &[token]).unwrap(), pad_u32(32).0.to_vec());
    }
}
