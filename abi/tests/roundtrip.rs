use ethcodec_abi::{decode_validate, encode, encode_params, ParamType, Reader, Token};
use ethcodec_primitives::{B160, B256};
use proptest::{collection::vec, prelude::*};

fn param_strategy() -> impl Strategy<Value = ParamType> {
    let leaf = prop_oneof![
        Just(ParamType::Address),
        Just(ParamType::Bool),
        Just(ParamType::Bytes),
        Just(ParamType::String),
        (1..=32usize).prop_map(|n| ParamType::Uint(n * 8)),
        (1..=32usize).prop_map(|n| ParamType::Int(n * 8)),
        (1..=32usize).prop_map(ParamType::FixedBytes),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|p| ParamType::Array(Box::new(p))),
            (inner.clone(), 1..4usize).prop_map(|(p, k)| ParamType::FixedArray(Box::new(p), k)),
            vec(inner, 1..4).prop_map(ParamType::Tuple),
        ]
    })
}

fn word_with(bytes: [u8; 32], keep: usize, fill: u8) -> Token {
    let mut word = B256(bytes);
    word[..32 - keep].iter_mut().for_each(|b| *b = fill);
    Token::Word(word)
}

fn token_for(param: &ParamType) -> BoxedStrategy<Token> {
    match param {
        ParamType::Address => any::<[u8; 20]>().prop_map(|a| Token::address(B160(a))).boxed(),
        ParamType::Bool => any::<bool>().prop_map(Token::bool).boxed(),
        ParamType::Bytes => vec(any::<u8>(), 0..80).prop_map(Token::bytes).boxed(),
        ParamType::String => ".{0,40}".prop_map(Token::string).boxed(),
        ParamType::Uint(bits) => {
            let keep = bits / 8;
            any::<[u8; 32]>().prop_map(move |w| word_with(w, keep, 0)).boxed()
        }
        ParamType::Int(bits) => {
            let keep = bits / 8;
            any::<[u8; 32]>()
                .prop_map(move |w| {
                    let fill = if w[32 - keep] & 0x80 != 0 { 0xff } else { 0 };
                    word_with(w, keep, fill)
                })
                .boxed()
        }
        ParamType::FixedBytes(len) => {
            let len = *len;
            any::<[u8; 32]>()
                .prop_map(move |mut w| {
                    w[len..].iter_mut().for_each(|b| *b = 0);
                    Token::Word(B256(w))
                })
                .boxed()
        }
        ParamType::Array(inner) => vec(token_for(inner), 0..4).prop_map(Token::DynSeq).boxed(),
        ParamType::FixedArray(inner, len) => {
            vec(token_for(inner), *len).prop_map(Token::FixedSeq).boxed()
        }
        ParamType::Tuple(params) => {
            params.iter().map(token_for).collect::<Vec<_>>().prop_map(Token::FixedSeq).boxed()
        }
    }
}

fn params_and_tokens() -> impl Strategy<Value = (Vec<ParamType>, Vec<Token>)> {
    vec(param_strategy(), 0..4).prop_flat_map(|params| {
        let tokens = params.iter().map(token_for).collect::<Vec<_>>();
        (Just(params), tokens)
    })
}

proptest! {
    #[test]
    fn encode_then_decode_validate((params, tokens) in params_and_tokens()) {
        let encoded = encode_params(&params, &tokens).unwrap();
        prop_assert_eq!(encoded.len() % 32, 0);
        prop_assert_eq!(&encode(&tokens), &encoded);
        prop_assert_eq!(decode_validate(&params, &encoded).unwrap(), tokens);
    }

    #[test]
    fn type_names_round_trip(param in param_strategy()) {
        prop_assert_eq!(Reader::read(&param.to_string()).unwrap(), param);
    }
}

#[test]
fn empty_values() {
    let params = [
        ParamType::String,
        ParamType::Bytes,
        ParamType::Array(Box::new(ParamType::Uint(256))),
    ];
    let tokens = vec![Token::string(""), Token::bytes(vec![]), Token::DynSeq(vec![])];
    let encoded = encode_params(&params, &tokens).unwrap();
    assert_eq!(encoded.len(), 6 * 32);
    assert_eq!(decode_validate(&params, &encoded).unwrap(), tokens);
}
