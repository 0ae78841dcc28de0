use ethcodec_primitives::{signed, B160, B256, U128, U256, U64};

use crate::{encode, Address, Error, ParamType, Result, Token, Word};

/// Convert a rust value to a token
pub trait Tokenize {
    /// Convert to tokens
    fn to_token(&self) -> Token;

    /// ABI encode
    fn encode(&self) -> Vec<u8> {
        encode(&[self.to_token()])
    }

    /// Hex encode
    fn encode_hex(&self) -> String {
        hex::encode(self.encode())
    }

    /// Hex with selector
    fn encode_hex_with_selector(&self, selector: [u8; 4]) -> String {
        hex::encode(self.encode_with_selector(selector))
    }

    /// ABI encode with a selector
    fn encode_with_selector(&self, selector: [u8; 4]) -> Vec<u8> {
        let mut v = Vec::from(selector);
        v.extend(self.encode());
        v
    }
}

/// Convert a decoded token back to a rust value
pub trait Detokenize: Sized {
    /// Read the value out of a token, failing on the wrong shape or width
    fn from_token(token: Token) -> Result<Self>;
}

macro_rules! impl_tokenize_ints {
    ($int:ty, $uint:ty) => {
        impl Tokenize for $int {
            fn to_token(&self) -> Token {
                Token::int(*self as i128)
            }
        }

        impl Tokenize for $uint {
            fn to_token(&self) -> Token {
                Token::uint(U256::from(*self))
            }
        }

        impl Detokenize for $uint {
            fn from_token(token: Token) -> Result<Self> {
                let value = U256::from_token(token)?;
                if value.bit_len() > <$uint>::BITS as usize {
                    return Err(Error::mismatch(&ParamType::Uint(<$uint>::BITS as usize), value))
                }
                let limbs = value.as_limbs();
                Ok((((limbs[1] as u128) << 64) | limbs[0] as u128) as $uint)
            }
        }
    };
}

impl_tokenize_ints!(i8, u8);
impl_tokenize_ints!(i16, u16);
impl_tokenize_ints!(i32, u32);
impl_tokenize_ints!(i64, u64);
impl_tokenize_ints!(i128, u128);

impl Tokenize for &str {
    fn to_token(&self) -> Token {
        Token::string(*self)
    }
}

impl Tokenize for String {
    fn to_token(&self) -> Token {
        Token::string(self.as_str())
    }
}

impl<T, const N: usize> Tokenize for [T; N]
where
    T: Tokenize,
{
    fn to_token(&self) -> Token {
        Token::FixedSeq(self.iter().map(Tokenize::to_token).collect())
    }
}

impl<T> Tokenize for Vec<T>
where
    T: Tokenize,
{
    fn to_token(&self) -> Token {
        Token::DynSeq(self.iter().map(Tokenize::to_token).collect())
    }
}

impl Tokenize for bool {
    fn to_token(&self) -> Token {
        Token::bool(*self)
    }
}

impl Tokenize for B160 {
    fn to_token(&self) -> Token {
        Token::address(*self)
    }
}

impl Tokenize for B256 {
    fn to_token(&self) -> Token {
        Token::Word(*self)
    }
}

impl Tokenize for U64 {
    fn to_token(&self) -> Token {
        let mut word = Word::default();
        word[24..].copy_from_slice(&self.to_be_bytes::<8>());
        Token::Word(word)
    }
}

impl Tokenize for U128 {
    fn to_token(&self) -> Token {
        let mut word = Word::default();
        word[16..].copy_from_slice(&self.to_be_bytes::<16>());
        Token::Word(word)
    }
}

impl Tokenize for U256 {
    fn to_token(&self) -> Token {
        Token::uint(*self)
    }
}

macro_rules! impl_tokenize_tuples {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Tokenize),+> Tokenize for ($($name,)+) {
            fn to_token(&self) -> Token {
                Token::FixedSeq(vec![$(self.$idx.to_token()),+])
            }
        }

        impl<$($name: Detokenize),+> Detokenize for ($($name,)+) {
            fn from_token(token: Token) -> Result<Self> {
                let mut tokens = expect_fixed_seq(token)?.into_iter();
                let value = ($(
                    $name::from_token(tokens.next().ok_or_else(|| {
                        Error::TypeMismatch(format!("tuple is missing element {}", $idx))
                    })?)?,
                )+);
                if tokens.next().is_some() {
                    return Err(Error::TypeMismatch("tuple has extra elements".to_owned()))
                }
                Ok(value)
            }
        }
    };
}

impl_tokenize_tuples!(A: 0);
impl_tokenize_tuples!(A: 0, B: 1);
impl_tokenize_tuples!(A: 0, B: 1, C: 2);
impl_tokenize_tuples!(A: 0, B: 1, C: 2, D: 3);
impl_tokenize_tuples!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tokenize_tuples!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

fn expect_fixed_seq(token: Token) -> Result<Vec<Token>> {
    match token {
        Token::FixedSeq(tokens) => Ok(tokens),
        other => Err(Error::TypeMismatch(format!("expected a tuple, found {other}"))),
    }
}

fn expect_word(param: &ParamType, token: Token) -> Result<Word> {
    match token {
        Token::Word(word) => Ok(word),
        other => Err(Error::mismatch(param, other)),
    }
}

impl Detokenize for Token {
    fn from_token(token: Token) -> Result<Self> {
        Ok(token)
    }
}

impl Detokenize for U256 {
    fn from_token(token: Token) -> Result<Self> {
        expect_word(&ParamType::Uint(256), token).map(|word| U256::from_be_bytes(word.0))
    }
}

impl Detokenize for B256 {
    fn from_token(token: Token) -> Result<Self> {
        expect_word(&ParamType::FixedBytes(32), token)
    }
}

impl Detokenize for Address {
    fn from_token(token: Token) -> Result<Self> {
        let word = expect_word(&ParamType::Address, token)?;
        if !Token::Word(word).type_check(&ParamType::Address) {
            return Err(Error::mismatch(&ParamType::Address, word))
        }
        Ok(Address::from_slice(&word[12..]))
    }
}

impl Detokenize for bool {
    fn from_token(token: Token) -> Result<Self> {
        let word = expect_word(&ParamType::Bool, token)?;
        match U256::from_be_bytes(word.0) {
            value if value == U256::ZERO => Ok(false),
            value if value == U256::from(1u8) => Ok(true),
            value => Err(Error::mismatch(&ParamType::Bool, value)),
        }
    }
}

impl Detokenize for i128 {
    fn from_token(token: Token) -> Result<Self> {
        let word = expect_word(&ParamType::Int(128), token)?;
        let value = U256::from_be_bytes(word.0);
        if !signed::fits_signed(value, 128) {
            return Err(Error::mismatch(&ParamType::Int(128), value))
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&word[16..]);
        Ok(i128::from_be_bytes(low))
    }
}

impl Detokenize for String {
    fn from_token(token: Token) -> Result<Self> {
        match token {
            Token::PackedSeq(bytes) => String::from_utf8(bytes)
                .map_err(|e| Error::TypeMismatch(format!("string is not utf-8: {e}"))),
            other => Err(Error::mismatch(&ParamType::String, other)),
        }
    }
}

impl<T: Detokenize> Detokenize for Vec<T> {
    fn from_token(token: Token) -> Result<Self> {
        match token {
            Token::DynSeq(tokens) => tokens.into_iter().map(T::from_token).collect(),
            other => Err(Error::TypeMismatch(format!("expected an array, found {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use ethcodec_primitives::{B160, U256};
    use hex_literal::hex;

    use crate::{decode, Detokenize, ParamType, Token, Tokenize};

    #[test]
    fn negative_ints_are_sign_extended() {
        assert_eq!(
            (-1i8).encode(),
            hex!("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff").to_vec()
        );
        assert_eq!(
            (-2i64).to_token(),
            Token::Word(hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe").into())
        );
        assert_eq!(5i32.to_token(), 5u32.to_token());
    }

    #[test]
    fn encode_bool() {
        assert_eq!(
            true.encode(),
            hex!("0000000000000000000000000000000000000000000000000000000000000001").to_vec()
        );
        assert_eq!(false.encode(), [0u8; 32].to_vec());
    }

    #[test]
    fn tuple_round_trip() {
        let address = B160::repeat_byte(0x11);
        let value = (address, U256::from(42u64), "hello".to_owned());
        let params = [ParamType::Tuple(vec![ParamType::Address, ParamType::Uint(256), ParamType::String])];
        let mut tokens = decode(&params, &value.encode()).unwrap();
        let decoded = <(B160, U256, String)>::from_token(tokens.remove(0)).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn detokenize_checks_width() {
        assert_eq!(u8::from_token(Token::uint(U256::from(255u64))).unwrap(), 255);
        assert!(u8::from_token(Token::uint(U256::from(256u64))).is_err());
        assert!(bool::from_token(Token::uint(U256::from(2u64))).is_err());
        assert_eq!(i128::from_token((-7i64).to_token()).unwrap(), -7);
        assert!(String::from_token(Token::Word(Default::default())).is_err());
    }

    #[test]
    fn selector_prefix() {
        let encoded = 1u8.encode_with_selector([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(&encoded[..4], &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(encoded.len(), 36);
        assert!(1u8.encode_hex_with_selector([0xde, 0xad, 0xbe, 0xef]).starts_with("deadbeef"));
    }
}
