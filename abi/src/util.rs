//! Word-level helpers.

use ethcodec_primitives::{keccak256, U256};

use crate::Word;

/// Converts a u32 to a right aligned word.
pub fn pad_u32(value: u32) -> Word {
    pad_usize(value as usize)
}

/// Converts a usize to a right aligned word.
pub fn pad_usize(value: usize) -> Word {
    Word::from(U256::from(value))
}

/// Left-pads up to 32 bytes into a word, the layout of integers and addresses.
pub fn left_pad(bytes: &[u8]) -> Option<Word> {
    if bytes.len() > 32 {
        return None;
    }
    let mut word = Word::zero();
    word[32 - bytes.len()..].copy_from_slice(bytes);
    Some(word)
}

/// Right-pads up to 32 bytes into a word, the layout of `bytesN`.
pub fn right_pad(bytes: &[u8]) -> Option<Word> {
    if bytes.len() > 32 {
        return None;
    }
    let mut word = Word::zero();
    word[..bytes.len()].copy_from_slice(bytes);
    Some(word)
}

/// Keccak-256 of `bytes` as a word.
pub fn hash_word(bytes: &[u8]) -> Word {
    keccak256(bytes)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_pad_u32() {
        assert_eq!(
            pad_u32(0).0,
            hex!("0000000000000000000000000000000000000000000000000000000000000000")
        );
        assert_eq!(
            pad_u32(1).0,
            hex!("0000000000000000000000000000000000000000000000000000000000000001")
        );
        assert_eq!(
            pad_u32(0x100).0,
            hex!("0000000000000000000000000000000000000000000000000000000000000100")
        );
        assert_eq!(
            pad_u32(0xffffffff).0,
            hex!("00000000000000000000000000000000000000000000000000000000ffffffff")
        );
    }

    #[test]
    fn padding_direction() {
        let left = left_pad(&[0xab, 0xcd]).unwrap();
        assert_eq!(&left[30..], &[0xab, 0xcd]);
        let right = right_pad(&[0xab, 0xcd]).unwrap();
        assert_eq!(&right[..2], &[0xab, 0xcd]);
        assert!(right_pad(&[0u8; 33]).is_none());
    }
}
