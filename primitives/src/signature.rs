use crate::{B256, U256};

/// An ECDSA signature over secp256k1, reduced to what the wire formats carry:
/// `r`, `s` and the parity of the recovery point's y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    /// The r component.
    pub r: U256,
    /// The s component.
    pub s: U256,
    /// True when the y coordinate of R is odd.
    pub odd_y_parity: bool,
}

impl Signature {
    /// Creates a signature from its parts.
    pub const fn new(r: U256, s: U256, odd_y_parity: bool) -> Self {
        Self { r, s, odd_y_parity }
    }

    /// The y parity as the `0` or `1` written by typed transactions.
    pub const fn y_parity(&self) -> u8 {
        self.odd_y_parity as u8
    }

    /// The legacy `v` value: `27 + parity`, or `chain_id * 2 + 35 + parity`
    /// once a chain id is bound (EIP-155).
    pub fn v(&self, chain_id: Option<u64>) -> u64 {
        match chain_id {
            Some(chain_id) => chain_id * 2 + 35 + self.y_parity() as u64,
            None => 27 + self.y_parity() as u64,
        }
    }

    /// Splits a legacy `v` into the parity and the bound chain id, if any.
    /// Returns `None` for values no signer produces.
    pub fn parity_from_v(v: u64) -> Option<(bool, Option<u64>)> {
        match v {
            27 | 28 => Some((v == 28, None)),
            35.. => Some(((v - 35) % 2 == 1, Some((v - 35) / 2))),
            _ => None,
        }
    }

    /// The 65 byte `r ++ s ++ v` form with `v` of 27 or 28.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        out[32..64].copy_from_slice(&self.s.to_be_bytes::<32>());
        out[64] = 27 + self.y_parity();
        out
    }
}

/// A signer over 32 byte digests.
///
/// Transaction and typed-data hashing stop at the digest; producing the
/// signature is left to an implementation of this trait.
pub trait SignHash {
    /// Signs `hash`.
    fn sign_hash(&self, hash: B256) -> Signature;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_v() {
        let sig = Signature::new(U256::from(1u64), U256::from(2u64), true);
        assert_eq!(sig.v(None), 28);
        assert_eq!(sig.v(Some(1)), 38);
        assert_eq!(Signature::parity_from_v(38), Some((true, Some(1))));
        assert_eq!(Signature::parity_from_v(37), Some((false, Some(1))));
        assert_eq!(Signature::parity_from_v(27), Some((false, None)));
        assert_eq!(Signature::parity_from_v(1), None);
    }

    #[test]
    fn bytes_layout() {
        let sig = Signature::new(U256::from(1u64), U256::from(2u64), false);
        let bytes = sig.to_bytes();
        assert_eq!(bytes[31], 1);
        assert_eq!(bytes[63], 2);
        assert_eq!(bytes[64], 27);
    }
}
