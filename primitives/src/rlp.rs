use bytes::BufMut;
use ethcodec_rlp::{Decodable, DecodeError, Encodable};

use crate::{B160, B256, B512};

macro_rules! impl_fixed_hash_rlp {
    ($t:ty, $n:literal) => {
        impl Encodable for $t {
            fn length(&self) -> usize {
                $n + ethcodec_rlp::length_of_length($n)
            }

            fn encode(&self, out: &mut dyn BufMut) {
                self.0.encode(out)
            }
        }

        impl Decodable for $t {
            fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
                <[u8; $n]>::decode(buf).map(Self)
            }
        }
    };
}

impl_fixed_hash_rlp!(B160, 20);
impl_fixed_hash_rlp!(B256, 32);
impl_fixed_hash_rlp!(B512, 64);

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn address_round_trip() {
        let address = B160(hex!("3535353535353535353535353535353535353535"));
        let mut out = vec![];
        address.encode(&mut out);
        assert_eq!(out[0], 0x94);
        assert_eq!(out.len(), address.length());
        assert_eq!(B160::decode(&mut out.as_slice()).unwrap(), address);
    }

    #[test]
    fn short_hash_is_rejected() {
        let mut encoded = vec![0x93];
        encoded.extend([0x35u8; 19]);
        assert_eq!(
            B160::decode(&mut encoded.as_slice()),
            Err(DecodeError::UnexpectedLength)
        );
    }
}
