use ethcodec_primitives::{keccak256, Address, Signature, B256, U256};
use ethcodec_rlp::{BufMut, Decodable, DecodeError, Encodable, Header};

/// Prefix byte of an authorization's signing payload (EIP-7702).
pub const AUTHORIZATION_MAGIC: u8 = 0x05;

/// A request to install `address`'s code on the signer's account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Authorization {
    /// Chain the authorization is valid on, zero for any chain.
    pub chain_id: U256,
    /// Account whose code is delegated to.
    pub address: Address,
    /// Nonce of the signing account.
    pub nonce: u64,
}

impl Authorization {
    fn payload_length(&self) -> usize {
        self.chain_id.length() + self.address.length() + self.nonce.length()
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.encode(out);
        self.address.encode(out);
        self.nonce.encode(out);
    }

    /// `keccak256(0x05 ++ rlp([chain_id, address, nonce]))`.
    pub fn signing_hash(&self) -> B256 {
        let mut out = vec![AUTHORIZATION_MAGIC];
        self.encode(&mut out);
        keccak256(&out)
    }

    /// Attaches the signature over [`Authorization::signing_hash`].
    pub fn into_signed(self, signature: Signature) -> SignedAuthorization {
        SignedAuthorization { inner: self, signature }
    }
}

impl Encodable for Authorization {
    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        Header { list: true, payload_length }.length() + payload_length
    }

    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_length() }.encode(out);
        self.encode_fields(out);
    }
}

/// An authorization with its signature, the element type of an EIP-7702
/// authorization list: `[chain_id, address, nonce, y_parity, r, s]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignedAuthorization {
    /// The signed authorization.
    pub inner: Authorization,
    /// Signature over its signing hash.
    pub signature: Signature,
}

impl SignedAuthorization {
    fn payload_length(&self) -> usize {
        self.inner.payload_length()
            + self.signature.y_parity().length()
            + self.signature.r.length()
            + self.signature.s.length()
    }
}

impl Encodable for SignedAuthorization {
    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        Header { list: true, payload_length }.length() + payload_length
    }

    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_length() }.encode(out);
        self.inner.encode_fields(out);
        self.signature.y_parity().encode(out);
        self.signature.r.encode(out);
        self.signature.s.encode(out);
    }
}

impl Decodable for SignedAuthorization {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(DecodeError::UnexpectedString);
        }
        let (mut payload, rest) = buf.split_at(header.payload_length);
        let inner = Authorization {
            chain_id: U256::decode(&mut payload)?,
            address: Address::decode(&mut payload)?,
            nonce: u64::decode(&mut payload)?,
        };
        let odd_y_parity = match u8::decode(&mut payload)? {
            0 => false,
            1 => true,
            _ => return Err(DecodeError::Custom("y parity must be 0 or 1")),
        };
        let signature = Signature::new(
            U256::decode(&mut payload)?,
            U256::decode(&mut payload)?,
            odd_y_parity,
        );
        if !payload.is_empty() {
            return Err(DecodeError::Custom("authorization has extra fields"));
        }
        *buf = rest;
        Ok(Self { inner, signature })
    }
}

#[cfg(test)]
mod tests {
    use ethcodec_rlp::decode_exact;

    use super::*;

    fn authorization() -> Authorization {
        Authorization { chain_id: U256::from(1u64), address: Address::repeat_byte(0x42), nonce: 7 }
    }

    #[test]
    fn signing_payload_is_prefixed() {
        let auth = authorization();
        let mut expected = vec![AUTHORIZATION_MAGIC];
        // [0x01, 0x94 ++ address, 0x07]
        expected.push(0xc0 + 23);
        expected.push(0x01);
        expected.push(0x94);
        expected.extend_from_slice(&[0x42; 20]);
        expected.push(0x07);
        assert_eq!(auth.signing_hash(), keccak256(&expected));
    }

    #[test]
    fn signed_round_trip() {
        let signed = authorization()
            .into_signed(Signature::new(U256::from(3u64), U256::from(4u64), true));
        let mut out = vec![];
        signed.encode(&mut out);
        assert_eq!(out.len(), signed.length());
        assert_eq!(decode_exact::<SignedAuthorization>(&out).unwrap(), signed);
    }
}
