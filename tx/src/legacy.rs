use ethcodec_primitives::{Signature, U256};
use ethcodec_rlp::{BufMut, Bytes, DecodeError, Encodable, Header};

use crate::{fields::Fields, TxError, TxKind};

/// An untyped transaction: `[nonce, gasPrice, gasLimit, to, value, data]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxLegacy {
    /// Chain the signature is bound to (EIP-155). `None` signs the six bare
    /// fields.
    pub chain_id: Option<u64>,
    /// Sender nonce.
    pub nonce: u64,
    /// Price per unit of gas in wei.
    pub gas_price: u128,
    /// Gas limit.
    pub gas_limit: u64,
    /// Destination.
    pub to: TxKind,
    /// Transferred value in wei.
    pub value: U256,
    /// Call data or init code.
    pub input: Bytes,
}

impl TxLegacy {
    pub(crate) const FIELDS: usize = 6;
    pub(crate) const SIGNED_FIELDS: usize = 9;

    pub(crate) fn fields_len(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
    }

    pub(crate) fn encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
    }

    pub(crate) fn decode_fields(fields: &mut Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            chain_id: None,
            nonce: fields.next()?,
            gas_price: fields.next()?,
            gas_limit: fields.next()?,
            to: fields.next()?,
            value: fields.next()?,
            input: fields.next()?,
        })
    }

    /// The trailing `[v, r, s]` of the signing payload: `[chainId, 0, 0]`
    /// under EIP-155, nothing otherwise.
    pub(crate) fn signing_suffix(&self) -> Option<(u64, U256, U256)> {
        self.chain_id.map(|chain_id| (chain_id, U256::ZERO, U256::ZERO))
    }

    /// The trailing `[v, r, s]` of the signed form.
    pub(crate) fn signed_suffix(&self, signature: &Signature) -> (u64, U256, U256) {
        (signature.v(self.chain_id), signature.r, signature.s)
    }

    /// Encodes the six fields followed by `suffix`, wrapped in a list, with
    /// `extra` written after the suffix.
    pub(crate) fn encode_with(
        &self,
        suffix: Option<(u64, U256, U256)>,
        extra_len: usize,
        extra: impl FnOnce(&mut dyn BufMut),
    ) -> Vec<u8> {
        let suffix_len = suffix.map_or(0, |(v, r, s)| v.length() + r.length() + s.length());
        let payload_length = self.fields_len() + suffix_len + extra_len;
        let header = Header { list: true, payload_length };
        let mut out = Vec::with_capacity(header.length() + payload_length);
        header.encode(&mut out);
        self.encode_fields(&mut out);
        if let Some((v, r, s)) = suffix {
            v.encode(&mut out);
            r.encode(&mut out);
            s.encode(&mut out);
        }
        extra(&mut out);
        out
    }

    /// The signing payload, EIP-155 when a chain id is set.
    pub fn encode_for_signing(&self) -> Vec<u8> {
        self.encode_with(self.signing_suffix(), 0, |_| {})
    }

    /// The signed encoding, `v` per EIP-155 when a chain id is set.
    pub fn encode_signed(&self, signature: &Signature) -> Vec<u8> {
        self.encode_with(Some(self.signed_suffix(signature)), 0, |_| {})
    }
}

/// Reads the trailing `[v, r, s]` of a nine field legacy list.
///
/// `r` and `s` both zero mark an EIP-155 signing payload, whose `v` is the
/// chain id. Otherwise `v` carries the parity and, above 28, the chain id.
pub(crate) fn decode_legacy_suffix(
    fields: &mut Fields<'_>,
) -> Result<(Option<u64>, Option<Signature>), TxError> {
    let v: u64 = fields.next()?;
    let r: U256 = fields.next()?;
    let s: U256 = fields.next()?;
    if r.is_zero() && s.is_zero() {
        return Ok((Some(v), None))
    }
    let (odd_y_parity, chain_id) = Signature::parity_from_v(v)
        .ok_or_else(|| TxError::TypeMismatch(format!("invalid legacy v value {v}")))?;
    Ok((chain_id, Some(Signature::new(r, s, odd_y_parity))))
}

#[cfg(test)]
mod tests {
    use ethcodec_primitives::{keccak256, Address};
    use hex_literal::hex;

    use super::*;

    /// The example transaction of EIP-155.
    fn eip155_example() -> TxLegacy {
        TxLegacy {
            chain_id: Some(1),
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21000,
            to: TxKind::Call(Address::repeat_byte(0x35)),
            value: U256::from(1_000_000_000_000_000_000u128),
            input: Bytes::new(),
        }
    }

    #[test]
    fn eip155_signing_payload() {
        let tx = eip155_example();
        assert_eq!(
            tx.encode_for_signing(),
            hex!("ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080")
        );
        assert_eq!(
            keccak256(tx.encode_for_signing()).0,
            hex!("daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53")
        );
    }

    #[test]
    fn pre_eip155_payload_has_six_fields() {
        let tx = TxLegacy { chain_id: None, ..eip155_example() };
        let payload = tx.encode_for_signing();
        assert_eq!(payload[0], 0xc0 + 41);
        assert_eq!(payload.len(), 42);
    }

    #[test]
    fn signed_v_carries_chain_id() {
        let tx = eip155_example();
        let signature = Signature::new(U256::from(1u64), U256::from(2u64), true);
        let signed = tx.encode_signed(&signature);
        let mut fields = Fields::parse(&signed).unwrap();
        assert_eq!(fields.len(), 9);
        TxLegacy::decode_fields(&mut fields).unwrap();
        assert_eq!(decode_legacy_suffix(&mut fields).unwrap(), (Some(1), Some(signature)));
    }
}
