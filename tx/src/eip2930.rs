use ethcodec_primitives::U256;
use ethcodec_rlp::{BufMut, Bytes, DecodeError, Encodable};

use crate::{fields::Fields, typed::TypedFields, AccessList, TxKind, TxType};

/// An access list transaction (EIP-2930):
/// `0x01 ++ rlp([chainId, nonce, gasPrice, gasLimit, to, value, data, accessList])`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxEip2930 {
    /// Chain id.
    pub chain_id: u64,
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
    /// Pre-declared accounts and storage slots.
    pub access_list: AccessList,
}

impl TypedFields for TxEip2930 {
    const TX_TYPE: TxType = TxType::Eip2930;
    const FIELDS: usize = 8;

    fn fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
            + self.access_list.length()
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
    }

    fn decode_fields(fields: &mut Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            chain_id: fields.next()?,
            nonce: fields.next()?,
            gas_price: fields.next()?,
            gas_limit: fields.next()?,
            to: fields.next()?,
            value: fields.next()?,
            input: fields.next()?,
            access_list: fields.next()?,
        })
    }
}
