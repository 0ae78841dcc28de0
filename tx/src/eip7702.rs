use ethcodec_primitives::{Address, U256};
use ethcodec_rlp::{BufMut, Bytes, DecodeError, Encodable};

use crate::{fields::Fields, typed::TypedFields, AccessList, SignedAuthorization, TxType};

/// A set-code transaction (EIP-7702): the EIP-1559 fields with a mandatory
/// destination, followed by the authorization list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxEip7702 {
    /// Chain id.
    pub chain_id: u64,
    /// Sender nonce.
    pub nonce: u64,
    /// Tip per unit of gas paid to the block producer.
    pub max_priority_fee_per_gas: u128,
    /// Cap on the total price per unit of gas.
    pub max_fee_per_gas: u128,
    /// Gas limit.
    pub gas_limit: u64,
    /// Destination. Set-code transactions cannot create contracts.
    pub to: Address,
    /// Transferred value in wei.
    pub value: U256,
    /// Call data.
    pub input: Bytes,
    /// Pre-declared accounts and storage slots.
    pub access_list: AccessList,
    /// Signed delegations to install.
    pub authorization_list: Vec<SignedAuthorization>,
}

impl TypedFields for TxEip7702 {
    const TX_TYPE: TxType = TxType::Eip7702;
    const FIELDS: usize = 10;

    fn fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.max_priority_fee_per_gas.length()
            + self.max_fee_per_gas.length()
            + self.gas_limit.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
            + self.access_list.length()
            + self.authorization_list.length()
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.max_priority_fee_per_gas.encode(out);
        self.max_fee_per_gas.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
        self.authorization_list.encode(out);
    }

    fn decode_fields(fields: &mut Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            chain_id: fields.next()?,
            nonce: fields.next()?,
            max_priority_fee_per_gas: fields.next()?,
            max_fee_per_gas: fields.next()?,
            gas_limit: fields.next()?,
            to: fields.next()?,
            value: fields.next()?,
            input: fields.next()?,
            access_list: fields.next()?,
            authorization_list: fields.next()?,
        })
    }
}
