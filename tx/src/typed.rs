use ethcodec_primitives::{keccak256, Address, Signature, B256, U256};
use ethcodec_rlp::{BufMut, DecodeError, Encodable, Header};

use crate::{
    fields::Fields, TxEip1559, TxEip2930, TxEip4844, TxEip7702, TxEnvelope, TxError, TxKind,
    TxLegacy,
};

/// Transaction kinds, with the EIP-2718 type byte of the typed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TxType {
    /// Untyped, RLP list at the top level.
    Legacy = 0x00,
    /// Access list transaction.
    Eip2930 = 0x01,
    /// Fee market transaction.
    Eip1559 = 0x02,
    /// Blob transaction.
    Eip4844 = 0x03,
    /// Set-code transaction.
    Eip7702 = 0x04,
}

impl TxType {
    /// The byte written before the RLP list, `None` for legacy.
    pub const fn rlp_type(self) -> Option<u8> {
        match self {
            TxType::Legacy => None,
            ty => Some(ty as u8),
        }
    }

    /// True for untyped transactions.
    pub const fn is_legacy(self) -> bool {
        matches!(self, TxType::Legacy)
    }
}

impl TryFrom<u8> for TxType {
    type Error = TxError;

    fn try_from(ty: u8) -> Result<Self, Self::Error> {
        match ty {
            0x01 => Ok(TxType::Eip2930),
            0x02 => Ok(TxType::Eip1559),
            0x03 => Ok(TxType::Eip4844),
            0x04 => Ok(TxType::Eip7702),
            ty => Err(TxError::UnsupportedType(ty)),
        }
    }
}

/// Field access shared by the typed kinds, which all encode as
/// `type ++ rlp([fields..., y_parity, r, s])`.
pub(crate) trait TypedFields: Sized {
    const TX_TYPE: TxType;
    /// Number of fields in the signing payload.
    const FIELDS: usize;

    fn fields_len(&self) -> usize;

    fn encode_fields(&self, out: &mut dyn BufMut);

    fn decode_fields(fields: &mut Fields<'_>) -> Result<Self, DecodeError>;

    fn encode_typed(&self, signature: Option<&Signature>) -> Vec<u8> {
        let payload_length = self.fields_len() + signature.map_or(0, parity_fields_len);
        let header = Header { list: true, payload_length };
        let mut out = Vec::with_capacity(1 + header.length() + payload_length);
        out.push(Self::TX_TYPE as u8);
        header.encode(&mut out);
        self.encode_fields(&mut out);
        if let Some(signature) = signature {
            encode_parity_fields(signature, &mut out);
        }
        out
    }
}

fn parity_fields_len(signature: &Signature) -> usize {
    signature.y_parity().length() + signature.r.length() + signature.s.length()
}

fn encode_parity_fields(signature: &Signature, out: &mut dyn BufMut) {
    signature.y_parity().encode(out);
    signature.r.encode(out);
    signature.s.encode(out);
}

pub(crate) fn decode_parity_fields(fields: &mut Fields<'_>) -> Result<Signature, TxError> {
    let odd_y_parity = match fields.next::<u8>()? {
        0 => false,
        1 => true,
        v => return Err(TxError::TypeMismatch(format!("y parity must be 0 or 1, got {v}"))),
    };
    Ok(Signature::new(fields.next()?, fields.next()?, odd_y_parity))
}

/// An unsigned transaction of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Untyped transaction, optionally bound to a chain by EIP-155.
    Legacy(TxLegacy),
    /// EIP-2930 transaction.
    Eip2930(TxEip2930),
    /// EIP-1559 transaction.
    Eip1559(TxEip1559),
    /// EIP-4844 transaction.
    Eip4844(TxEip4844),
    /// EIP-7702 transaction.
    Eip7702(TxEip7702),
}

macro_rules! delegate {
    ($self:ident, $tx:ident => $e:expr) => {
        match $self {
            Transaction::Legacy($tx) => $e,
            Transaction::Eip2930($tx) => $e,
            Transaction::Eip1559($tx) => $e,
            Transaction::Eip4844($tx) => $e,
            Transaction::Eip7702($tx) => $e,
        }
    };
}

impl Transaction {
    /// Kind of this transaction.
    pub fn tx_type(&self) -> TxType {
        match self {
            Transaction::Legacy(_) => TxType::Legacy,
            Transaction::Eip2930(_) => TxType::Eip2930,
            Transaction::Eip1559(_) => TxType::Eip1559,
            Transaction::Eip4844(_) => TxType::Eip4844,
            Transaction::Eip7702(_) => TxType::Eip7702,
        }
    }

    /// Chain id, absent only for pre-EIP-155 legacy transactions.
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Transaction::Legacy(tx) => tx.chain_id,
            Transaction::Eip2930(tx) => Some(tx.chain_id),
            Transaction::Eip1559(tx) => Some(tx.chain_id),
            Transaction::Eip4844(tx) => Some(tx.chain_id),
            Transaction::Eip7702(tx) => Some(tx.chain_id),
        }
    }

    /// Sender nonce.
    pub fn nonce(&self) -> u64 {
        delegate!(self, tx => tx.nonce)
    }

    /// Gas limit.
    pub fn gas_limit(&self) -> u64 {
        delegate!(self, tx => tx.gas_limit)
    }

    /// Transferred value in wei.
    pub fn value(&self) -> U256 {
        delegate!(self, tx => tx.value)
    }

    /// Call data or init code.
    pub fn input(&self) -> &[u8] {
        delegate!(self, tx => &tx.input[..])
    }

    /// Destination, `Create` for contract creation.
    pub fn kind(&self) -> TxKind {
        match self {
            Transaction::Legacy(tx) => tx.to,
            Transaction::Eip2930(tx) => tx.to,
            Transaction::Eip1559(tx) => tx.to,
            Transaction::Eip4844(tx) => TxKind::Call(tx.to),
            Transaction::Eip7702(tx) => TxKind::Call(tx.to),
        }
    }

    /// Destination address, `None` for contract creation.
    pub fn to(&self) -> Option<Address> {
        self.kind().to().copied()
    }

    /// The signing payload.
    pub fn encode_for_signing(&self) -> Vec<u8> {
        match self {
            Transaction::Legacy(tx) => tx.encode_for_signing(),
            Transaction::Eip2930(tx) => tx.encode_typed(None),
            Transaction::Eip1559(tx) => tx.encode_typed(None),
            Transaction::Eip4844(tx) => tx.encode_typed(None),
            Transaction::Eip7702(tx) => tx.encode_typed(None),
        }
    }

    /// Keccak-256 of the signing payload, the digest a signer signs.
    pub fn signing_hash(&self) -> B256 {
        keccak256(self.encode_for_signing())
    }

    /// The signed encoding, as broadcast and hashed for the transaction id.
    pub fn encode_signed(&self, signature: &Signature) -> Vec<u8> {
        match self {
            Transaction::Legacy(tx) => tx.encode_signed(signature),
            Transaction::Eip2930(tx) => tx.encode_typed(Some(signature)),
            Transaction::Eip1559(tx) => tx.encode_typed(Some(signature)),
            Transaction::Eip4844(tx) => tx.encode_typed(Some(signature)),
            Transaction::Eip7702(tx) => tx.encode_typed(Some(signature)),
        }
    }

    /// Attaches a signature.
    pub fn into_signed(self, signature: Signature) -> TxEnvelope {
        TxEnvelope { tx: self, signature: Some(signature) }
    }

    /// Signs the signing hash with `signer`.
    pub fn sign_with(self, signer: &impl ethcodec_primitives::SignHash) -> TxEnvelope {
        let signature = signer.sign_hash(self.signing_hash());
        self.into_signed(signature)
    }
}

macro_rules! impl_from_tx {
    ($($variant:ident => $ty:ty),+ $(,)?) => {$(
        impl From<$ty> for Transaction {
            fn from(tx: $ty) -> Self {
                Transaction::$variant(tx)
            }
        }
    )+};
}

impl_from_tx!(
    Legacy => TxLegacy,
    Eip2930 => TxEip2930,
    Eip1559 => TxEip1559,
    Eip4844 => TxEip4844,
    Eip7702 => TxEip7702,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_bytes() {
        assert_eq!(TxType::Legacy.rlp_type(), None);
        assert_eq!(TxType::Eip2930.rlp_type(), Some(0x01));
        assert_eq!(TxType::Eip7702.rlp_type(), Some(0x04));
        assert_eq!(TxType::try_from(0x03).unwrap(), TxType::Eip4844);
        assert!(matches!(TxType::try_from(0x05), Err(TxError::UnsupportedType(0x05))));
        assert!(TxType::Legacy.is_legacy());
    }
}
