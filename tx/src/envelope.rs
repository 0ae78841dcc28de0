use ethcodec_primitives::{from_hex, keccak256, Signature, B256};
use ethcodec_rlp::EMPTY_LIST_CODE;

use crate::{
    fields::Fields,
    legacy::decode_legacy_suffix,
    typed::{decode_parity_fields, TypedFields},
    Result, Transaction, TxEip1559, TxEip2930, TxEip4844, TxEip7702, TxError, TxLegacy, TxType,
};

/// A transaction as it appears on the wire: signed, or an unsigned signing
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxEnvelope {
    /// The transaction fields.
    pub tx: Transaction,
    /// The signature, absent for a signing payload.
    pub signature: Option<Signature>,
}

impl TxEnvelope {
    /// Kind of the wrapped transaction.
    pub fn tx_type(&self) -> TxType {
        self.tx.tx_type()
    }

    /// True when a signature is attached.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// The signed encoding, or the signing payload when unsigned.
    pub fn encode(&self) -> Vec<u8> {
        match &self.signature {
            Some(signature) => self.tx.encode_signed(signature),
            None => self.tx.encode_for_signing(),
        }
    }

    /// Digest the signature commits to.
    pub fn signing_hash(&self) -> B256 {
        self.tx.signing_hash()
    }

    /// Transaction id: the hash of the signed encoding.
    pub fn hash(&self) -> Option<B256> {
        self.signature.as_ref().map(|signature| keccak256(self.tx.encode_signed(signature)))
    }
}

/// Field counts of the unsigned and signed list of each kind. A list of any
/// other length is rejected.
const ARITY: [(TxType, usize, usize); 5] = [
    (TxType::Legacy, TxLegacy::FIELDS, TxLegacy::SIGNED_FIELDS),
    (TxType::Eip2930, TxEip2930::FIELDS, TxEip2930::FIELDS + 3),
    (TxType::Eip1559, TxEip1559::FIELDS, TxEip1559::FIELDS + 3),
    (TxType::Eip4844, TxEip4844::FIELDS, TxEip4844::FIELDS + 3),
    (TxType::Eip7702, TxEip7702::FIELDS, TxEip7702::FIELDS + 3),
];

/// Decodes a signed transaction or a signing payload.
///
/// A leading byte of `0xc0` or above is a legacy list; `0x01..=0x04` is the
/// type byte of a typed transaction. The kind and the number of list fields
/// select the layout.
pub fn decode_transaction(bytes: &[u8]) -> Result<TxEnvelope> {
    let first = *bytes.first().ok_or(ethcodec_rlp::DecodeError::TruncatedInput)?;
    let (tx_type, payload) = if first >= EMPTY_LIST_CODE {
        (TxType::Legacy, bytes)
    } else {
        (TxType::try_from(first)?, &bytes[1..])
    };

    let mut fields = Fields::parse(payload)?;
    let count = fields.len();
    let signed = match ARITY.iter().find(|(ty, _, _)| *ty == tx_type) {
        Some((_, unsigned, _)) if count == *unsigned => false,
        Some((_, _, signed)) if count == *signed => true,
        _ => return Err(TxError::UnsupportedArity { kind: kind_name(tx_type), count }),
    };
    tracing::trace!(?tx_type, count, signed, "decoding transaction envelope");

    let envelope = match tx_type {
        TxType::Legacy => decode_legacy(&mut fields, signed)?,
        TxType::Eip2930 => decode_typed::<TxEip2930>(&mut fields, signed)?,
        TxType::Eip1559 => decode_typed::<TxEip1559>(&mut fields, signed)?,
        TxType::Eip4844 => decode_typed::<TxEip4844>(&mut fields, signed)?,
        TxType::Eip7702 => decode_typed::<TxEip7702>(&mut fields, signed)?,
    };
    Ok(envelope)
}

/// [`decode_transaction`] for `0x` prefixed hex.
pub fn decode_transaction_hex(hex: &str) -> Result<TxEnvelope> {
    decode_transaction(&from_hex(hex)?)
}

fn decode_legacy(fields: &mut Fields<'_>, signed: bool) -> Result<TxEnvelope> {
    let mut tx = TxLegacy::decode_fields(fields)?;
    let mut signature = None;
    if signed {
        let (chain_id, sig) = decode_legacy_suffix(fields)?;
        tx.chain_id = chain_id;
        signature = sig;
    }
    Ok(TxEnvelope { tx: Transaction::Legacy(tx), signature })
}

fn decode_typed<T>(fields: &mut Fields<'_>, signed: bool) -> Result<TxEnvelope>
where
    T: TypedFields + Into<Transaction>,
{
    let tx = T::decode_fields(fields)?;
    let signature = if signed { Some(decode_parity_fields(fields)?) } else { None };
    Ok(TxEnvelope { tx: tx.into(), signature })
}

fn kind_name(tx_type: TxType) -> &'static str {
    match tx_type {
        TxType::Legacy => "legacy",
        TxType::Eip2930 => "EIP-2930",
        TxType::Eip1559 => "EIP-1559",
        TxType::Eip4844 => "EIP-4844",
        TxType::Eip7702 => "EIP-7702",
    }
}
