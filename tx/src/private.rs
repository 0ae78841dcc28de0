//! EEA private transactions.
//!
//! A private transaction is a legacy transaction followed by the enclave
//! key of the sender, optionally the recipients, and the restriction:
//!
//! | fields | layout |
//! |--------|--------|
//! | 8  | unsigned, no recipients |
//! | 9  | unsigned, recipients at index 7 |
//! | 11 | signed, no recipients |
//! | 12 | signed, recipients at index 10 |
//!
//! Recipients are a list of enclave keys (`privateFor`) or a single
//! privacy group id, told apart by the shape of the item. Keys travel as raw
//! bytes and are shown as base64.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ethcodec_primitives::{from_hex, keccak256, Signature, B256};
use ethcodec_rlp::{BufMut, Bytes, Encodable};

use crate::{fields::Fields, legacy::decode_legacy_suffix, Result, TxError, TxLegacy};

/// Who may see a private transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Restriction {
    /// Only the listed participants receive the payload.
    Restricted,
    /// The payload is not restricted to the participants.
    Unrestricted,
}

impl Restriction {
    /// The wire spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Restriction::Restricted => "restricted",
            Restriction::Unrestricted => "unrestricted",
        }
    }
}

impl core::str::FromStr for Restriction {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "restricted" => Ok(Restriction::Restricted),
            "unrestricted" => Ok(Restriction::Unrestricted),
            other => Err(TxError::TypeMismatch(format!("unknown restriction {other:?}"))),
        }
    }
}

/// Recipients of a private transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivacyRecipients {
    /// Enclave keys of the participants.
    PrivateFor(Vec<Bytes>),
    /// Id of a privacy group.
    PrivacyGroupId(Bytes),
}

impl PrivacyRecipients {
    /// `PrivateFor` from base64 enclave keys.
    pub fn private_for_base64<'a>(keys: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        keys.into_iter()
            .map(decode_enclave_key)
            .collect::<Result<Vec<_>>>()
            .map(PrivacyRecipients::PrivateFor)
    }

    /// `PrivacyGroupId` from a base64 group id.
    pub fn privacy_group_base64(id: &str) -> Result<Self> {
        decode_enclave_key(id).map(PrivacyRecipients::PrivacyGroupId)
    }

    fn length(&self) -> usize {
        match self {
            PrivacyRecipients::PrivateFor(keys) => keys.length(),
            PrivacyRecipients::PrivacyGroupId(id) => id.length(),
        }
    }

    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            PrivacyRecipients::PrivateFor(keys) => keys.encode(out),
            PrivacyRecipients::PrivacyGroupId(id) => id.encode(out),
        }
    }
}

/// Decodes a base64 enclave key or privacy group id.
pub fn decode_enclave_key(key: &str) -> Result<Bytes> {
    Ok(STANDARD.decode(key)?.into())
}

/// Renders an enclave key or privacy group id as base64.
pub fn encode_enclave_key(key: &[u8]) -> String {
    STANDARD.encode(key)
}

/// A private transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateTransaction {
    /// The public legacy fields. A chain id makes the signing payload follow
    /// EIP-155.
    pub tx: TxLegacy,
    /// Enclave key of the sender.
    pub private_from: Bytes,
    /// Recipients, if named in the transaction.
    pub recipients: Option<PrivacyRecipients>,
    /// Restriction.
    pub restriction: Restriction,
}

impl PrivateTransaction {
    /// Sender enclave key as base64.
    pub fn private_from_base64(&self) -> String {
        encode_enclave_key(&self.private_from)
    }

    /// Recipient keys as base64, when addressed by `privateFor`.
    pub fn private_for_base64(&self) -> Option<Vec<String>> {
        match &self.recipients {
            Some(PrivacyRecipients::PrivateFor(keys)) => {
                Some(keys.iter().map(|key| encode_enclave_key(key)).collect())
            }
            _ => None,
        }
    }

    /// Privacy group id as base64, when addressed by group.
    pub fn privacy_group_id_base64(&self) -> Option<String> {
        match &self.recipients {
            Some(PrivacyRecipients::PrivacyGroupId(id)) => Some(encode_enclave_key(id)),
            _ => None,
        }
    }

    fn private_fields_len(&self) -> usize {
        self.private_from.length()
            + self.recipients.as_ref().map_or(0, PrivacyRecipients::length)
            + self.restriction.as_str().length()
    }

    fn encode_private_fields(&self, out: &mut dyn BufMut) {
        self.private_from.encode(out);
        if let Some(recipients) = &self.recipients {
            recipients.encode(out);
        }
        self.restriction.as_str().encode(out);
    }

    /// The signing payload.
    pub fn encode_for_signing(&self) -> Vec<u8> {
        self.tx.encode_with(self.tx.signing_suffix(), self.private_fields_len(), |out| {
            self.encode_private_fields(out)
        })
    }

    /// Keccak-256 of the signing payload.
    pub fn signing_hash(&self) -> B256 {
        keccak256(self.encode_for_signing())
    }

    /// The signed encoding.
    pub fn encode_signed(&self, signature: &Signature) -> Vec<u8> {
        self.tx.encode_with(
            Some(self.tx.signed_suffix(signature)),
            self.private_fields_len(),
            |out| self.encode_private_fields(out),
        )
    }
}

/// A private transaction with its signature, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateEnvelope {
    /// The transaction.
    pub tx: PrivateTransaction,
    /// The signature, absent for a signing payload.
    pub signature: Option<Signature>,
}

impl PrivateEnvelope {
    /// The signed encoding, or the signing payload when unsigned.
    pub fn encode(&self) -> Vec<u8> {
        match &self.signature {
            Some(signature) => self.tx.encode_signed(signature),
            None => self.tx.encode_for_signing(),
        }
    }

    /// Hash of the signed encoding.
    pub fn hash(&self) -> Option<B256> {
        self.signature.as_ref().map(|signature| keccak256(self.tx.encode_signed(signature)))
    }
}

/// Layouts of a private transaction list, keyed by field count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Unsigned,
    UnsignedWithRecipients,
    Signed,
    SignedWithRecipients,
}

impl Shape {
    fn from_count(count: usize) -> Result<Self> {
        match count {
            8 => Ok(Shape::Unsigned),
            9 => Ok(Shape::UnsignedWithRecipients),
            11 => Ok(Shape::Signed),
            12 => Ok(Shape::SignedWithRecipients),
            count => Err(TxError::UnsupportedArity { kind: "private", count }),
        }
    }

    fn is_signed(self) -> bool {
        matches!(self, Shape::Signed | Shape::SignedWithRecipients)
    }

    /// Index of the recipients item, if present.
    fn recipients_index(self) -> Option<usize> {
        match self {
            Shape::UnsignedWithRecipients => Some(7),
            Shape::SignedWithRecipients => Some(10),
            _ => None,
        }
    }
}

/// Decodes a signed private transaction or its signing payload.
pub fn decode_private_transaction(bytes: &[u8]) -> Result<PrivateEnvelope> {
    let mut fields = Fields::parse(bytes)?;
    let shape = Shape::from_count(fields.len())?;
    tracing::trace!(?shape, count = fields.len(), "decoding private transaction");

    let mut tx = TxLegacy::decode_fields(&mut fields)?;
    let mut signature = None;
    if shape.is_signed() {
        let (chain_id, sig) = decode_legacy_suffix(&mut fields)?;
        tx.chain_id = chain_id;
        signature = sig;
    }

    let private_from: Bytes = fields.next()?;
    let recipients = match shape.recipients_index() {
        Some(index) if fields.is_list_at(index) => {
            Some(PrivacyRecipients::PrivateFor(fields.next()?))
        }
        Some(_) => Some(PrivacyRecipients::PrivacyGroupId(fields.next()?)),
        None => None,
    };
    let restriction = fields.next::<String>()?.parse()?;

    Ok(PrivateEnvelope {
        tx: PrivateTransaction { tx, private_from, recipients, restriction },
        signature,
    })
}

/// [`decode_private_transaction`] for `0x` prefixed hex.
pub fn decode_private_transaction_hex(hex: &str) -> Result<PrivateEnvelope> {
    decode_private_transaction(&from_hex(hex)?)
}

#[cfg(test)]
mod tests {
    use ethcodec_primitives::{Address, U256};

    use super::*;
    use crate::TxKind;

    const SENDER: &str = "A1aVtMxLCUHmBVHXoZzzBgPbW/wj5axDpW9X8l91SGo=";
    const RECIPIENT: &str = "Ko2bVqD+nNlNYL5EE7y3IdOnviftjiizpjRt+HTuFBs=";

    fn private(recipients: Option<PrivacyRecipients>, chain_id: Option<u64>) -> PrivateTransaction {
        PrivateTransaction {
            tx: TxLegacy {
                chain_id,
                nonce: 0,
                gas_price: 1,
                gas_limit: 21000,
                to: TxKind::Call(Address::repeat_byte(0x62)),
                value: U256::ZERO,
                input: Bytes::from_static(&[0x01, 0x02]),
            },
            private_from: decode_enclave_key(SENDER).unwrap(),
            recipients,
            restriction: Restriction::Restricted,
        }
    }

    fn signature() -> Signature {
        Signature::new(U256::from(0x1234u64), U256::from(0x5678u64), false)
    }

    #[test]
    fn all_four_shapes_round_trip() {
        let private_for = PrivacyRecipients::private_for_base64([RECIPIENT]).unwrap();
        let group = PrivacyRecipients::privacy_group_base64(RECIPIENT).unwrap();

        for recipients in [None, Some(private_for), Some(group)] {
            let unsigned = PrivateEnvelope { tx: private(recipients.clone(), None), signature: None };
            let decoded = decode_private_transaction(&unsigned.encode()).unwrap();
            assert_eq!(decoded, unsigned);

            let signed = PrivateEnvelope {
                tx: private(recipients.clone(), Some(2018)),
                signature: Some(signature()),
            };
            let decoded = decode_private_transaction(&signed.encode()).unwrap();
            assert_eq!(decoded, signed);
            assert!(decoded.hash().is_some());
        }
    }

    #[test]
    fn field_counts() {
        let unsigned = private(None, None).encode_for_signing();
        assert_eq!(Fields::parse(&unsigned).unwrap().len(), 8);

        let with_group = private(Some(PrivacyRecipients::privacy_group_base64(RECIPIENT).unwrap()), None);
        assert_eq!(Fields::parse(&with_group.encode_for_signing()).unwrap().len(), 9);

        let signed = private(None, Some(1)).encode_signed(&signature());
        assert_eq!(Fields::parse(&signed).unwrap().len(), 11);
    }

    #[test]
    fn eip155_signing_payload_reads_back_unsigned() {
        let tx = private(None, Some(2018));
        let decoded = decode_private_transaction(&tx.encode_for_signing()).unwrap();
        assert_eq!(decoded.signature, None);
        assert_eq!(decoded.tx, tx);
    }

    #[test]
    fn base64_rendering() {
        let tx = private(Some(PrivacyRecipients::private_for_base64([RECIPIENT]).unwrap()), None);
        assert_eq!(tx.private_from_base64(), SENDER);
        assert_eq!(tx.private_for_base64(), Some(vec![RECIPIENT.to_owned()]));
        assert_eq!(tx.privacy_group_id_base64(), None);
        assert!(matches!(decode_enclave_key("not base64!"), Err(TxError::Base64(_))));
    }

    #[test]
    fn rejects_other_arities_and_restrictions() {
        // a plain six field legacy payload is not a private transaction
        let legacy = private(None, None).tx.encode_for_signing();
        assert!(matches!(
            decode_private_transaction(&legacy),
            Err(TxError::UnsupportedArity { kind: "private", count: 6 })
        ));
        assert!(matches!("public".parse::<Restriction>(), Err(TxError::TypeMismatch(_))));
    }
}
