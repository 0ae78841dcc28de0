use std::borrow::Cow;

use ethcodec_primitives::{keccak256, to_hex, SignHash, Signature, B256};
use ethcodec_pub_use::{serde_json::Value, tracing};

use crate::{ArrayEncoding, Eip712Error, Encoder, Result, TypedData, EIP712_DOMAIN};

/// Prefix of the signed digest.
const EIP712_PREFIX: [u8; 2] = [0x19, 0x01];

impl TypedData {
    /// An encoder over [`TypedData::types`], with `EIP712Domain` inferred from
    /// the domain when it is not declared.
    pub fn encoder(&self) -> Result<Encoder<'_>> {
        let types = if self.types.contains_key(EIP712_DOMAIN) {
            Cow::Borrowed(&self.types)
        } else {
            let mut types = self.types.clone();
            types.insert(EIP712_DOMAIN.to_owned(), self.domain.fields());
            Cow::Owned(types)
        };
        let encoder = Encoder::new(types)?;
        if !encoder.types().contains_key(&self.primary_type) {
            return Err(Eip712Error::UnknownType(self.primary_type.clone()))
        }
        Ok(encoder)
    }

    /// Checks the type mapping and the primary type.
    pub fn validate(&self) -> Result<()> {
        self.encoder().map(drop)
    }

    /// `encodeType` for a struct of this document.
    pub fn encode_type(&self, name: &str) -> Result<String> {
        self.encoder()?.encode_type(name)
    }

    /// `typeHash` for a struct of this document.
    pub fn type_hash(&self, name: &str) -> Result<B256> {
        self.encoder()?.type_hash(name)
    }

    /// `encodeData` for a value of a struct of this document.
    pub fn encode_data(&self, name: &str, value: &Value, arrays: ArrayEncoding) -> Result<Vec<u8>> {
        self.encoder()?.encode_data(name, value, arrays)
    }

    /// `hashStruct` for a value of a struct of this document.
    pub fn hash_struct(&self, name: &str, value: &Value) -> Result<B256> {
        self.encoder()?.hash_struct(name, value)
    }

    /// `hashStruct("EIP712Domain", domain)`.
    pub fn domain_separator(&self) -> Result<B256> {
        domain_separator(&self.encoder()?, self)
    }

    /// The digest to sign: `keccak256(0x1901 ++ domainSeparator ++
    /// hashStruct(primaryType, message))`.
    ///
    /// With `EIP712Domain` as the primary type the struct hash is left out.
    pub fn sign_hash(&self) -> Result<B256> {
        let encoder = self.encoder()?;
        let mut digest = Vec::with_capacity(2 + 32 + 32);
        digest.extend_from_slice(&EIP712_PREFIX);
        digest.extend_from_slice(domain_separator(&encoder, self)?.as_bytes());
        if self.primary_type != EIP712_DOMAIN {
            let struct_hash = encoder.hash_struct(&self.primary_type, &self.message)?;
            digest.extend_from_slice(struct_hash.as_bytes());
        }
        let hash = keccak256(digest);
        tracing::trace!(primary_type = %self.primary_type, %hash, "computed typed data digest");
        Ok(hash)
    }

    /// [`TypedData::sign_hash`] as `0x` prefixed hex.
    pub fn sign_hash_hex(&self) -> Result<String> {
        self.sign_hash().map(to_hex)
    }

    /// Signs [`TypedData::sign_hash`] with `signer`.
    pub fn sign_with(&self, signer: &impl SignHash) -> Result<Signature> {
        Ok(signer.sign_hash(self.sign_hash()?))
    }
}

fn domain_separator(encoder: &Encoder<'_>, typed: &TypedData) -> Result<B256> {
    encoder.hash_struct(EIP712_DOMAIN, &typed.domain.to_value()?)
}
