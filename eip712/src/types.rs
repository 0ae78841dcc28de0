//! The typed data document.

use std::{collections::BTreeMap, str::FromStr};

use ethcodec_pub_use::serde_json::{self, Value};
use serde::{Deserialize, Serialize};

use crate::{Eip712Error, Result};

/// Name of the domain struct.
pub const EIP712_DOMAIN: &str = "EIP712Domain";

/// One member of a struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Field {
    /// Member name.
    pub name: String,
    /// Member type: an atomic type, `bytes`, `string`, a declared struct, or
    /// any of these with `[]`/`[k]` suffixes.
    #[serde(rename = "type")]
    pub r#type: String,
}

impl Eip712Field {
    /// Creates a field.
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self { name: name.into(), r#type: r#type.into() }
    }
}

/// Struct types by name. Kept sorted so that iteration, and with it
/// validation errors, are deterministic.
pub type Types = BTreeMap<String, Vec<Eip712Field>>;

/// The signing domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    /// User readable name of the signing domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current major version of the signing domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// EIP-155 chain id, as a JSON number or a decimal or hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<Value>,
    /// Address of the verifying contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<String>,
    /// Disambiguating salt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl Eip712Domain {
    /// The `EIP712Domain` fields implied by the members present, in
    /// canonical order.
    pub fn fields(&self) -> Vec<Eip712Field> {
        let mut fields = vec![];
        if self.name.is_some() {
            fields.push(Eip712Field::new("name", "string"));
        }
        if self.version.is_some() {
            fields.push(Eip712Field::new("version", "string"));
        }
        if self.chain_id.is_some() {
            fields.push(Eip712Field::new("chainId", "uint256"));
        }
        if self.verifying_contract.is_some() {
            fields.push(Eip712Field::new("verifyingContract", "address"));
        }
        if self.salt.is_some() {
            fields.push(Eip712Field::new("salt", "bytes32"));
        }
        fields
    }

    /// The domain as a JSON object, the shape struct values take.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A typed data document: the input of `eth_signTypedData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    /// Struct type definitions. `EIP712Domain` may be omitted, in which case
    /// it is inferred from [`TypedData::domain`].
    pub types: Types,
    /// The struct type of [`TypedData::message`].
    pub primary_type: String,
    /// The signing domain.
    pub domain: Eip712Domain,
    /// The message.
    pub message: Value,
}

impl FromStr for TypedData {
    type Err = Eip712Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
