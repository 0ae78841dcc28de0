#![warn(missing_docs)]

//! Ethereum transaction envelopes.
//!
//! Each transaction kind is a struct holding its fields in wire order. A
//! kind encodes to its signing payload or, given a [`Signature`], to its
//! signed form; typed kinds prefix the RLP list with their EIP-2718 type
//! byte. [`decode_transaction`] picks the kind from the leading byte and the
//! number of list fields.

mod error;
pub use error::{Result, TxError};

mod fields;

mod kind;
pub use kind::TxKind;

mod access_list;
pub use access_list::{AccessList, AccessListItem};

mod authorization;
pub use authorization::{Authorization, SignedAuthorization};

mod legacy;
pub use legacy::TxLegacy;

mod eip2930;
pub use eip2930::TxEip2930;

mod eip1559;
pub use eip1559::TxEip1559;

mod eip4844;
pub use eip4844::TxEip4844;

mod eip7702;
pub use eip7702::TxEip7702;

mod typed;
pub use typed::{Transaction, TxType};

mod envelope;
pub use envelope::{decode_transaction, decode_transaction_hex, TxEnvelope};

pub mod private;

pub use ethcodec_primitives::{Address, SignHash, Signature, B256, U256};
pub use ethcodec_rlp::Bytes;
