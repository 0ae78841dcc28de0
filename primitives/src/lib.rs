#![warn(missing_docs)]

//! Fundamental ethereum types: fixed-size hashes, 256 bit integers, keccak and
//! the hex/quantity conventions used at every system boundary.

mod bits;
pub use bits::{B160, B256, B512};

mod hash;
pub use hash::{keccak256, Keccak256};

pub mod numeric;
pub use numeric::{
    decode_quantity, encode_quantity, from_hex, to_bytes_padded, to_hex, to_hex_zero_padded,
    NumericError,
};

pub mod signed;

mod signature;
pub use signature::{SignHash, Signature};

#[cfg(feature = "rlp")]
mod rlp;

#[cfg(feature = "serde")]
mod serde_impl;

pub use ruint::{
    self,
    aliases::{U128, U256, U64},
};

/// An ethereum address.
pub type Address = B160;
