#![allow(clippy::module_inception)]
#![warn(missing_docs)]

//! Solidity ABI encoding.
//!
//! Values are described by a [`ParamType`] and carried as a word-level
//! [`Token`] tree. Parameter lists are laid out head then tail: static values
//! sit in their head slot, dynamic values leave an offset there and append
//! their payload to the tail.

use ethcodec_primitives::{B160, B256};

mod decoder;
pub use decoder::{decode, decode_validate};

mod encoder;
pub use encoder::{encode, encode_params};

mod token;
pub use token::Token;

mod tokenize;
pub use tokenize::{Detokenize, Tokenize};

mod errors;
pub use errors::{Error, Result};

mod param_type;
pub use param_type::{ParamType, Reader};

mod signature;
pub use signature::{build_signature, selector, selector_hex, signature_hash};

mod function;
pub use function::Function;

mod custom_error;
pub use custom_error::{CustomError, Revert, ERROR_STRING_SELECTOR, PANIC_SELECTOR};

pub mod util;

/// EVM Word
pub type Word = B256;
/// EVM Address
pub type Address = B160;
/// Dynamic Byte array
pub type Bytes = Vec<u8>;
/// Hash
pub type Hash = B256;
/// Function or error selector
pub type Selector = [u8; 4];
