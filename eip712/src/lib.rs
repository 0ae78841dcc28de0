#![warn(missing_docs)]

//! EIP-712 typed structured data hashing.
//!
//! A [`TypedData`] document names struct types, a domain and a message. The
//! [`Encoder`] turns a struct value into `encodeData` words and hashes it;
//! the document combines the domain separator and the message hash into the
//! digest a wallet signs.
//!
//! ```
//! use ethcodec_eip712::TypedData;
//!
//! let typed: TypedData = r#"{
//!     "types": { "Ping": [{ "name": "id", "type": "uint256" }] },
//!     "primaryType": "Ping",
//!     "domain": { "name": "Example", "chainId": 1 },
//!     "message": { "id": 7 }
//! }"#
//! .parse()
//! .unwrap();
//! assert_eq!(typed.encode_type("Ping").unwrap(), "Ping(uint256 id)");
//! assert_eq!(typed.sign_hash().unwrap().len(), 32);
//! ```

mod error;
pub use error::{Eip712Error, Result};

mod types;
pub use types::{Eip712Domain, Eip712Field, TypedData, Types, EIP712_DOMAIN};

mod value;

mod encoder;
pub use encoder::{ArrayEncoding, Encoder};

mod digest;
