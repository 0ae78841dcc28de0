use derive_more::{AsRef, Deref};
use fixed_hash::{construct_fixed_hash, impl_fixed_hash_conversions};

use crate::U256;

construct_fixed_hash! {
    /// 512 bits type, used for uncompressed public keys and node ids.
    #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary, proptest_derive::Arbitrary))]
    #[derive(AsRef, Deref)]
    pub struct B512(64);
}

construct_fixed_hash! {
    /// 256 bits type. An EVM word.
    #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary, proptest_derive::Arbitrary))]
    #[derive(AsRef, Deref)]
    pub struct B256(32);
}

construct_fixed_hash! {
    /// 160 bits type. An address.
    #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary, proptest_derive::Arbitrary))]
    #[derive(AsRef, Deref)]
    pub struct B160(20);
}

// B160 -> B256 left-pads, B256 -> B160 keeps the low 20 bytes
impl_fixed_hash_conversions!(B256, B160);

impl From<u64> for B160 {
    fn from(fr: u64) -> Self {
        let mut address = B160::zero();
        address.0[12..].copy_from_slice(&fr.to_be_bytes());
        address
    }
}

impl From<U256> for B256 {
    fn from(fr: U256) -> Self {
        B256(fr.to_be_bytes::<32>())
    }
}

impl From<B256> for U256 {
    fn from(fr: B256) -> Self {
        U256::from_be_bytes(fr.0)
    }
}

impl From<&B256> for U256 {
    fn from(fr: &B256) -> Self {
        U256::from_be_bytes(fr.0)
    }
}

#[cfg(feature = "primitive-types")]
mod primitive_types_impls {
    use super::{B160, B256};

    impl From<primitive_types::H160> for B160 {
        fn from(fr: primitive_types::H160) -> Self {
            B160(fr.0)
        }
    }

    impl From<B160> for primitive_types::H160 {
        fn from(fr: B160) -> Self {
            primitive_types::H160(fr.0)
        }
    }

    impl From<primitive_types::H256> for B256 {
        fn from(fr: primitive_types::H256) -> Self {
            B256(fr.0)
        }
    }

    impl From<B256> for primitive_types::H256 {
        fn from(fr: B256) -> Self {
            primitive_types::H256(fr.0)
        }
    }
}
