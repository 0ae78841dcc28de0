use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::{numeric::from_hex, B160, B256, B512};

macro_rules! impl_fixed_hash_serde {
    ($t:ty, $n:literal) => {
        impl Serialize for $t {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&crate::to_hex(self.as_bytes()))
            }
        }

        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                let bytes = from_hex(&text).map_err(D::Error::custom)?;
                if bytes.len() != $n {
                    return Err(D::Error::invalid_length(bytes.len(), &stringify!($n)));
                }
                Ok(<$t>::from_slice(&bytes))
            }
        }
    };
}

impl_fixed_hash_serde!(B160, 20);
impl_fixed_hash_serde!(B256, 32);
impl_fixed_hash_serde!(B512, 64);
