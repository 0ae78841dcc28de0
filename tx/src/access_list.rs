use ethcodec_primitives::{Address, B256};
use ethcodec_rlp::{BufMut, Decodable, DecodeError, Encodable, Header};

/// Storage slots of one address that a transaction declares up front
/// (EIP-2930).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AccessListItem {
    /// Accessed account.
    pub address: Address,
    /// Accessed storage keys of that account.
    pub storage_keys: Vec<B256>,
}

/// An access list, written as `[[address, [key, ...]], ...]`.
pub type AccessList = Vec<AccessListItem>;

impl AccessListItem {
    fn payload_length(&self) -> usize {
        self.address.length() + self.storage_keys.length()
    }
}

impl Encodable for AccessListItem {
    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        Header { list: true, payload_length }.length() + payload_length
    }

    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.payload_length() }.encode(out);
        self.address.encode(out);
        self.storage_keys.encode(out);
    }
}

impl Decodable for AccessListItem {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(DecodeError::UnexpectedString);
        }
        let (mut payload, rest) = buf.split_at(header.payload_length);
        let item = Self {
            address: Address::decode(&mut payload)?,
            storage_keys: Vec::<B256>::decode(&mut payload)?,
        };
        if !payload.is_empty() {
            return Err(DecodeError::Custom("access list item has extra fields"));
        }
        *buf = rest;
        Ok(item)
    }
}
