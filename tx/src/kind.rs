use ethcodec_primitives::Address;
use ethcodec_rlp::{BufMut, Decodable, DecodeError, Encodable, EMPTY_STRING_CODE};

/// The `to` field: a call to an address, or contract creation written as the
/// empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TxKind {
    /// Contract creation.
    #[default]
    Create,
    /// A call to the given address.
    Call(Address),
}

impl TxKind {
    /// The callee, if any.
    pub fn to(&self) -> Option<&Address> {
        match self {
            TxKind::Create => None,
            TxKind::Call(to) => Some(to),
        }
    }
}

impl From<Option<Address>> for TxKind {
    fn from(to: Option<Address>) -> Self {
        to.map_or(TxKind::Create, TxKind::Call)
    }
}

impl From<Address> for TxKind {
    fn from(to: Address) -> Self {
        TxKind::Call(to)
    }
}

impl Encodable for TxKind {
    fn length(&self) -> usize {
        match self {
            TxKind::Create => 1,
            TxKind::Call(to) => to.length(),
        }
    }

    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            TxKind::Create => out.put_u8(EMPTY_STRING_CODE),
            TxKind::Call(to) => to.encode(out),
        }
    }
}

impl Decodable for TxKind {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        if buf.first() == Some(&EMPTY_STRING_CODE) {
            *buf = &buf[1..];
            return Ok(TxKind::Create);
        }
        Address::decode(buf).map(TxKind::Call)
    }
}
