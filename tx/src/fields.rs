use ethcodec_rlp::{Decodable, DecodeError, Header, EMPTY_LIST_CODE};

/// The raw items of one RLP list, read in order.
///
/// Splitting first lets the envelope decoder count fields and inspect the
/// shape of an item before committing to a layout.
#[derive(Debug)]
pub(crate) struct Fields<'a> {
    raw: Vec<&'a [u8]>,
    pos: usize,
}

impl<'a> Fields<'a> {
    /// Splits `buf`, which must hold exactly one list.
    pub(crate) fn parse(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let mut rest = buf;
        let header = Header::decode(&mut rest)?;
        if !header.list {
            return Err(DecodeError::UnexpectedString);
        }
        if rest.len() != header.payload_length {
            return Err(DecodeError::TrailingBytes);
        }

        let mut payload = rest;
        let mut raw = Vec::new();
        while !payload.is_empty() {
            let mut peek = payload;
            let item = Header::decode(&mut peek)?;
            let len = payload.len() - peek.len() + item.payload_length;
            let (field, tail) = payload.split_at(len);
            raw.push(field);
            payload = tail;
        }
        Ok(Self { raw, pos: 0 })
    }

    pub(crate) fn len(&self) -> usize {
        self.raw.len()
    }

    /// True when the item at `index` is a list.
    pub(crate) fn is_list_at(&self, index: usize) -> bool {
        self.raw
            .get(index)
            .and_then(|field| field.first())
            .map_or(false, |prefix| *prefix >= EMPTY_LIST_CODE)
    }

    /// Decodes the next field, which must span its whole item.
    pub(crate) fn next<T: Decodable>(&mut self) -> Result<T, DecodeError> {
        let field = self.raw.get(self.pos).ok_or(DecodeError::TruncatedInput)?;
        self.pos += 1;
        ethcodec_rlp::decode_exact(*field)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn splits_items() {
        // [ "cat", [1], 0x05 ]
        let buf = hex!("c783636174c10105");
        let mut fields = Fields::parse(&buf).unwrap();
        assert_eq!(fields.len(), 3);
        assert!(!fields.is_list_at(0));
        assert!(fields.is_list_at(1));
        assert!(!fields.is_list_at(3));
        assert_eq!(fields.next::<String>().unwrap(), "cat");
        assert_eq!(fields.next::<Vec<u8>>().unwrap(), vec![1]);
        assert_eq!(fields.next::<u8>().unwrap(), 5);
        assert_eq!(fields.next::<u8>(), Err(DecodeError::TruncatedInput));
    }

    #[test]
    fn rejects_non_lists_and_trailing_bytes() {
        assert_eq!(Fields::parse(&hex!("83636174")).unwrap_err(), DecodeError::UnexpectedString);
        assert_eq!(Fields::parse(&hex!("c0 00")).unwrap_err(), DecodeError::TrailingBytes);
        assert_eq!(Fields::parse(&hex!("c3 01")).unwrap_err(), DecodeError::TruncatedInput);
    }
}
