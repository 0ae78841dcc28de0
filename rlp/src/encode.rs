use core::borrow::Borrow;

use arrayvec::ArrayVec;
use auto_impl::auto_impl;
use bytes::{BufMut, Bytes, BytesMut};

use crate::{Header, EMPTY_STRING_CODE, SHORT_PAYLOAD_MAX};

/// Strips leading zero bytes.
pub(crate) fn zeroless_view(v: &impl AsRef<[u8]>) -> &[u8] {
    let v = v.as_ref();
    &v[v.iter().take_while(|&&b| b == 0).count()..]
}

/// Length of the prefix for a payload of `payload_length` bytes.
pub const fn length_of_length(payload_length: usize) -> usize {
    if payload_length <= SHORT_PAYLOAD_MAX {
        1
    } else {
        1 + core::mem::size_of::<usize>() - payload_length.leading_zeros() as usize / 8
    }
}

/// A type with a canonical RLP encoding.
#[auto_impl(&, &mut, Box, Rc, Arc)]
pub trait Encodable {
    /// Appends the encoding of `self` to `out`.
    fn encode(&self, out: &mut dyn BufMut);

    /// Length of the encoding of `self`, prefix included.
    fn length(&self) -> usize {
        let mut out = Vec::new();
        self.encode(&mut out);
        out.len()
    }
}

/// Types whose encoding never exceeds `LEN` bytes.
///
/// # Safety
/// An implementation with a `LEN` smaller than the real maximum makes
/// [`encode_fixed_size`] write out of bounds of its buffer.
pub unsafe trait MaxEncodedLen<const LEN: usize>: Encodable {}

/// [`MaxEncodedLen`] as an associated constant.
///
/// # Safety
/// See [`MaxEncodedLen`].
pub unsafe trait MaxEncodedLenAssoc: Encodable {
    /// Upper bound on the encoded length.
    const LEN: usize;
}

macro_rules! impl_max_encoded_len {
    ($t:ty, $len:block) => {
        unsafe impl MaxEncodedLen<{ $len }> for $t {}
        unsafe impl MaxEncodedLenAssoc for $t {
            const LEN: usize = $len;
        }
    };
}

impl_max_encoded_len!(bool, { 1 });
impl_max_encoded_len!(u8, { 2 });
impl_max_encoded_len!(u16, { 3 });
impl_max_encoded_len!(u32, { 5 });
impl_max_encoded_len!(u64, { 9 });
impl_max_encoded_len!(u128, { 17 });

impl Encodable for [u8] {
    fn length(&self) -> usize {
        let mut len = self.len();
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            len += length_of_length(self.len());
        }
        len
    }

    fn encode(&self, out: &mut dyn BufMut) {
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            Header {
                list: false,
                payload_length: self.len(),
            }
            .encode(out);
        }
        out.put_slice(self);
    }
}

impl<const N: usize> Encodable for [u8; N] {
    fn length(&self) -> usize {
        self[..].length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self[..].encode(out)
    }
}

impl Encodable for str {
    fn length(&self) -> usize {
        self.as_bytes().length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self.as_bytes().encode(out)
    }
}

impl Encodable for String {
    fn length(&self) -> usize {
        self.as_bytes().length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self.as_bytes().encode(out)
    }
}

impl Encodable for Bytes {
    fn length(&self) -> usize {
        self[..].length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self[..].encode(out)
    }
}

impl Encodable for BytesMut {
    fn length(&self) -> usize {
        self[..].length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self[..].encode(out)
    }
}

macro_rules! encodable_uint {
    ($t:ty) => {
        impl Encodable for $t {
            fn length(&self) -> usize {
                if *self < <$t>::from(EMPTY_STRING_CODE) {
                    1
                } else {
                    1 + (<$t>::BITS as usize / 8) - (self.leading_zeros() as usize / 8)
                }
            }

            fn encode(&self, out: &mut dyn BufMut) {
                if *self == 0 {
                    out.put_u8(EMPTY_STRING_CODE);
                } else if *self < <$t>::from(EMPTY_STRING_CODE) {
                    out.put_u8(*self as u8);
                } else {
                    let be = self.to_be_bytes();
                    let be = zeroless_view(&be);
                    out.put_u8(EMPTY_STRING_CODE + be.len() as u8);
                    out.put_slice(be);
                }
            }
        }
    };
}

encodable_uint!(u8);
encodable_uint!(u16);
encodable_uint!(u32);
encodable_uint!(u64);
encodable_uint!(u128);

impl Encodable for usize {
    fn length(&self) -> usize {
        (*self as u64).length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        (*self as u64).encode(out)
    }
}

impl Encodable for bool {
    fn length(&self) -> usize {
        1
    }

    fn encode(&self, out: &mut dyn BufMut) {
        (*self as u8).encode(out)
    }
}

#[cfg(feature = "ruint")]
mod ruint_impls {
    use bytes::BufMut;
    use ruint::aliases::U256;

    use super::{zeroless_view, Encodable};
    use crate::EMPTY_STRING_CODE;

    impl Encodable for U256 {
        fn length(&self) -> usize {
            let bytes = (self.bit_len() + 7) / 8;
            if *self < U256::from(EMPTY_STRING_CODE) {
                1
            } else {
                1 + bytes
            }
        }

        fn encode(&self, out: &mut dyn BufMut) {
            if self.is_zero() {
                out.put_u8(EMPTY_STRING_CODE);
            } else if *self < U256::from(EMPTY_STRING_CODE) {
                out.put_u8(self.as_limbs()[0] as u8);
            } else {
                let be = self.to_be_bytes::<32>();
                let be = zeroless_view(&be);
                out.put_u8(EMPTY_STRING_CODE + be.len() as u8);
                out.put_slice(be);
            }
        }
    }
}

/// Length of a list payload of `v`, prefix included.
pub fn list_length<E, K>(v: &[K]) -> usize
where
    E: Encodable + ?Sized,
    K: Borrow<E>,
{
    let payload_length = rlp_list_header(v).payload_length;
    length_of_length(payload_length) + payload_length
}

fn rlp_list_header<E, K>(v: &[K]) -> Header
where
    E: Encodable + ?Sized,
    K: Borrow<E>,
{
    let mut h = Header {
        list: true,
        payload_length: 0,
    };
    for x in v {
        h.payload_length += x.borrow().length();
    }
    h
}

/// Encodes `v` as a list. The prefix covers the concatenated item encodings,
/// not the item count.
pub fn encode_list<E, K>(v: &[K], out: &mut dyn BufMut)
where
    E: Encodable + ?Sized,
    K: Borrow<E>,
{
    let h = rlp_list_header(v);
    h.encode(out);
    for x in v {
        x.borrow().encode(out);
    }
}

/// Encodes the items of an iterator as a list.
pub fn encode_iter<K>(i: impl Iterator<Item = K> + Clone, out: &mut dyn BufMut)
where
    K: Encodable,
{
    let mut h = Header {
        list: true,
        payload_length: 0,
    };
    for x in i.clone() {
        h.payload_length += x.length();
    }

    h.encode(out);
    for x in i {
        x.encode(out);
    }
}

impl<E> Encodable for Vec<E>
where
    E: Encodable,
{
    fn length(&self) -> usize {
        list_length::<E, E>(self)
    }

    fn encode(&self, out: &mut dyn BufMut) {
        encode_list::<E, E>(self, out)
    }
}

/// Encodes `v` into a stack buffer sized by its [`MaxEncodedLen`].
pub fn encode_fixed_size<E: MaxEncodedLen<LEN>, const LEN: usize>(v: &E) -> ArrayVec<u8, LEN> {
    let mut out = ArrayVec::from([0_u8; LEN]);

    let mut s = out.as_mut_slice();

    v.encode(&mut s);

    let final_len = LEN - s.len();
    out.truncate(final_len);

    out
}
