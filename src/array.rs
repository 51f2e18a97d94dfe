//! The length-delimited container codec (`spec.md` §4.10): `bytes`,
//! `string`, packed-repeated scalars, and (via [`read_length_delimited`] /
//! [`write_length_delimited`]) the framing nested messages and map entries
//! also use.
//!
//! Encoding is two-pass: compute the total payload length from each
//! element's [`Codec::encoded_len`], write that length as a varint, then
//! write the elements. Decoding confines the element loop to a sub-reader
//! bounded by the claimed length, so an element that would read past the
//! boundary simply fails as an ordinary buffer underflow — there is no
//! separate "straddled the boundary" check to get wrong.

use crate::{
  codec::Codec,
  reader::Reader,
  varint::{encoded_len_varint, MAX_VARINT64_BYTES},
  writer::Writer,
};

/// Writes a varint length prefix, then `body`, which must write exactly
/// `len` bytes. Shared framing for bytes/string/packed-array/nested-message
/// encoding.
#[inline]
pub fn write_length_delimited<const SAFE: bool>(
  len: usize,
  w: &mut Writer,
  body: impl FnOnce(&mut Writer) -> Option<()>,
) -> Option<()> {
  w.write_varint::<SAFE>(len as u64)?;
  body(w)
}

/// Reads a varint length prefix, runs `body` on a sub-reader bounded to
/// exactly that many bytes, then requires `body` to have consumed the whole
/// sub-reader (a partial consume means the payload didn't match its own
/// length prefix — fatal, per `spec.md` §4.10's "element straddling the
/// boundary is a fatal malformed-message error").
#[inline]
pub fn read_length_delimited<'a, const SAFE: bool, T>(
  r: &mut Reader<'a>,
  body: impl FnOnce(&mut Reader<'a>) -> Option<T>,
) -> Option<T> {
  let len = r.read_varint::<SAFE>(MAX_VARINT64_BYTES)? as usize;
  let mut sub = r.sub_reader::<SAFE>(len)?;
  let value = body(&mut sub)?;
  if sub.has_remaining() {
    return None;
  }
  r.skip_bytes::<SAFE>(len)?;
  Some(value)
}

#[inline]
pub fn bytes_encoded_len(bytes: &[u8]) -> usize { encoded_len_varint(bytes.len() as u64) + bytes.len() }

#[inline]
pub fn encode_bytes<const SAFE: bool>(bytes: &[u8], w: &mut Writer) -> Option<()> {
  write_length_delimited::<SAFE>(bytes.len(), w, |w| w.write_bytes::<SAFE>(bytes))
}

/// Borrows the decoded bytes straight out of the original buffer: no copy.
#[inline]
pub fn decode_bytes<'a, const SAFE: bool>(r: &mut Reader<'a>) -> Option<&'a [u8]> {
  read_length_delimited::<SAFE, _>(r, |sub| sub.read_buf::<SAFE>(sub.remaining()))
}

#[inline]
pub fn str_encoded_len(s: &str) -> usize { bytes_encoded_len(s.as_bytes()) }

#[inline]
pub fn encode_str<const SAFE: bool>(s: &str, w: &mut Writer) -> Option<()> { encode_bytes::<SAFE>(s.as_bytes(), w) }

#[inline]
pub fn decode_str<'a, const SAFE: bool>(r: &mut Reader<'a>) -> Option<&'a str> {
  std::str::from_utf8(decode_bytes::<SAFE>(r)?).ok()
}

/// `spec.md` §4.10/§4.11: a length-delimited block containing concatenated
/// scalar encodings with no per-element tag. `C` must be a primitive
/// scalar/bool/enum codec (varint or fixed wire type, never `Len` itself).
pub fn packed_encoded_len<C: Codec>(values: &[C::Value]) -> usize {
  let payload: usize = values.iter().copied().map(C::encoded_len).sum();
  encoded_len_varint(payload as u64) + payload
}

pub fn encode_packed<C: Codec, const SAFE: bool>(values: &[C::Value], w: &mut Writer) -> Option<()> {
  let payload: usize = values.iter().copied().map(C::encoded_len).sum();
  write_length_delimited::<SAFE>(payload, w, |w| {
    for &v in values {
      C::encode::<SAFE>(v, w)?;
    }
    Some(())
  })
}

pub fn decode_packed<C: Codec, const SAFE: bool>(r: &mut Reader) -> Option<Vec<C::Value>> {
  read_length_delimited::<SAFE, _>(r, |sub| {
    let mut out = Vec::new();
    while sub.has_remaining() {
      out.push(C::decode::<SAFE>(sub)?);
    }
    Some(out)
  })
}
