use crate::{
  varint::{decode_varint, skip_varint, MAX_VARINT32_BYTES, MAX_VARINT64_BYTES},
  wire::{unpack_tag, WireType},
};

/// A non-owning, bounded window over caller-owned bytes with a read cursor.
/// This is the crate's "byte view" (`spec.md` §3/§4.1): `len()` is the
/// remaining size, `remaining_slice()` is the subspan from the cursor to the
/// end, and `index()` tells a caller exactly how many bytes were consumed —
/// nested codecs use it to enforce the length-delimited boundary (§4.10).
///
/// Every `read_*`/`skip_*` method is safety-mode parameterized, matching
/// [`crate::writer::Writer`].
#[derive(Clone, Copy)]
pub struct Reader<'a> {
  data: &'a [u8],
  idx: usize,
}

impl<'a> Reader<'a> {
  #[inline]
  pub fn new(data: &'a [u8]) -> Reader<'a> { Reader { data, idx: 0 } }

  /// Bytes consumed so far.
  #[inline]
  pub fn index(&self) -> usize { self.idx }

  /// Bytes remaining to be read.
  #[inline]
  pub fn remaining(&self) -> usize { self.data.len() - self.idx }

  #[inline]
  pub fn has_remaining(&self) -> bool { self.idx < self.data.len() }

  /// The subspan from the cursor to the end of the view.
  #[inline]
  pub fn remaining_slice(&self) -> &'a [u8] { &self.data[self.idx..] }

  /// Creates a bounded sub-reader over exactly the next `len` bytes, without
  /// advancing `self`. Used by length-delimited decoding to confine a nested
  /// message/array/string to its claimed length (§4.10, §4.12).
  #[inline]
  pub fn sub_reader<const SAFE: bool>(&self, len: usize) -> Option<Reader<'a>> {
    let end = self.idx + len;
    if SAFE {
      if end > self.data.len() {
        return None;
      }
    } else {
      debug_assert!(end <= self.data.len(), "sub_reader: buffer underflow in unsafe mode");
    }
    Some(Reader { data: &self.data[self.idx..end], idx: 0 })
  }

  #[inline]
  pub fn read_byte<const SAFE: bool>(&mut self) -> Option<u8> {
    if SAFE {
      if self.idx >= self.data.len() {
        return None;
      }
    } else {
      debug_assert!(self.idx < self.data.len(), "read_byte: buffer underflow in unsafe mode");
    }
    let b = self.data[self.idx];
    self.idx += 1;
    Some(b)
  }

  /// Reads exactly `len` bytes, returning a slice borrowed from the original
  /// buffer (no copy — the returned slice outlives `self`, same as the
  /// teacher crate's `read_buf`).
  #[inline]
  pub fn read_buf<const SAFE: bool>(&mut self, len: usize) -> Option<&'a [u8]> {
    let end = self.idx + len;
    if SAFE {
      if end > self.data.len() {
        return None;
      }
    } else {
      debug_assert!(end <= self.data.len(), "read_buf: buffer underflow in unsafe mode");
    }
    let out = &self.data[self.idx..end];
    self.idx = end;
    Some(out)
  }

  #[inline]
  pub fn skip_bytes<const SAFE: bool>(&mut self, len: usize) -> Option<()> {
    let end = self.idx + len;
    if SAFE {
      if end > self.data.len() {
        return None;
      }
    } else {
      debug_assert!(end <= self.data.len(), "skip_bytes: buffer underflow in unsafe mode");
    }
    self.idx = end;
    Some(())
  }

  #[inline]
  pub fn read_varint<const SAFE: bool>(&mut self, max_bytes: usize) -> Option<u64> {
    decode_varint::<SAFE>(self.data, &mut self.idx, max_bytes)
  }

  #[inline]
  pub fn skip_varint<const SAFE: bool>(&mut self, max_bytes: usize) -> Option<()> {
    skip_varint::<SAFE>(self.data, &mut self.idx, max_bytes)
  }

  /// Reads and unpacks a field tag.
  #[inline]
  pub fn read_tag<const SAFE: bool>(&mut self) -> Option<(u32, WireType)> {
    let raw = self.read_varint::<SAFE>(MAX_VARINT32_BYTES)?;
    unpack_tag(raw)
  }

  #[inline]
  pub fn read_fixed32<const SAFE: bool>(&mut self) -> Option<u32> {
    let bytes = self.read_buf::<SAFE>(4)?;
    Some(u32::from_le_bytes(bytes.try_into().unwrap()))
  }

  #[inline]
  pub fn read_fixed64<const SAFE: bool>(&mut self) -> Option<u64> {
    let bytes = self.read_buf::<SAFE>(8)?;
    Some(u64::from_le_bytes(bytes.try_into().unwrap()))
  }

  /// Advances past a single encoded value of the given wire type without
  /// materializing it: the unknown-field skip table from `spec.md` §4.12.
  #[inline]
  pub fn skip_by_wire_type<const SAFE: bool>(&mut self, wire_type: WireType) -> Option<()> {
    match wire_type {
      WireType::Varint => self.skip_varint::<SAFE>(MAX_VARINT64_BYTES),
      WireType::I64 => self.skip_bytes::<SAFE>(8),
      WireType::I32 => self.skip_bytes::<SAFE>(4),
      WireType::Len => {
        let len = self.read_varint::<SAFE>(MAX_VARINT64_BYTES)? as usize;
        self.skip_bytes::<SAFE>(len)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn varint_150_round_trip() {
    let mut r = Reader::new(&[0x96, 0x01]);
    assert_eq!(r.read_varint::<true>(crate::varint::MAX_VARINT64_BYTES), Some(150));
    assert_eq!(r.remaining(), 0);
  }

  #[test]
  fn fixed_width_little_endian() {
    let mut r = Reader::new(&[0x04, 0x03, 0x02, 0x01]);
    assert_eq!(r.read_fixed32::<true>(), Some(0x0102_0304));
  }

  #[test]
  fn skip_by_wire_type_advances_exactly() {
    // varint 0x96 0x01 then one trailing sentinel byte.
    let mut r = Reader::new(&[0x96, 0x01, 0xFF]);
    r.skip_by_wire_type::<true>(WireType::Varint).unwrap();
    assert_eq!(r.index(), 2);

    let mut r = Reader::new(&[0x02, b'h', b'i', 0xFF]);
    r.skip_by_wire_type::<true>(WireType::Len).unwrap();
    assert_eq!(r.index(), 3);
  }

  #[test]
  fn sub_reader_confines_to_length() {
    let mut r = Reader::new(&[1, 2, 3, 4, 5]);
    let sub = r.sub_reader::<true>(3).unwrap();
    assert_eq!(sub.remaining_slice(), &[1, 2, 3]);
    r.skip_bytes::<true>(3).unwrap();
    assert_eq!(r.remaining_slice(), &[4, 5]);
  }
}
