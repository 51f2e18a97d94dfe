use crate::varint::encode_varint;

/// A non-owning, bounded window over a caller-supplied byte buffer, with a
/// write cursor. Every `write_*` method is safety-mode parameterized per
/// `spec.md` §4.2: called as `write_u8::<true>(..)` it bounds-checks and
/// returns `None` on overflow; called as `write_u8::<false>(..)` it trusts
/// the caller and skips the manual check (see `src/varint.rs` docs for why
/// that's implemented via `debug_assert!` plus ordinary slice indexing
/// rather than literal `unsafe {}`).
///
/// Mirrors the teacher crate's `MessageWriter`: an `idx` cursor into a
/// borrowed `&mut [u8]`, with `index()` telling the caller exactly how much
/// was written and nothing past that index ever touched.
pub struct Writer<'a> {
  data: &'a mut [u8],
  idx: usize,
}

impl<'a> Writer<'a> {
  #[inline]
  pub fn new(data: &'a mut [u8]) -> Writer<'a> { Writer { data, idx: 0 } }

  /// Bytes written so far; nothing at or past this index in the backing
  /// slice has been modified yet.
  #[inline]
  pub fn index(&self) -> usize { self.idx }

  /// Bytes remaining in the backing slice.
  #[inline]
  pub fn remaining(&self) -> usize { self.data.len() - self.idx }

  #[inline]
  pub fn write_byte<const SAFE: bool>(&mut self, byte: u8) -> Option<()> {
    if SAFE {
      if self.idx >= self.data.len() {
        return None;
      }
    } else {
      debug_assert!(self.idx < self.data.len(), "write_byte: buffer overflow in unsafe mode");
    }
    self.data[self.idx] = byte;
    self.idx += 1;
    Some(())
  }

  #[inline]
  pub fn write_bytes<const SAFE: bool>(&mut self, bytes: &[u8]) -> Option<()> {
    let end = self.idx + bytes.len();
    if SAFE {
      if end > self.data.len() {
        return None;
      }
    } else {
      debug_assert!(end <= self.data.len(), "write_bytes: buffer overflow in unsafe mode");
    }
    self.data[self.idx..end].copy_from_slice(bytes);
    self.idx = end;
    Some(())
  }

  #[inline]
  pub fn write_varint<const SAFE: bool>(&mut self, value: u64) -> Option<()> {
    encode_varint::<SAFE>(value, self.data, &mut self.idx)
  }

  /// Writes a tag: `varint((field_number << 3) | wire_type)`.
  #[inline]
  pub fn write_tag<const SAFE: bool>(&mut self, field_number: u32, wire_type: crate::wire::WireType) -> Option<()> {
    self.write_varint::<SAFE>(crate::wire::pack_tag(field_number, wire_type))
  }

  #[inline]
  pub fn write_fixed32<const SAFE: bool>(&mut self, value: u32) -> Option<()> {
    self.write_bytes::<SAFE>(&value.to_le_bytes())
  }

  #[inline]
  pub fn write_fixed64<const SAFE: bool>(&mut self, value: u64) -> Option<()> {
    self.write_bytes::<SAFE>(&value.to_le_bytes())
  }
}
