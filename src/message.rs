//! The message codec (`spec.md` §4.12): composes a statically known set of
//! field codecs into a record codec. There is no runtime field registry —
//! a message type implements [`Message`] by hand (or via generated code, not
//! provided here), calling the `src/field.rs` helpers once per field and
//! driving its decode loop with [`decode_fields`].
//!
//! [`decode_fields`] is the tag-dispatch loop from §4.12/§4.13: read a tag,
//! split it, hand `(field_number, wire_type)` to the caller's `dispatch`
//! closure, and skip anything the closure doesn't recognize by wire type
//! alone. This is the same shape as the teacher crate's `StructReader` (read
//! an id, match it, fall through to a skip) and as generated protobuf code's
//! `merge_field` match statement.

use crate::{
  error::DecodeError,
  reader::Reader,
  varint::MAX_VARINT32_BYTES,
  wire::{unpack_tag, WireType},
  writer::Writer,
};

/// A statically composed record: a fixed, declared set of fields, each
/// bound to a number and an element codec via `src/field.rs`.
pub trait Message: Sized {
  fn encode<const SAFE: bool>(&self, w: &mut Writer) -> Option<()>;
  fn decode<const SAFE: bool>(r: &mut Reader) -> Result<Self, DecodeError>;
  /// Sum of every field's contribution, used both as a standalone query and
  /// to size the length prefix when this message is nested inside another
  /// (`src/field.rs::encode_message_field`).
  fn encoded_len(&self) -> usize;

  /// Encodes into a freshly allocated, exactly sized buffer. Safe mode is
  /// used throughout, but `encoded_len` always reserves exactly enough room,
  /// so the only way this panics is a buggy `Message` impl whose
  /// `encoded_len` underreports what `encode` writes.
  fn encode_to_vec(&self) -> Vec<u8> {
    let mut buf = vec![0u8; self.encoded_len()];
    let mut w = Writer::new(&mut buf);
    self.encode::<true>(&mut w).expect("encoded_len must match what encode writes");
    buf
  }

  fn decode_from_slice(data: &[u8]) -> Result<Self, DecodeError> {
    let mut r = Reader::new(data);
    Self::decode::<true>(&mut r)
  }
}

/// Reads one field tag, distinguishing "input exhausted" (`Ok(None)`, the
/// normal loop terminator) from the fatal cases: a malformed varint, or a
/// wire type of 3/4 (group start/end), which this crate rejects outright
/// rather than silently skip (`spec.md` §3, §9).
fn read_field_tag<const SAFE: bool>(r: &mut Reader) -> Result<Option<(u32, WireType)>, DecodeError> {
  if !r.has_remaining() {
    return Ok(None);
  }
  let raw = r.read_varint::<SAFE>(MAX_VARINT32_BYTES).ok_or(DecodeError::MalformedVarint)?;
  let wire_id = (raw & 0x7) as u8;
  if wire_id == 3 || wire_id == 4 {
    return Err(DecodeError::UnsupportedWireType);
  }
  let (number, wire_type) = unpack_tag(raw).ok_or(DecodeError::UnsupportedWireType)?;
  Ok(Some((number, wire_type)))
}

/// Drives a message's decode loop. `dispatch` is called with each field's
/// `(number, wire_type)` and the reader positioned just after the tag; it
/// returns `Ok(true)` if it consumed the field's payload, `Ok(false)` if the
/// field number is unrecognized (in which case the payload is skipped here
/// by wire type alone, never by re-deriving the original field's codec —
/// `spec.md` §4.9's forward-compatibility requirement), or `Err` to abort
/// the whole decode.
pub fn decode_fields<const SAFE: bool>(
  r: &mut Reader,
  mut dispatch: impl FnMut(u32, WireType, &mut Reader) -> Result<bool, DecodeError>,
) -> Result<(), DecodeError> {
  while let Some((number, wire_type)) = read_field_tag::<SAFE>(r)? {
    let recognized = dispatch(number, wire_type, r)?;
    if !recognized {
      r.skip_by_wire_type::<SAFE>(wire_type).ok_or(DecodeError::BufferUnderflow)?;
    }
  }
  Ok(())
}
