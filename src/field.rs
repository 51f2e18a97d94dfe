//! Field-level encode/merge helpers (`spec.md` §4.11): each function here
//! binds a field number and repetition kind to an element codec. A hand
//! written `Message` implementation (`src/message.rs`) calls one of these
//! per field, the same way generated protobuf code emits one call site per
//! field into a free function from its runtime's encoding module (compare
//! the per-field-type functions in the `prost::encoding` module this crate's
//! wire format is cross-checked against).
//!
//! Encode-side helpers take the field's current value (and, for singular
//! scalars, its declared zero-value default) and decide whether to emit
//! anything at all. Merge-side helpers take a tag *already split* into
//! `(field_number, wire_type)` by the message decode loop — field.rs only
//! ever sees the wire type, never re-reads the tag — and apply the
//! packed/unpacked tolerance rule from §4.12 where it applies.

use crate::{
  array, codec::Codec, error::DecodeError, message::Message, reader::Reader, varint::MAX_VARINT64_BYTES,
  wire::WireType, writer::Writer,
};

/// Bytes a tag for `(field_number, wire_type)` would occupy.
#[inline]
pub fn tag_len(field_number: u32, wire_type: WireType) -> usize {
  crate::varint::encoded_len_varint(crate::wire::pack_tag(field_number, wire_type))
}

// ---------------------------------------------------------------------
// Singular scalar (proto3 default elision)
// ---------------------------------------------------------------------

pub fn encode_singular<C: Codec, const SAFE: bool>(
  field_number: u32,
  value: C::Value,
  default: C::Value,
  w: &mut Writer,
) -> Option<()>
where
  C::Value: PartialEq,
{
  if value == default {
    return Some(());
  }
  w.write_tag::<SAFE>(field_number, C::WIRE_TYPE)?;
  C::encode::<SAFE>(value, w)
}

pub fn singular_encoded_len<C: Codec>(field_number: u32, value: C::Value, default: C::Value) -> usize
where
  C::Value: PartialEq,
{
  if value == default {
    0
  } else {
    tag_len(field_number, C::WIRE_TYPE) + C::encoded_len(value)
  }
}

/// The tag matched the field exactly; decode in place (last-wins on repeat,
/// per `spec.md` §4.12 — the caller simply overwrites the slot).
pub fn merge_singular<C: Codec, const SAFE: bool>(wire_type: WireType, r: &mut Reader) -> Result<C::Value, DecodeError> {
  if wire_type != C::WIRE_TYPE {
    return Err(DecodeError::WireTypeMismatch { actual: wire_type, expected: C::WIRE_TYPE });
  }
  C::decode::<SAFE>(r).ok_or(DecodeError::BufferUnderflow)
}

// ---------------------------------------------------------------------
// Optional (explicit presence)
// ---------------------------------------------------------------------

pub fn encode_optional<C: Codec, const SAFE: bool>(field_number: u32, value: Option<C::Value>, w: &mut Writer) -> Option<()> {
  match value {
    None => Some(()),
    Some(v) => {
      w.write_tag::<SAFE>(field_number, C::WIRE_TYPE)?;
      C::encode::<SAFE>(v, w)
    }
  }
}

pub fn optional_encoded_len<C: Codec>(field_number: u32, value: Option<C::Value>) -> usize {
  match value {
    None => 0,
    Some(v) => tag_len(field_number, C::WIRE_TYPE) + C::encoded_len(v),
  }
}

// ---------------------------------------------------------------------
// Repeated (unpacked and packed), with the decode-side tolerance rule
// ---------------------------------------------------------------------

pub fn encode_repeated<C: Codec, const SAFE: bool>(field_number: u32, values: &[C::Value], w: &mut Writer) -> Option<()> {
  for &v in values {
    w.write_tag::<SAFE>(field_number, C::WIRE_TYPE)?;
    C::encode::<SAFE>(v, w)?;
  }
  Some(())
}

pub fn repeated_encoded_len<C: Codec>(field_number: u32, values: &[C::Value]) -> usize {
  let per_tag = tag_len(field_number, C::WIRE_TYPE);
  values.iter().copied().map(|v| per_tag + C::encoded_len(v)).sum()
}

pub fn encode_packed<C: Codec, const SAFE: bool>(field_number: u32, values: &[C::Value], w: &mut Writer) -> Option<()> {
  if values.is_empty() {
    return Some(());
  }
  w.write_tag::<SAFE>(field_number, WireType::Len)?;
  array::encode_packed::<C, SAFE>(values, w)
}

pub fn packed_encoded_len<C: Codec>(field_number: u32, values: &[C::Value]) -> usize {
  if values.is_empty() {
    return 0;
  }
  tag_len(field_number, WireType::Len) + array::packed_encoded_len::<C>(values)
}

/// Handles one occurrence of a repeated scalar field, accepting either its
/// native wire type (unpacked) or `Len` (packed) and pushing onto `out` — the
/// "repeated tolerance" rule from `spec.md` §4.12/§8.8.
pub fn merge_repeated_packable<C: Codec, const SAFE: bool>(
  wire_type: WireType,
  r: &mut Reader,
  out: &mut Vec<C::Value>,
) -> Result<(), DecodeError> {
  if wire_type == WireType::Len {
    let mut decoded = array::decode_packed::<C, SAFE>(r).ok_or(DecodeError::LengthPrefixOverrun)?;
    out.append(&mut decoded);
    Ok(())
  } else if wire_type == C::WIRE_TYPE {
    out.push(C::decode::<SAFE>(r).ok_or(DecodeError::BufferUnderflow)?);
    Ok(())
  } else {
    Err(DecodeError::WireTypeMismatch { actual: wire_type, expected: C::WIRE_TYPE })
  }
}

// ---------------------------------------------------------------------
// bytes / string fields (not `Codec`-driven: the array codec's value type
// is a borrowed slice, not a `Copy` scalar)
// ---------------------------------------------------------------------

pub fn encode_bytes_field<const SAFE: bool>(field_number: u32, value: &[u8], w: &mut Writer) -> Option<()> {
  if value.is_empty() {
    return Some(());
  }
  w.write_tag::<SAFE>(field_number, WireType::Len)?;
  array::encode_bytes::<SAFE>(value, w)
}

pub fn bytes_field_encoded_len(field_number: u32, value: &[u8]) -> usize {
  if value.is_empty() {
    0
  } else {
    tag_len(field_number, WireType::Len) + array::bytes_encoded_len(value)
  }
}

pub fn merge_bytes_field<'a, const SAFE: bool>(wire_type: WireType, r: &mut Reader<'a>) -> Result<&'a [u8], DecodeError> {
  if wire_type != WireType::Len {
    return Err(DecodeError::WireTypeMismatch { actual: wire_type, expected: WireType::Len });
  }
  array::decode_bytes::<SAFE>(r).ok_or(DecodeError::LengthPrefixOverrun)
}

pub fn encode_str_field<const SAFE: bool>(field_number: u32, value: &str, w: &mut Writer) -> Option<()> {
  if value.is_empty() {
    return Some(());
  }
  w.write_tag::<SAFE>(field_number, WireType::Len)?;
  array::encode_str::<SAFE>(value, w)
}

pub fn str_field_encoded_len(field_number: u32, value: &str) -> usize {
  if value.is_empty() {
    0
  } else {
    tag_len(field_number, WireType::Len) + array::str_encoded_len(value)
  }
}

pub fn merge_str_field<'a, const SAFE: bool>(wire_type: WireType, r: &mut Reader<'a>) -> Result<&'a str, DecodeError> {
  if wire_type != WireType::Len {
    return Err(DecodeError::WireTypeMismatch { actual: wire_type, expected: WireType::Len });
  }
  array::decode_str::<SAFE>(r).ok_or(DecodeError::LengthPrefixOverrun)
}

// ---------------------------------------------------------------------
// Nested message fields
// ---------------------------------------------------------------------

pub fn encode_message_field<M: Message, const SAFE: bool>(field_number: u32, value: &M, w: &mut Writer) -> Option<()> {
  w.write_tag::<SAFE>(field_number, WireType::Len)?;
  let len = value.encoded_len();
  array::write_length_delimited::<SAFE>(len, w, |w| value.encode::<SAFE>(w))
}

pub fn message_field_encoded_len<M: Message>(field_number: u32, value: &M) -> usize {
  let len = value.encoded_len();
  tag_len(field_number, WireType::Len) + crate::varint::encoded_len_varint(len as u64) + len
}

/// Reads a nested message's length prefix, confines decoding to exactly that
/// many bytes, and requires the message to consume the sub-reader fully —
/// the message decode loop's own termination condition ("consumed when the
/// view is exhausted", §4.12) does the "straddled the boundary" check for us.
pub fn merge_message_field<M: Message, const SAFE: bool>(wire_type: WireType, r: &mut Reader) -> Result<M, DecodeError> {
  if wire_type != WireType::Len {
    return Err(DecodeError::WireTypeMismatch { actual: wire_type, expected: WireType::Len });
  }
  let len = r.read_varint::<SAFE>(MAX_VARINT64_BYTES).ok_or(DecodeError::BufferUnderflow)? as usize;
  let mut sub = r.sub_reader::<SAFE>(len).ok_or(DecodeError::LengthPrefixOverrun)?;
  let value = M::decode::<SAFE>(&mut sub)?;
  if sub.has_remaining() {
    return Err(DecodeError::LengthPrefixOverrun);
  }
  r.skip_bytes::<SAFE>(len).ok_or(DecodeError::BufferUnderflow)?;
  Ok(value)
}
