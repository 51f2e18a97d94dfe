//! Map fields (`spec.md` §4.11: "Map: represented as repeated message-typed
//! entries with fields `1 = key`, `2 = value`, which decomposes to the
//! nested-message + field-codec machinery"). Rather than requiring every
//! map's key/value pairing to be hand-declared as its own entry message
//! type, this module frames entries directly, so a caller just calls
//! `map::encode`/`map::merge` the same way it calls the singular/repeated
//! helpers in `src/field.rs`.
//!
//! Three key/value shapes are covered: scalar-to-scalar, string-to-scalar,
//! and string-to-message — between them, the overwhelming majority of map
//! fields found in real `.proto` schemas (string keys dominate; scalar keys
//! are the next most common; message-typed keys are disallowed by the
//! format itself). Duplicate keys on decode follow the same last-wins rule
//! `spec.md` §4.12 mandates for singular fields, since each occurrence of
//! the map field is itself just a singular entry being appended and then
//! deduplicated by key.
//!
//! The teacher crate's own generics module (`bb_transfer::generics`) takes
//! the opposite approach for its own `HashMap<K, V>` support: a blanket
//! impl over its `MessageRead`/`MessageWrite` traits with no named entry
//! type, because its wire format has no per-field tag to frame an entry
//! with. Protobuf's map wire format is itself a repeated, tagged
//! `{1: key, 2: value}` message, so this module frames entries directly
//! instead of chasing a blanket-impl shape that doesn't fit the wire
//! format.

use std::collections::HashMap;
use std::hash::Hash;

use crate::{
  array, codec::Codec, error::DecodeError, field, message::Message, message::decode_fields, reader::Reader,
  varint::{encoded_len_varint, MAX_VARINT64_BYTES}, wire::WireType, writer::Writer,
};

// ---------------------------------------------------------------------
// scalar key, scalar value
// ---------------------------------------------------------------------

fn scalar_entry_len<KC: Codec, VC: Codec>(key: KC::Value, value: VC::Value) -> usize
where
  KC::Value: PartialEq + Default,
  VC::Value: PartialEq + Default,
{
  field::singular_encoded_len::<KC>(1, key, KC::Value::default())
    + field::singular_encoded_len::<VC>(2, value, VC::Value::default())
}

pub fn encoded_len<KC: Codec, VC: Codec>(field_number: u32, map: &HashMap<KC::Value, VC::Value>) -> usize
where
  KC::Value: Eq + Hash + PartialEq + Default,
  VC::Value: PartialEq + Default,
{
  map
    .iter()
    .map(|(&k, &v)| {
      let entry_len = scalar_entry_len::<KC, VC>(k, v);
      field::tag_len(field_number, WireType::Len) + encoded_len_varint(entry_len as u64) + entry_len
    })
    .sum()
}

pub fn encode<KC: Codec, VC: Codec, const SAFE: bool>(
  field_number: u32,
  map: &HashMap<KC::Value, VC::Value>,
  w: &mut Writer,
) -> Option<()>
where
  KC::Value: Eq + Hash + PartialEq + Default,
  VC::Value: PartialEq + Default,
{
  for (&k, &v) in map {
    let entry_len = scalar_entry_len::<KC, VC>(k, v);
    w.write_tag::<SAFE>(field_number, WireType::Len)?;
    array::write_length_delimited::<SAFE>(entry_len, w, |w| {
      field::encode_singular::<KC, SAFE>(1, k, KC::Value::default(), w)?;
      field::encode_singular::<VC, SAFE>(2, v, VC::Value::default(), w)
    })?;
  }
  Some(())
}

/// Handles one occurrence of the map field (one entry), inserting/
/// overwriting `key` in `out`.
pub fn merge<KC: Codec, VC: Codec, const SAFE: bool>(
  wire_type: WireType,
  r: &mut Reader,
  out: &mut HashMap<KC::Value, VC::Value>,
) -> Result<(), DecodeError>
where
  KC::Value: Eq + Hash + Default,
  VC::Value: Default,
{
  if wire_type != WireType::Len {
    return Err(DecodeError::WireTypeMismatch { actual: wire_type, expected: WireType::Len });
  }
  let len = r.read_varint::<SAFE>(MAX_VARINT64_BYTES).ok_or(DecodeError::BufferUnderflow)? as usize;
  let mut sub = r.sub_reader::<SAFE>(len).ok_or(DecodeError::LengthPrefixOverrun)?;
  let mut key = KC::Value::default();
  let mut value = VC::Value::default();
  decode_fields::<SAFE>(&mut sub, |number, wire_type, sub| match number {
    1 => {
      key = field::merge_singular::<KC, SAFE>(wire_type, sub)?;
      Ok(true)
    }
    2 => {
      value = field::merge_singular::<VC, SAFE>(wire_type, sub)?;
      Ok(true)
    }
    _ => Ok(false),
  })?;
  if sub.has_remaining() {
    return Err(DecodeError::LengthPrefixOverrun);
  }
  r.skip_bytes::<SAFE>(len).ok_or(DecodeError::BufferUnderflow)?;
  out.insert(key, value);
  Ok(())
}

// ---------------------------------------------------------------------
// string key, scalar value
// ---------------------------------------------------------------------

pub fn encoded_len_string_keyed<VC: Codec>(field_number: u32, map: &HashMap<String, VC::Value>) -> usize
where
  VC::Value: PartialEq + Default,
{
  map
    .iter()
    .map(|(k, &v)| {
      let entry_len = field::str_field_encoded_len(1, k) + field::singular_encoded_len::<VC>(2, v, VC::Value::default());
      field::tag_len(field_number, WireType::Len) + encoded_len_varint(entry_len as u64) + entry_len
    })
    .sum()
}

pub fn encode_string_keyed<VC: Codec, const SAFE: bool>(
  field_number: u32,
  map: &HashMap<String, VC::Value>,
  w: &mut Writer,
) -> Option<()>
where
  VC::Value: PartialEq + Default,
{
  for (k, &v) in map {
    let entry_len = field::str_field_encoded_len(1, k) + field::singular_encoded_len::<VC>(2, v, VC::Value::default());
    w.write_tag::<SAFE>(field_number, WireType::Len)?;
    array::write_length_delimited::<SAFE>(entry_len, w, |w| {
      field::encode_str_field::<SAFE>(1, k, w)?;
      field::encode_singular::<VC, SAFE>(2, v, VC::Value::default(), w)
    })?;
  }
  Some(())
}

pub fn merge_string_keyed<VC: Codec, const SAFE: bool>(
  wire_type: WireType,
  r: &mut Reader,
  out: &mut HashMap<String, VC::Value>,
) -> Result<(), DecodeError>
where
  VC::Value: Default,
{
  if wire_type != WireType::Len {
    return Err(DecodeError::WireTypeMismatch { actual: wire_type, expected: WireType::Len });
  }
  let len = r.read_varint::<SAFE>(MAX_VARINT64_BYTES).ok_or(DecodeError::BufferUnderflow)? as usize;
  let mut sub = r.sub_reader::<SAFE>(len).ok_or(DecodeError::LengthPrefixOverrun)?;
  let mut key = String::new();
  let mut value = VC::Value::default();
  decode_fields::<SAFE>(&mut sub, |number, wire_type, sub| match number {
    1 => {
      key = field::merge_str_field::<SAFE>(wire_type, sub)?.to_owned();
      Ok(true)
    }
    2 => {
      value = field::merge_singular::<VC, SAFE>(wire_type, sub)?;
      Ok(true)
    }
    _ => Ok(false),
  })?;
  if sub.has_remaining() {
    return Err(DecodeError::LengthPrefixOverrun);
  }
  r.skip_bytes::<SAFE>(len).ok_or(DecodeError::BufferUnderflow)?;
  out.insert(key, value);
  Ok(())
}

// ---------------------------------------------------------------------
// string key, nested message value
// ---------------------------------------------------------------------

pub fn encoded_len_string_to_message<M: Message>(field_number: u32, map: &HashMap<String, M>) -> usize {
  map
    .iter()
    .map(|(k, v)| {
      let entry_len = field::str_field_encoded_len(1, k) + field::message_field_encoded_len(2, v);
      field::tag_len(field_number, WireType::Len) + encoded_len_varint(entry_len as u64) + entry_len
    })
    .sum()
}

pub fn encode_string_to_message<M: Message, const SAFE: bool>(
  field_number: u32,
  map: &HashMap<String, M>,
  w: &mut Writer,
) -> Option<()> {
  for (k, v) in map {
    let entry_len = field::str_field_encoded_len(1, k) + field::message_field_encoded_len(2, v);
    w.write_tag::<SAFE>(field_number, WireType::Len)?;
    array::write_length_delimited::<SAFE>(entry_len, w, |w| {
      field::encode_str_field::<SAFE>(1, k, w)?;
      field::encode_message_field::<M, SAFE>(2, v, w)
    })?;
  }
  Some(())
}

/// A missing value field within an entry (permitted: messages carry
/// explicit presence, but a map entry with an elided value field is valid
/// wire data) decodes as `M::default()`, matching how real protobuf runtimes
/// treat an absent map-entry value as the value type's default instance.
pub fn merge_string_to_message<M: Message + Default, const SAFE: bool>(
  wire_type: WireType,
  r: &mut Reader,
  out: &mut HashMap<String, M>,
) -> Result<(), DecodeError> {
  if wire_type != WireType::Len {
    return Err(DecodeError::WireTypeMismatch { actual: wire_type, expected: WireType::Len });
  }
  let len = r.read_varint::<SAFE>(MAX_VARINT64_BYTES).ok_or(DecodeError::BufferUnderflow)? as usize;
  let mut sub = r.sub_reader::<SAFE>(len).ok_or(DecodeError::LengthPrefixOverrun)?;
  let mut key = String::new();
  let mut value: Option<M> = None;
  decode_fields::<SAFE>(&mut sub, |number, wire_type, sub| match number {
    1 => {
      key = field::merge_str_field::<SAFE>(wire_type, sub)?.to_owned();
      Ok(true)
    }
    2 => {
      value = Some(field::merge_message_field::<M, SAFE>(wire_type, sub)?);
      Ok(true)
    }
    _ => Ok(false),
  })?;
  if sub.has_remaining() {
    return Err(DecodeError::LengthPrefixOverrun);
  }
  r.skip_bytes::<SAFE>(len).ok_or(DecodeError::BufferUnderflow)?;
  out.insert(key, value.unwrap_or_default());
  Ok(())
}
