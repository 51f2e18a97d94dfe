//! The concrete scenarios from `spec.md` §8, exercised end to end through
//! the public `Message` API rather than the lower-level codec primitives
//! the unit tests in `src/` already cover.

use protopuf::codec::Varint;
use protopuf::error::DecodeError;
use protopuf::message::{decode_fields, Message};
use protopuf::reader::Reader;
use protopuf::wire::WireType;
use protopuf::writer::Writer;
use protopuf::field;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Student {
  id: u32,
  name: String,
}

impl Message for Student {
  fn encode<const SAFE: bool>(&self, w: &mut Writer) -> Option<()> {
    field::encode_singular::<Varint<u32>, SAFE>(1, self.id, 0, w)?;
    field::encode_str_field::<SAFE>(3, &self.name, w)
  }

  fn decode<const SAFE: bool>(r: &mut Reader) -> Result<Self, DecodeError> {
    let mut out = Student::default();
    decode_fields::<SAFE>(r, |number, wire_type, r| match number {
      1 => {
        out.id = field::merge_singular::<Varint<u32>, SAFE>(wire_type, r)?;
        Ok(true)
      }
      3 => {
        out.name = field::merge_str_field::<SAFE>(wire_type, r)?.to_owned();
        Ok(true)
      }
      _ => Ok(false),
    })?;
    Ok(out)
  }

  fn encoded_len(&self) -> usize {
    field::singular_encoded_len::<Varint<u32>>(1, self.id, 0) + field::str_field_encoded_len(3, &self.name)
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Class {
  name: String,
  students: Vec<Student>,
}

impl Message for Class {
  fn encode<const SAFE: bool>(&self, w: &mut Writer) -> Option<()> {
    field::encode_str_field::<SAFE>(8, &self.name, w)?;
    for student in &self.students {
      field::encode_message_field::<Student, SAFE>(3, student, w)?;
    }
    Some(())
  }

  fn decode<const SAFE: bool>(r: &mut Reader) -> Result<Self, DecodeError> {
    let mut out = Class::default();
    decode_fields::<SAFE>(r, |number, wire_type, r| match number {
      8 => {
        out.name = field::merge_str_field::<SAFE>(wire_type, r)?.to_owned();
        Ok(true)
      }
      3 => {
        out.students.push(field::merge_message_field::<Student, SAFE>(wire_type, r)?);
        Ok(true)
      }
      _ => Ok(false),
    })?;
    Ok(out)
  }

  fn encoded_len(&self) -> usize {
    field::str_field_encoded_len(8, &self.name)
      + self.students.iter().map(|s| field::message_field_encoded_len(3, s)).sum::<usize>()
  }
}

#[test]
fn nested_message_round_trip_is_exactly_45_bytes() {
  let class = Class {
    name: "class 101".to_owned(),
    students: vec![
      Student { id: 456, name: "tom".to_owned() },
      Student { id: 123456, name: "jerry".to_owned() },
      Student { id: 123, name: "twice".to_owned() },
    ],
  };

  let mut buf = [0u8; 64];
  let mut w = Writer::new(&mut buf);
  class.encode::<true>(&mut w).unwrap();
  let n = w.index();

  assert_eq!(n, 45, "spec.md §8's worked nested-message example is exactly 45 bytes");
  assert_eq!(n, class.encoded_len());

  let decoded = Class::decode_from_slice(&buf[..n]).unwrap();
  assert_eq!(decoded, class);
}

#[test]
fn varint_150_scenario() {
  let mut buf = [0u8; 4];
  let mut w = Writer::new(&mut buf);
  <Varint<u32> as protopuf::Codec>::encode::<true>(150, &mut w).unwrap();
  assert_eq!(&buf[..w.index()], &[0x96, 0x01]);

  let mut r = Reader::new(&buf[..w.index()]);
  assert_eq!(<Varint<u32> as protopuf::Codec>::decode::<true>(&mut r), Some(150));
  assert!(!r.has_remaining());
}

#[test]
fn zigzag_minus_one_scenario() {
  use protopuf::codec::SVarint;
  let mut buf = [0u8; 4];
  let mut w = Writer::new(&mut buf);
  <SVarint<i32> as protopuf::Codec>::encode::<true>(-1, &mut w).unwrap();
  assert_eq!(&buf[..w.index()], &[0x01]);

  let mut r = Reader::new(&buf[..w.index()]);
  assert_eq!(<SVarint<i32> as protopuf::Codec>::decode::<true>(&mut r), Some(-1));
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SingleFieldMessage {
  value: u32,
}

impl Message for SingleFieldMessage {
  fn encode<const SAFE: bool>(&self, w: &mut Writer) -> Option<()> {
    field::encode_singular::<Varint<u32>, SAFE>(1, self.value, 0, w)
  }
  fn decode<const SAFE: bool>(r: &mut Reader) -> Result<Self, DecodeError> {
    let mut out = SingleFieldMessage::default();
    decode_fields::<SAFE>(r, |number, wire_type, r| match number {
      1 => {
        out.value = field::merge_singular::<Varint<u32>, SAFE>(wire_type, r)?;
        Ok(true)
      }
      _ => Ok(false),
    })?;
    Ok(out)
  }
  fn encoded_len(&self) -> usize { field::singular_encoded_len::<Varint<u32>>(1, self.value, 0) }
}

#[test]
fn unknown_field_skip_scenario() {
  // field 3: len-delimited "xy", then field 1: varint 42 — spec.md §8's
  // "unknown field skip" scenario, decoded through a full Message impl
  // rather than `decode_fields` directly.
  let bytes = [0x1A, 0x02, b'x', b'y', 0x08, 0x2A];
  let decoded = SingleFieldMessage::decode_from_slice(&bytes).unwrap();
  assert_eq!(decoded, SingleFieldMessage { value: 42 });
}

#[test]
fn safe_mode_underflow_scenario() {
  // Encoding a 2-byte varint (150) into a 1-byte buffer must fail, and must
  // not have written anything past byte 0.
  let mut buf = [0xFFu8; 1];
  let mut w = Writer::new(&mut buf);
  let result = <Varint<u32> as protopuf::Codec>::encode::<true>(150, &mut w);
  assert_eq!(result, None);
  assert_eq!(buf, [0xFF]);
}

#[test]
fn message_decode_reports_unsupported_wire_type_for_groups() {
  // Tag byte with wire type 3 (group start), field number 1: (1 << 3) | 3.
  let bytes = [0x0B];
  assert_eq!(SingleFieldMessage::decode_from_slice(&bytes), Err(DecodeError::UnsupportedWireType));
}

#[test]
fn repeated_field_tolerates_packed_encoding_from_a_different_producer() {
  #[derive(Debug, Default, Clone, PartialEq, Eq)]
  struct Scores {
    values: Vec<u32>,
  }
  impl Message for Scores {
    fn encode<const SAFE: bool>(&self, w: &mut Writer) -> Option<()> {
      field::encode_packed::<Varint<u32>, SAFE>(1, &self.values, w)
    }
    fn decode<const SAFE: bool>(r: &mut Reader) -> Result<Self, DecodeError> {
      let mut out = Scores::default();
      decode_fields::<SAFE>(r, |number, wire_type, r| match number {
        1 => {
          field::merge_repeated_packable::<Varint<u32>, SAFE>(wire_type, r, &mut out.values)?;
          Ok(true)
        }
        _ => Ok(false),
      })?;
      Ok(out)
    }
    fn encoded_len(&self) -> usize { field::packed_encoded_len::<Varint<u32>>(1, &self.values) }
  }

  // Produced unpacked: one tag per element.
  let mut buf = [0u8; 32];
  let mut w = Writer::new(&mut buf);
  field::encode_repeated::<Varint<u32>, true>(1, &[10, 20, 30], &mut w).unwrap();
  let n = w.index();
  let decoded = Scores::decode_from_slice(&buf[..n]).unwrap();
  assert_eq!(decoded.values, vec![10, 20, 30]);

  // Produced packed: a single length-delimited block. Same consumer.
  let mut buf = [0u8; 32];
  let mut w = Writer::new(&mut buf);
  let scores = Scores { values: vec![10, 20, 30] };
  scores.encode::<true>(&mut w).unwrap();
  let n = w.index();
  let decoded = Scores::decode_from_slice(&buf[..n]).unwrap();
  assert_eq!(decoded.values, vec![10, 20, 30]);
}

#[test]
fn wire_type() {
  // sanity: WireType is re-exported and usable from outside the crate.
  assert_eq!(WireType::Len as u8, 2);
}
