//! Wire types and tags, bit-exact with Google's Protocol Buffers encoding.

/// The 3-bit wire type carried by every field tag.
///
/// Group start/end (3/4) are intentionally absent: this crate treats them as
/// fatal on decode (see [`crate::error::DecodeError::UnsupportedWireType`])
/// and never emits them on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
  Varint = 0,
  I64 = 1,
  Len = 2,
  I32 = 5,
}

impl WireType {
  /// Recovers a `WireType` from the low 3 bits of a tag byte. Returns `None`
  /// for `3`, `4`, `6`, and `7`, which are not valid wire types (3/4 are the
  /// unsupported group markers; 6/7 are unassigned).
  #[inline]
  pub fn from_id(id: u8) -> Option<WireType> {
    Some(match id {
      0 => Self::Varint,
      1 => Self::I64,
      2 => Self::Len,
      5 => Self::I32,
      _ => return None,
    })
  }

  #[inline]
  pub fn id(self) -> u8 { self as u8 }
}

/// Smallest field number a tag may carry.
pub const MIN_FIELD_NUMBER: u32 = 1;
/// Largest field number a tag may carry (2^29 - 1), excluding the reserved
/// range `19000..=19999`.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;
const RESERVED_FIELD_RANGE: std::ops::RangeInclusive<u32> = 19000..=19999;

/// Returns `true` for field numbers usable in a tag: within
/// `[MIN_FIELD_NUMBER, MAX_FIELD_NUMBER]` and outside the reserved range.
#[inline]
pub fn is_valid_field_number(number: u32) -> bool {
  (MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&number) && !RESERVED_FIELD_RANGE.contains(&number)
}

/// Packs a field number and wire type into the `u64` that gets varint-encoded
/// as a tag: `(field_number << 3) | wire_type`.
#[inline]
pub fn pack_tag(field_number: u32, wire_type: WireType) -> u64 {
  debug_assert!(is_valid_field_number(field_number));
  ((field_number as u64) << 3) | wire_type.id() as u64
}

/// Splits a decoded tag varint back into its field number and wire type.
/// Returns `None` if the low 3 bits aren't a valid wire type, or the tag
/// doesn't fit in a `u32` field number.
#[inline]
pub fn unpack_tag(tag: u64) -> Option<(u32, WireType)> {
  let wire_type = WireType::from_id((tag & 0x7) as u8)?;
  let field_number = u32::try_from(tag >> 3).ok()?;
  Some((field_number, wire_type))
}
