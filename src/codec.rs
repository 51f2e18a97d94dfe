//! The primitive codecs: varint integers, zigzag signed integers, fixed-width
//! integers/floats, booleans, and enumerations. Each is a zero-sized marker
//! type implementing [`Codec`], so a field descriptor (`src/field.rs`) can
//! name `Varint<u32>` or `Fixed<f64>` as its element codec the same way the
//! spec's `varint_coder<U>` / `float_coder<f32 | f64>` templates are named.
//!
//! The skip half of the "codec + skipper" pair from `spec.md` §4.9 is
//! deliberately *not* a per-codec method here: every codec sharing a wire
//! type also shares a skip implementation (a varint is a varint whether it
//! holds a `bool`, an enum, or a `u64`), so [`Codec::skip`] has one default
//! body, [`crate::reader::Reader::skip_by_wire_type`], keyed only on
//! [`Codec::WIRE_TYPE`]. This mirrors how real protobuf decoders skip
//! unknown fields (by wire type alone, never by the original field's type).

use crate::{
  reader::Reader,
  varint::{MAX_VARINT16_BYTES, MAX_VARINT32_BYTES, MAX_VARINT64_BYTES, MAX_VARINT8_BYTES},
  wire::WireType,
  writer::Writer,
  zigzag::ZigZag,
};

/// A static descriptor for encoding/decoding one Rust value type to/from the
/// wire, parameterized per call by the safety mode (`spec.md` §4.2).
pub trait Codec {
  type Value: Copy;
  const WIRE_TYPE: WireType;

  fn encode<const SAFE: bool>(value: Self::Value, w: &mut Writer) -> Option<()>;
  fn decode<const SAFE: bool>(r: &mut Reader) -> Option<Self::Value>;
  /// Bytes `encode` would write for `value` — the "encode_skip" quantity
  /// from `spec.md` §4.9, also used by the length-delimited array codec's
  /// two-pass length computation (§4.10).
  fn encoded_len(value: Self::Value) -> usize;

  /// Advances a reader past one encoded value without materializing it.
  #[inline]
  fn skip<const SAFE: bool>(r: &mut Reader) -> Option<()> { r.skip_by_wire_type::<SAFE>(Self::WIRE_TYPE) }
}

/// Marker type: plain (non-zigzag) varint encoding of an unsigned or signed
/// integer. Signed widths forward to the unsigned varint by sign-extending
/// bitcast, matching the protobuf `int32`/`int64` convention (negative
/// 32-bit values cost 10 bytes — see `spec.md` §4.5 and §3).
pub struct Varint<T>(std::marker::PhantomData<T>);

/// Marker type: zigzag-mapped varint encoding of a signed integer
/// (protobuf's `sint32`/`sint64`).
pub struct SVarint<T>(std::marker::PhantomData<T>);

/// Marker type: fixed-width little-endian encoding (protobuf's
/// `fixed32`/`fixed64`/`sfixed32`/`sfixed64`/`float`/`double`).
pub struct Fixed<T>(std::marker::PhantomData<T>);

/// Marker type: `bool`, encoded as a one-byte varint (0 or nonzero).
pub struct Bool;

/// Marker type: an enumeration whose declared underlying integer width is
/// `T`, encoded as `Varint<T>`. Decoding accepts any value representable in
/// `T`, including variants the enum type doesn't name — required for
/// forward compatibility (`spec.md` §4.8).
pub struct EnumCodec<T>(std::marker::PhantomData<T>);

macro_rules! varint_unsigned_impl {
  ($ty:ty, $max_bytes:expr) => {
    impl Codec for Varint<$ty> {
      type Value = $ty;
      const WIRE_TYPE: WireType = WireType::Varint;

      #[inline]
      fn encode<const SAFE: bool>(value: $ty, w: &mut Writer) -> Option<()> {
        w.write_varint::<SAFE>(value as u64)
      }
      #[inline]
      fn decode<const SAFE: bool>(r: &mut Reader) -> Option<$ty> {
        // Wire-format convention: bits beyond the target width in the final
        // byte are discarded silently rather than rejected (spec.md §4.5).
        let raw = r.read_varint::<SAFE>($max_bytes)?;
        Some(raw as $ty)
      }
      #[inline]
      fn encoded_len(value: $ty) -> usize { crate::varint::encoded_len_varint(value as u64) }
    }
  };
}

// Unsigned varint widths, each bounded at ceil(bitwidth/7) bytes per
// spec.md §4.5: a continuation run longer than that bound is a malformed
// varint, not a value to silently truncate.
varint_unsigned_impl!(u8, MAX_VARINT8_BYTES);
varint_unsigned_impl!(u16, MAX_VARINT16_BYTES);
varint_unsigned_impl!(u32, MAX_VARINT32_BYTES);
varint_unsigned_impl!(u64, MAX_VARINT64_BYTES);

macro_rules! varint_signed_impl {
  ($ty:ty, $unsigned:ty, $max_bytes:expr) => {
    impl Codec for Varint<$ty> {
      type Value = $ty;
      const WIRE_TYPE: WireType = WireType::Varint;

      #[inline]
      fn encode<const SAFE: bool>(value: $ty, w: &mut Writer) -> Option<()> {
        // Sign-extend to 64 bits before bitcasting, so negative values use
        // the full 10-byte varint the protobuf `int32`/`int64` wire format
        // expects (spec.md §3, §4.5).
        w.write_varint::<SAFE>(value as i64 as u64)
      }
      #[inline]
      fn decode<const SAFE: bool>(r: &mut Reader) -> Option<$ty> {
        let raw = r.read_varint::<SAFE>($max_bytes)?;
        Some(raw as i64 as $ty)
      }
      #[inline]
      fn encoded_len(value: $ty) -> usize { crate::varint::encoded_len_varint(value as i64 as u64) }
    }
  };
}

varint_signed_impl!(i8, u8, MAX_VARINT64_BYTES);
varint_signed_impl!(i16, u16, MAX_VARINT64_BYTES);
varint_signed_impl!(i32, u32, MAX_VARINT64_BYTES);
varint_signed_impl!(i64, u64, MAX_VARINT64_BYTES);

macro_rules! svarint_impl {
  ($ty:ty) => {
    impl Codec for SVarint<$ty> {
      type Value = $ty;
      const WIRE_TYPE: WireType = WireType::Varint;

      #[inline]
      fn encode<const SAFE: bool>(value: $ty, w: &mut Writer) -> Option<()> {
        w.write_varint::<SAFE>(ZigZag::zig(value) as u64)
      }
      #[inline]
      fn decode<const SAFE: bool>(r: &mut Reader) -> Option<$ty> {
        let raw = r.read_varint::<SAFE>(MAX_VARINT64_BYTES)?;
        Some(ZigZag::zag(raw as _))
      }
      #[inline]
      fn encoded_len(value: $ty) -> usize {
        crate::varint::encoded_len_varint(ZigZag::zig(value) as u64)
      }
    }
  };
}

svarint_impl!(i8);
svarint_impl!(i16);
svarint_impl!(i32);
svarint_impl!(i64);

macro_rules! fixed_impl {
  ($ty:ty, $wire:expr, $write:ident, $read:ident, $bytes:expr) => {
    impl Codec for Fixed<$ty> {
      type Value = $ty;
      const WIRE_TYPE: WireType = $wire;

      #[inline]
      fn encode<const SAFE: bool>(value: $ty, w: &mut Writer) -> Option<()> {
        w.$write::<SAFE>(value.to_bits() as _)
      }
      #[inline]
      fn decode<const SAFE: bool>(r: &mut Reader) -> Option<$ty> {
        Some(<$ty>::from_bits(r.$read::<SAFE>()? as _))
      }
      #[inline]
      fn encoded_len(_value: $ty) -> usize { $bytes }
    }
  };
}

fixed_impl!(f32, WireType::I32, write_fixed32, read_fixed32, 4);
fixed_impl!(f64, WireType::I64, write_fixed64, read_fixed64, 8);

macro_rules! fixed_int_impl {
  ($ty:ty, $wire:expr, $write:ident, $read:ident, $bytes:expr) => {
    impl Codec for Fixed<$ty> {
      type Value = $ty;
      const WIRE_TYPE: WireType = $wire;

      #[inline]
      fn encode<const SAFE: bool>(value: $ty, w: &mut Writer) -> Option<()> { w.$write::<SAFE>(value as _) }
      #[inline]
      fn decode<const SAFE: bool>(r: &mut Reader) -> Option<$ty> { Some(r.$read::<SAFE>()? as $ty) }
      #[inline]
      fn encoded_len(_value: $ty) -> usize { $bytes }
    }
  };
}

fixed_int_impl!(u32, WireType::I32, write_fixed32, read_fixed32, 4);
fixed_int_impl!(i32, WireType::I32, write_fixed32, read_fixed32, 4);
fixed_int_impl!(u64, WireType::I64, write_fixed64, read_fixed64, 8);
fixed_int_impl!(i64, WireType::I64, write_fixed64, read_fixed64, 8);

impl Codec for Bool {
  type Value = bool;
  const WIRE_TYPE: WireType = WireType::Varint;

  #[inline]
  fn encode<const SAFE: bool>(value: bool, w: &mut Writer) -> Option<()> {
    w.write_varint::<SAFE>(if value { 1 } else { 0 })
  }
  #[inline]
  fn decode<const SAFE: bool>(r: &mut Reader) -> Option<bool> {
    Some(r.read_varint::<SAFE>(MAX_VARINT64_BYTES)? != 0)
  }
  #[inline]
  fn encoded_len(_value: bool) -> usize { 1 }
}

/// Implements `Codec` for an enum's declared underlying integer width. The
/// enum type must provide a `From<$underlying>` and `Into<$underlying>`
/// conversion (typically a manual `impl From` with a catch-all arm, since
/// protobuf enums must decode unrecognized values rather than reject them —
/// see `spec.md` §4.8).
#[macro_export]
macro_rules! enum_codec {
  ($enum_ty:ty, $underlying:ty) => {
    impl $crate::codec::Codec for $crate::codec::EnumCodec<$enum_ty> {
      type Value = $enum_ty;
      const WIRE_TYPE: $crate::wire::WireType = $crate::wire::WireType::Varint;

      #[inline]
      fn encode<const SAFE: bool>(value: $enum_ty, w: &mut $crate::writer::Writer) -> Option<()> {
        <$crate::codec::Varint<$underlying> as $crate::codec::Codec>::encode::<SAFE>(value.into(), w)
      }
      #[inline]
      fn decode<const SAFE: bool>(r: &mut $crate::reader::Reader) -> Option<$enum_ty> {
        let raw = <$crate::codec::Varint<$underlying> as $crate::codec::Codec>::decode::<SAFE>(r)?;
        Some(<$enum_ty>::from(raw))
      }
      #[inline]
      fn encoded_len(value: $enum_ty) -> usize {
        <$crate::codec::Varint<$underlying> as $crate::codec::Codec>::encoded_len(value.into())
      }
    }
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  fn round_trip<C: Codec>(value: C::Value, buf_len: usize)
  where
    C::Value: PartialEq + std::fmt::Debug,
  {
    let mut buf = vec![0u8; buf_len];
    let mut w = Writer::new(&mut buf);
    C::encode::<true>(value, &mut w).unwrap();
    let written = w.index();
    assert_eq!(written, C::encoded_len(value));
    let mut r = Reader::new(&buf[..written]);
    assert_eq!(C::decode::<true>(&mut r).unwrap(), value);
    assert_eq!(r.index(), written);
  }

  #[test]
  fn varint_round_trip() {
    round_trip::<Varint<u32>>(123_525, 8);
    round_trip::<Varint<u64>>(u64::MAX, 10);
    round_trip::<Varint<i32>>(-1, 10);
    round_trip::<Varint<i32>>(42, 10);
  }

  #[test]
  fn negative_i32_costs_ten_bytes() {
    let mut buf = [0u8; 10];
    let mut w = Writer::new(&mut buf);
    <Varint<i32> as Codec>::encode::<true>(-1, &mut w).unwrap();
    assert_eq!(w.index(), 10);
  }

  #[test]
  fn svarint_round_trip() {
    round_trip::<SVarint<i32>>(-1, 8);
    round_trip::<SVarint<i64>>(i64::MIN, 10);
  }

  #[test]
  fn svarint_minus_one_is_one_byte() {
    let mut buf = [0u8; 8];
    let mut w = Writer::new(&mut buf);
    <SVarint<i32> as Codec>::encode::<true>(-1, &mut w).unwrap();
    assert_eq!(w.index(), 1);
    assert_eq!(buf[0], 0x01);
  }

  #[test]
  fn fixed_round_trip() {
    round_trip::<Fixed<f32>>(3.456, 4);
    round_trip::<Fixed<f64>>(3.456, 8);
    round_trip::<Fixed<u32>>(0xDEAD_BEEF, 4);
  }

  #[test]
  fn float_nan_round_trips_bitwise() {
    round_trip::<Fixed<f32>>(f32::NAN, 4);
  }

  #[test]
  fn bool_round_trip() {
    round_trip::<Bool>(true, 1);
    round_trip::<Bool>(false, 1);
  }

  #[test]
  fn safe_underflow_is_none() {
    let mut buf = [0u8; 1];
    let mut w = Writer::new(&mut buf);
    assert_eq!(<Fixed<u32> as Codec>::encode::<true>(1, &mut w), None);
  }

  /// An enum with a catch-all `From<i32>` arm, the shape `enum_codec!`
  /// assumes (spec.md §4.8: decoding must accept values the enum doesn't
  /// name, for forward compatibility).
  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  enum Color {
    Red,
    Green,
    Blue,
    Unrecognized(i32),
  }

  impl From<i32> for Color {
    fn from(value: i32) -> Self {
      match value {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Blue,
        other => Color::Unrecognized(other),
      }
    }
  }

  impl From<Color> for i32 {
    fn from(value: Color) -> Self {
      match value {
        Color::Red => 0,
        Color::Green => 1,
        Color::Blue => 2,
        Color::Unrecognized(v) => v,
      }
    }
  }

  crate::enum_codec!(Color, i32);

  #[test]
  fn enum_codec_round_trips_named_variant() {
    round_trip::<EnumCodec<Color>>(Color::Green, 8);
  }

  #[test]
  fn enum_codec_negative_value_costs_ten_bytes() {
    // spec.md §3: negative enum values sign-extend to 64 bits before
    // varint-encoding, the same as a negative int32, so they cost 10 bytes.
    let value = Color::Unrecognized(-1);
    let mut buf = [0u8; 10];
    let mut w = Writer::new(&mut buf);
    <EnumCodec<Color> as Codec>::encode::<true>(value, &mut w).unwrap();
    assert_eq!(w.index(), 10);
    assert_eq!(<EnumCodec<Color> as Codec>::encoded_len(value), 10);

    let mut r = Reader::new(&buf);
    assert_eq!(<EnumCodec<Color> as Codec>::decode::<true>(&mut r), Some(value));
  }

  #[test]
  fn enum_codec_decodes_unrecognized_variant_for_forward_compatibility() {
    round_trip::<EnumCodec<Color>>(Color::Unrecognized(42), 8);
  }
}
