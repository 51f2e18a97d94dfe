use std::{error::Error, fmt};

use crate::wire::WireType;

/// Everything that can go wrong while decoding a well-typed byte stream.
///
/// This is the "safe mode" surface from the crate's decode path (see the
/// crate-level docs): every variant here corresponds to a decode returning
/// `None` from the lower-level, `Option`-returning primitives. It exists so
/// that [`crate::message::Message::decode`] can report *why* a decode failed,
/// while the primitive codecs themselves stay on the cheaper `Option` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
  /// Ran out of input before a value was fully read.
  BufferUnderflow,
  /// A varint's continuation run exceeded the width bound for its type, or
  /// the view ended while the last byte still had its continuation bit set.
  MalformedVarint,
  /// A length-delimited block's prefix claimed more bytes than remain, or an
  /// element's decode would have read past the claimed length.
  LengthPrefixOverrun,
  /// Tag carried wire type 3 or 4 (group start/end), which this crate does
  /// not support.
  UnsupportedWireType,
  /// A known field's tag carried a wire type neither matching the field's
  /// expected wire type nor tolerated by the packed/unpacked rule.
  WireTypeMismatch { actual: WireType, expected: WireType },
}

impl fmt::Display for DecodeError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::BufferUnderflow => write!(f, "decode failed: buffer underflow"),
      Self::MalformedVarint => write!(f, "decode failed: malformed varint"),
      Self::LengthPrefixOverrun => {
        write!(f, "decode failed: length-delimited block overruns its length prefix")
      }
      Self::UnsupportedWireType => write!(f, "decode failed: group wire types are not supported"),
      Self::WireTypeMismatch { actual, expected } => {
        write!(f, "decode failed: got wire type {actual:?}, expected {expected:?}")
      }
    }
  }
}
impl Error for DecodeError {}

/// The only way an encode can fail: the destination buffer ran out of room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
  BufferOverflow,
}

impl fmt::Display for EncodeError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::BufferOverflow => write!(f, "encode failed: buffer overflow"),
    }
  }
}
impl Error for EncodeError {}
