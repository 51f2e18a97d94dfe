//! A type-directed, wire-compatible Protocol Buffers codec library: a set of
//! composable encoder/decoder primitives that serialize and deserialize
//! values whose shapes are declared as static Rust types, producing and
//! consuming byte streams that are bit-for-bit interoperable with the
//! Google Protocol Buffers wire format (proto2/proto3 binary encoding).
//!
//! This is a from-scratch codec, not a schema compiler: there is no `.proto`
//! front end, no reflection, and no generated-code step. Message types are
//! declared directly in Rust by implementing [`message::Message`] and
//! calling the `field` module's per-field helpers, the same way hand-rolled
//! protobuf bindings in any language look once the codegen step is peeled
//! away.
//!
//! # Layout
//!
//! - [`wire`] — wire types and tag packing/unpacking.
//! - [`varint`] — base-128 LEB128 varint encode/decode, shared by every
//!   variable-width codec.
//! - [`zigzag`] — the signed/unsigned bijection `sint32`/`sint64` uses.
//! - [`reader`] / [`writer`] — bounded, cursor-owning views over borrowed
//!   byte slices; every operation is parameterized by a `const SAFE: bool`
//!   safety mode (bounds-checked vs. trusted-input).
//! - [`codec`] — the primitive `Codec` trait plus its scalar/fixed/bool/enum
//!   implementations.
//! - [`array`] — the length-delimited container codec: `bytes`, `string`,
//!   and packed-repeated scalars.
//! - [`field`] — binds a field number + repetition kind to an element codec.
//! - [`message`] — composes field codecs into a tag-dispatched record codec.
//! - [`map`] — map fields, decomposed into repeated key/value entry messages.
//! - [`error`] — the decode/encode error taxonomy.
//!
//! # Safety modes
//!
//! Every codec operation takes a `const SAFE: bool` generic parameter rather
//! than being split into two functions or relying on `unsafe {}` blocks.
//! `SAFE = true` bounds-checks every cursor advance and returns `None` on
//! violation; `SAFE = false` skips the manual check (backed by a
//! `debug_assert!` and ordinary slice indexing, which still panics on
//! violation in debug and release builds alike — there is no undefined
//! behavior to opt into here, only the cost of a redundant bounds check to
//! skip when the caller has already guaranteed a sufficient buffer).

pub mod array;
pub mod codec;
pub mod error;
pub mod field;
pub mod map;
pub mod message;
pub mod reader;
pub mod varint;
pub mod wire;
pub mod writer;
pub mod zigzag;

pub use codec::{Bool, Codec, EnumCodec, Fixed, SVarint, Varint};
pub use error::{DecodeError, EncodeError};
pub use message::{decode_fields, Message};
pub use reader::Reader;
pub use wire::WireType;
pub use writer::Writer;
pub use zigzag::{zag, zig, ZigZag};
