//! # Binary Codec
//!
//! The building blocks of the packed transaction format. Nothing in here
//! knows what a transaction is; the entity layer in [`crate::transaction`]
//! composes these primitives through the [`Pack`] and [`Unpack`] traits.
//!
//! ## Architecture
//!
//! ```text
//! packer.rs   — Fixed-width LE integers, LEB128 varints, length-prefixed bytes/strings, hex output
//! unpacker.rs — The inverse cursor over a byte slice
//! name.rs     — 64-bit restricted-alphabet name encoding
//! error.rs    — CodecError
//! ```
//!
//! ## Format rules
//!
//! - All fixed-width integers are little-endian.
//! - Every variable-length value (bytes, strings, arrays) is prefixed with
//!   its length as an unsigned LEB128 varint. There are no separators and
//!   no terminators.
//! - Truncation is part of the format: narrowed integers, names past 13
//!   characters and odd-length hex all lose data silently.

pub mod error;
pub mod name;
pub mod packer;
pub mod unpacker;

pub use error::CodecError;
pub use name::Name;
pub use packer::{decode_hex, Pack, Packer};
pub use unpacker::{Unpack, Unpacker};
