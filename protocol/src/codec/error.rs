//! Error types for packing and unpacking.
//!
//! Every fallible codec operation returns a [`CodecError`]. Lossy behaviour
//! that is part of the format (over-long names, narrowed integers, odd-length
//! hex) is never reported here.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors raised while converting transactions between JSON, entities and bytes.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A hex field contained something other than hex digits.
    #[error("invalid hex in {field}: {reason}")]
    InvalidHex {
        /// The field being decoded.
        field: &'static str,
        /// What the hex decoder complained about.
        reason: String,
    },

    /// The `expiration` timestamp did not match `yyyy-MM-ddTHH:mm:ss`.
    #[error("invalid expiration {value:?}: {reason}")]
    InvalidTimestamp {
        /// The offending input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The structured input was not a well-formed transaction object.
    #[error("malformed transaction json: {0}")]
    Json(#[from] serde_json::Error),

    /// The packed input ended before a value was complete.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the current value requires.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },

    /// A varint ran past ten bytes or overflowed the integer it was read into.
    #[error("varint overflows its target width")]
    VarIntOverflow,

    /// A varint carried redundant zero groups, so repacking would not
    /// reproduce it.
    #[error("non-canonical varint encoding")]
    NonCanonicalVarInt,

    /// A packed string was not valid UTF-8.
    #[error("invalid utf-8 in packed string: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// Bytes were left over after a complete transaction was read.
    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    /// A block ID (or segment of one) could not be interpreted.
    #[error("invalid block id: {reason}")]
    InvalidBlockId {
        /// Why the ID was rejected.
        reason: String,
    },

    /// A chain ID was not 32 bytes of hex.
    #[error("invalid chain id: {reason}")]
    InvalidChainId {
        /// Why the ID was rejected.
        reason: String,
    },
}
