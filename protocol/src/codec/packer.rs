//! The primitive packer: appends fixed-width integers, varints, length-prefixed
//! bytes and strings to a growable buffer, and renders the result as hex.
//!
//! Everything here is little-endian. Values wider than the target field are
//! truncated by the caller with an `as` cast; that is part of the format, not
//! an error.

use super::error::CodecError;
use crate::config::DEFAULT_BUFFER_CAPACITY;

/// A value with a canonical packed representation.
///
/// Implementations write their fields in declaration order with no
/// separators; framing comes only from varint length prefixes.
pub trait Pack {
    /// Appends the packed form of `self` to `packer`.
    fn pack(&self, packer: &mut Packer);
}

/// Growable output buffer for packing.
///
/// Each packing call owns its own `Packer`, so independent transactions can
/// be packed concurrently without coordination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packer {
    buf: Vec<u8>,
}

impl Default for Packer {
    fn default() -> Self {
        Self::new()
    }
}

impl Packer {
    /// Creates a packer preallocated with [`DEFAULT_BUFFER_CAPACITY`] bytes.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Creates a packer with an explicit initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends one byte.
    pub fn pack_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Appends a 16-bit little-endian integer.
    pub fn pack_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a 32-bit little-endian integer.
    pub fn pack_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a 64-bit little-endian integer.
    pub fn pack_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends an unsigned LEB128 varint.
    ///
    /// Low 7 bits first, high bit set on every byte but the last. Zero
    /// still takes one byte.
    pub fn pack_varint(&mut self, value: u64) {
        let mut remaining = value;
        loop {
            let mut byte = (remaining & 0x7f) as u8;
            remaining >>= 7;
            if remaining != 0 {
                byte |= 0x80;
            }
            self.buf.push(byte);
            if remaining == 0 {
                break;
            }
        }
    }

    /// Appends raw bytes prefixed with their length as a varint.
    pub fn pack_bytes(&mut self, bytes: &[u8]) {
        self.pack_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    /// Decodes `hex` pair by pair and appends the bytes with a varint
    /// byte-count prefix.
    ///
    /// An odd trailing character is dropped. Any non-hex character fails
    /// the whole call and leaves the buffer untouched.
    pub fn pack_binary(&mut self, hex: &str) -> Result<(), CodecError> {
        let bytes = decode_hex("binary", hex)?;
        self.pack_bytes(&bytes);
        Ok(())
    }

    /// Appends a UTF-8 string prefixed with its byte length as a varint.
    pub fn pack_string(&mut self, text: &str) {
        self.pack_bytes(text.as_bytes());
    }

    /// Appends `varint(items.len())` followed by each item.
    pub fn pack_array<T: Pack>(&mut self, items: &[T]) {
        self.pack_varint(items.len() as u64);
        for item in items {
            item.pack(self);
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the packer and returns its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Renders the buffer as lowercase hex, two characters per byte,
    /// no prefix or separators.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.buf)
    }
}

impl Pack for String {
    fn pack(&self, packer: &mut Packer) {
        packer.pack_string(self);
    }
}

/// Decodes a hex string pair by pair, dropping an odd trailing character.
///
/// `field` names the input in the error message.
pub fn decode_hex(field: &'static str, hex: &str) -> Result<Vec<u8>, CodecError> {
    let even = hex.chars().count() / 2 * 2;
    let end = hex
        .char_indices()
        .nth(even)
        .map_or(hex.len(), |(index, _)| index);

    hex::decode(&hex[..end]).map_err(|e| CodecError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
