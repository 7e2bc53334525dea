//! Account, action and permission names.
//!
//! A name is a restricted-alphabet identifier squeezed into a `u64`: up to
//! twelve characters at 5 bits each, filled from the most significant end,
//! plus a thirteenth character in the low nibble. The alphabet is
//! `.12345abcdefghijklmnopqrstuvwxyz`; anything else encodes as `.` (zero).
//!
//! Encoding is lossy by construction. Characters past the thirteenth are
//! ignored, and a thirteenth character above `j` loses its top bit. Callers
//! that need to reject such names must check before encoding.

use std::convert::Infallible;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::CodecError;
use super::packer::{Pack, Packer};
use super::unpacker::{Unpack, Unpacker};
use crate::config::{NAME_CHARMAP, NAME_MAX_LEN};

/// A 64-bit encoded name.
///
/// # Examples
///
/// ```
/// use eosio_packer::codec::Name;
///
/// let token = Name::encode("eosio.token");
/// assert_eq!(token.value(), 0x5530_ea03_3482_a600);
/// assert_eq!(token.to_string(), "eosio.token");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(u64);

impl Name {
    /// Wraps an already-encoded value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw 64-bit value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Encodes a symbolic string.
    pub fn encode(symbol: &str) -> Self {
        let mut value: u64 = 0;
        for (i, c) in symbol.chars().take(NAME_MAX_LEN).enumerate() {
            let sym = char_to_symbol(c);
            if i < NAME_MAX_LEN - 1 {
                value |= (sym & 0x1f) << (64 - 5 * (i + 1));
            } else {
                value |= sym & 0x0f;
            }
        }
        Self(value)
    }

    /// Decodes back to the shortest symbolic string, trailing `.` trimmed
    /// but never below one character.
    pub fn decode(self) -> String {
        self.to_string()
    }

    fn symbols(self) -> ([u8; NAME_MAX_LEN], usize) {
        let mut chars = [b'.'; NAME_MAX_LEN];
        let mut value = self.0;
        for i in 0..NAME_MAX_LEN {
            let (mask, width) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            chars[NAME_MAX_LEN - 1 - i] = NAME_CHARMAP[(value & mask) as usize];
            value >>= width;
        }
        let len = chars
            .iter()
            .rposition(|&c| c != b'.')
            .map_or(1, |last| last + 1);
        (chars, len)
    }
}

fn char_to_symbol(c: char) -> u64 {
    match c {
        'a'..='z' => (c as u64 - 'a' as u64) + 6,
        '1'..='5' => (c as u64 - '1' as u64) + 1,
        _ => 0,
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (chars, len) = self.symbols();
        for &c in &chars[..len] {
            f.write_char(c as char)?;
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::encode(s))
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::encode(s)
    }
}

impl From<u64> for Name {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Name> for u64 {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::encode(&s))
    }
}

impl Pack for Name {
    fn pack(&self, packer: &mut Packer) {
        packer.pack_u64(self.0);
    }
}

impl Unpack for Name {
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        unpacker.unpack_u64().map(Self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
