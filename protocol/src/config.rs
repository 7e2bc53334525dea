//! # Format Constants
//!
//! Every fixed parameter of the packed transaction format lives here. These
//! values are dictated by the chain's wire format, not by us: changing any of
//! them produces bytes that no node will accept and no signature will match.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Name encoding
// ---------------------------------------------------------------------------

/// The 32-symbol alphabet of the name encoding, indexed by symbol value.
/// Index 0 is the `.` placeholder, 1-5 are the digits, 6-31 are `a`-`z`.
pub const NAME_CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Number of characters that contribute bits to an encoded name.
/// The first 12 carry 5 bits each, the 13th only 4.
pub const NAME_MAX_LEN: usize = 13;

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// `chrono` format string for the `expiration` field. Always interpreted in UTC.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// How far in the future a freshly built transaction expires when the caller
/// does not say otherwise.
pub const DEFAULT_EXPIRATION_WINDOW: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Buffers
// ---------------------------------------------------------------------------

/// Initial capacity of a packing buffer. Large enough for any ordinary
/// transaction; the buffer grows past it for the rare oversized one.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8192;

/// A `u64` never needs more than ten 7-bit groups.
pub const MAX_VARINT_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Chains
// ---------------------------------------------------------------------------

/// Length of a chain ID in bytes (a SHA-256 digest).
pub const CHAIN_ID_LENGTH: usize = 32;

/// Length of a transaction or context-free-data digest in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// EOS mainnet chain ID.
pub const EOS_MAINNET_CHAIN_ID: &str =
    "aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906";

/// Jungle4 testnet chain ID.
pub const JUNGLE4_CHAIN_ID: &str =
    "73e4385a2708e6d7048834fbc1079f2fabb17b3c125b146af438971e90716c4d";

/// Length of a block ID in hex characters (32 bytes).
pub const BLOCK_ID_HEX_LENGTH: usize = 64;

/// Returns a friendly name for a known chain ID, mainly for logging.
pub fn chain_name(chain_id: &str) -> Option<&'static str> {
    match chain_id {
        EOS_MAINNET_CHAIN_ID => Some("eos-mainnet"),
        JUNGLE4_CHAIN_ID => Some("jungle4"),
        _ => None,
    }
}
