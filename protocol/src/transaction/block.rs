//! Reference-block (TaPoS) helpers.
//!
//! A transaction names a recent block by the low 16 bits of its number and
//! four bytes of its ID. Both come straight out of the 32-byte block ID: the
//! first four bytes are the block number, big-endian, and bytes 8..12 are
//! the prefix, read little-endian.

use crate::codec::CodecError;
use crate::config::BLOCK_ID_HEX_LENGTH;

/// The two TaPoS header fields for one reference block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefBlock {
    /// Block number masked to 16 bits.
    pub ref_block_num: u16,
    /// Bytes 8..12 of the block ID, read little-endian.
    pub ref_block_prefix: u32,
}

impl RefBlock {
    /// Derives both fields from a full hex block ID.
    pub fn from_block_id(block_id: &str) -> Result<Self, CodecError> {
        Ok(Self {
            ref_block_num: ref_block_num_from_id(block_id)?,
            ref_block_prefix: ref_block_prefix_from_id(block_id)?,
        })
    }
}

/// Byte-swaps an 8-hex-character block ID segment and reads it as a `u32`.
///
/// `"6547c36c"` becomes `0x6cc34765`.
pub fn block_prefix(segment: &str) -> Result<u32, CodecError> {
    let bytes: [u8; 4] = hex_segment(segment)?;
    Ok(u32::from_le_bytes(bytes))
}

/// `ref_block_prefix` from a full block ID (hex characters 16..24).
pub fn ref_block_prefix_from_id(block_id: &str) -> Result<u32, CodecError> {
    block_prefix(id_segment(block_id, 16..24)?)
}

/// `ref_block_num` from a full block ID: the big-endian block number in the
/// first four bytes, masked to 16 bits.
pub fn ref_block_num_from_id(block_id: &str) -> Result<u16, CodecError> {
    let bytes: [u8; 4] = hex_segment(id_segment(block_id, 0..8)?)?;
    Ok(u32::from_be_bytes(bytes) as u16)
}

fn id_segment(block_id: &str, range: std::ops::Range<usize>) -> Result<&str, CodecError> {
    if block_id.len() != BLOCK_ID_HEX_LENGTH {
        return Err(CodecError::InvalidBlockId {
            reason: format!(
                "expected {BLOCK_ID_HEX_LENGTH} hex characters, got {}",
                block_id.len()
            ),
        });
    }
    block_id
        .get(range)
        .ok_or_else(|| CodecError::InvalidBlockId {
            reason: "block id is not ascii hex".to_string(),
        })
}

fn hex_segment(segment: &str) -> Result<[u8; 4], CodecError> {
    let mut out = [0u8; 4];
    hex::decode_to_slice(segment, &mut out).map_err(|e| CodecError::InvalidBlockId {
        reason: format!("segment {segment:?}: {e}"),
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_ID: &str = "009e3b0fba79833b24eaf68724fc45b6a1c9966a189e8554ab91cdc0728e925a";

    #[test]
    fn prefix_byte_swaps_segment() {
        assert_eq!(block_prefix("6547c36c").unwrap(), 0x6cc3_4765);
    }

    #[test]
    fn prefix_rejects_bad_segments() {
        assert!(block_prefix("6547c3").is_err());
        assert!(block_prefix("6547c36c00").is_err());
        assert!(block_prefix("zz47c36c").is_err());
    }

    #[test]
    fn ref_block_from_full_id() {
        let block = RefBlock::from_block_id(BLOCK_ID).unwrap();
        // Block 10369807 (0x009e3b0f).
        assert_eq!(block.ref_block_num, (10_369_807u32 & 0xffff) as u16);
        assert_eq!(block.ref_block_prefix, 2_281_105_956);
    }

    #[test]
    fn full_id_must_be_64_chars() {
        let err = RefBlock::from_block_id(&BLOCK_ID[..60]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidBlockId { .. }));
    }
}
