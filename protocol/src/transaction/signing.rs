//! Transaction IDs and signing digests.
//!
//! Signing itself happens elsewhere (wallet, hardware key, remote signer).
//! This module only produces the 32-byte digest a signer must sign and the
//! transaction ID a node will report. Both are SHA-256 over the packed body,
//! so neither changes when signatures are attached.

use sha2::{Digest, Sha256};

use super::builder::Transaction;
use super::types::HexBytes;
use crate::codec::{CodecError, Packer};
use crate::config::{CHAIN_ID_LENGTH, DIGEST_LENGTH};

impl Transaction {
    /// Transaction ID: lowercase hex SHA-256 of the packed body.
    pub fn id(&self) -> String {
        hex::encode(Sha256::digest(self.packed_body()))
    }
}

/// Digest of the context-free data section.
///
/// Thirty-two zero bytes when there is none, otherwise SHA-256 of the packed
/// array.
pub fn context_free_data_digest(data: &[HexBytes]) -> [u8; DIGEST_LENGTH] {
    if data.is_empty() {
        return [0u8; DIGEST_LENGTH];
    }
    let mut packer = Packer::new();
    packer.pack_array(data);
    Sha256::digest(packer.as_bytes()).into()
}

/// The digest a signer signs for `tx` on the chain identified by
/// `chain_id` (64 hex characters).
///
/// `sha256(chain_id || packed body || context_free_data_digest)`.
///
/// # Example
///
/// ```rust
/// use eosio_packer::config::EOS_MAINNET_CHAIN_ID;
/// use eosio_packer::transaction::{signing_digest, TransactionBuilder};
///
/// let tx = TransactionBuilder::new().expiration(0).build();
/// let digest = signing_digest(&tx, EOS_MAINNET_CHAIN_ID).unwrap();
/// assert_eq!(digest.len(), 32);
/// ```
pub fn signing_digest(tx: &Transaction, chain_id: &str) -> Result<[u8; DIGEST_LENGTH], CodecError> {
    let chain = parse_chain_id(chain_id)?;
    let mut hasher = Sha256::new();
    hasher.update(chain);
    hasher.update(tx.packed_body());
    hasher.update(context_free_data_digest(&tx.context_free_data));
    Ok(hasher.finalize().into())
}

fn parse_chain_id(chain_id: &str) -> Result<[u8; CHAIN_ID_LENGTH], CodecError> {
    let mut out = [0u8; CHAIN_ID_LENGTH];
    hex::decode_to_slice(chain_id, &mut out).map_err(|e| CodecError::InvalidChainId {
        reason: e.to_string(),
    })?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
