//! The transaction envelope and its builder.
//!
//! A [`Transaction`] is built once, either from its JSON form or through
//! [`TransactionBuilder`], then packed. Packing never mutates it; the only
//! later change is an external signer appending to `signatures`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use super::block::RefBlock;
use super::serde_helpers::{self, expiration_time};
use super::types::{Action, Extension, HexBytes};
use crate::codec::{decode_hex, CodecError, Pack, Packer, Unpack, Unpacker};
use crate::config::DEFAULT_EXPIRATION_WINDOW;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction in entity form.
///
/// # Packed layout
///
/// ```text
/// u32     expiration            epoch seconds
/// u16     ref_block_num
/// u32     ref_block_prefix
/// varint  max_net_usage_words
/// u8      max_cpu_usage_ms
/// varint  delay_sec
/// array   context_free_actions
/// array   actions
/// array   transaction_extensions
/// ------- end of body (hashed for the ID and signed)
/// array   signatures            each a varint-prefixed UTF-8 string
/// array   context_free_data     each varint-prefixed bytes
/// ```
///
/// The structured form uses exactly these field names. `expiration` is a
/// `yyyy-MM-ddTHH:mm:ss` UTC string; `ref_block_num`, `ref_block_prefix` and
/// `max_cpu_usage_ms` are narrowed to their widths rather than range-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Expiration as Unix seconds.
    #[serde(with = "serde_helpers::expiration")]
    pub expiration: u32,

    /// Low 16 bits of the reference block number (TaPoS).
    #[serde(deserialize_with = "serde_helpers::wrapping::deserialize_u16")]
    pub ref_block_num: u16,

    /// Bytes 8..12 of the reference block ID, read little-endian.
    #[serde(deserialize_with = "serde_helpers::wrapping::deserialize_u32")]
    pub ref_block_prefix: u32,

    /// Network bandwidth cap in 8-byte words, 0 for no explicit limit.
    pub max_net_usage_words: u32,

    /// CPU cap in milliseconds, 0 for no explicit limit.
    #[serde(deserialize_with = "serde_helpers::wrapping::deserialize_u8")]
    pub max_cpu_usage_ms: u8,

    /// Seconds to delay execution.
    pub delay_sec: u32,

    /// Actions that run without access to chain state.
    pub context_free_actions: Vec<Action>,

    /// Actions executed in order.
    pub actions: Vec<Action>,

    /// Always empty; see [`Extension`].
    #[serde(default, with = "serde_helpers::extensions")]
    pub transaction_extensions: Vec<Extension>,

    /// Signatures supplied by an external signer, stored verbatim.
    pub signatures: Vec<String>,

    /// Payloads for the context-free actions, outside the signed body.
    #[serde(deserialize_with = "serde_helpers::context_free_data::deserialize")]
    pub context_free_data: Vec<HexBytes>,
}

impl Transaction {
    /// The minimal constructor: one action, no resource limits, no delay,
    /// and nothing context-free, extended or signed yet.
    pub fn single_action(
        expiration: u32,
        ref_block_num: u16,
        ref_block_prefix: u32,
        action: Action,
    ) -> Self {
        Self {
            expiration,
            ref_block_num,
            ref_block_prefix,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
            context_free_actions: Vec::new(),
            actions: vec![action],
            transaction_extensions: Vec::new(),
            signatures: Vec::new(),
            context_free_data: Vec::new(),
        }
    }

    // -- JSON ----------------------------------------------------------------

    /// Builds a transaction from its structured form.
    ///
    /// Fails on the first malformed or missing field; a partially populated
    /// transaction is never returned.
    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        let tx = Self::deserialize(value)?;
        trace!(actions = tx.actions.len(), "transaction parsed from json");
        Ok(tx)
    }

    /// Same as [`Transaction::from_json`], from text.
    pub fn from_json_str(json: &str) -> Result<Self, CodecError> {
        let tx: Self = serde_json::from_str(json)?;
        trace!(actions = tx.actions.len(), "transaction parsed from json");
        Ok(tx)
    }

    /// The structured form, for inspection.
    pub fn to_json(&self) -> Result<Value, CodecError> {
        Ok(serde_json::to_value(self)?)
    }

    /// The structured form as indented text.
    pub fn to_json_string_pretty(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // -- Packing -------------------------------------------------------------

    /// Packs everything up to and including `transaction_extensions`.
    ///
    /// These are the bytes the transaction ID and signatures cover.
    pub fn pack_body(&self, packer: &mut Packer) {
        packer.pack_u32(self.expiration);
        packer.pack_u16(self.ref_block_num);
        packer.pack_u32(self.ref_block_prefix);
        packer.pack_varint(u64::from(self.max_net_usage_words));
        packer.pack_u8(self.max_cpu_usage_ms);
        packer.pack_varint(u64::from(self.delay_sec));
        packer.pack_array(&self.context_free_actions);
        packer.pack_array(&self.actions);
        packer.pack_array(&self.transaction_extensions);
    }

    /// The packed body as an owned buffer.
    pub fn packed_body(&self) -> Vec<u8> {
        let mut packer = Packer::new();
        self.pack_body(&mut packer);
        packer.into_bytes()
    }

    /// The full packed transaction, signatures and context-free data included.
    pub fn pack(&self) -> Vec<u8> {
        let mut packer = Packer::new();
        Pack::pack(self, &mut packer);
        debug!(
            actions = self.actions.len(),
            context_free_actions = self.context_free_actions.len(),
            signatures = self.signatures.len(),
            bytes = packer.len(),
            "packed transaction"
        );
        packer.into_bytes()
    }

    /// The full packed transaction as lowercase hex.
    pub fn pack_hex(&self) -> String {
        hex::encode(self.pack())
    }

    // -- Unpacking -----------------------------------------------------------

    /// Reads a full packed transaction. Every byte must be consumed.
    pub fn unpack(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut unpacker = Unpacker::new(bytes);
        let tx = <Self as Unpack>::unpack(&mut unpacker)?;
        unpacker.finish()?;
        debug!(
            actions = tx.actions.len(),
            bytes = bytes.len(),
            "unpacked transaction"
        );
        Ok(tx)
    }

    /// Reads a full packed transaction from hex.
    pub fn unpack_hex(hex: &str) -> Result<Self, CodecError> {
        let bytes = decode_hex("packed transaction", hex)?;
        Self::unpack(&bytes)
    }

    // -- Accessors -----------------------------------------------------------

    /// Appends a signature produced by an external signer.
    pub fn add_signature(&mut self, signature: impl Into<String>) {
        self.signatures.push(signature.into());
    }

    /// Returns `true` if at least one signature is attached.
    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// Expiration as a UTC datetime.
    pub fn expiration_time(&self) -> DateTime<Utc> {
        expiration_time(self.expiration)
    }

    /// Returns `true` if the expiration is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time() <= now
    }
}

impl Pack for Transaction {
    fn pack(&self, packer: &mut Packer) {
        self.pack_body(packer);
        packer.pack_array(&self.signatures);
        packer.pack_array(&self.context_free_data);
    }
}

impl Unpack for Transaction {
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            expiration: unpacker.unpack_u32()?,
            ref_block_num: unpacker.unpack_u16()?,
            ref_block_prefix: unpacker.unpack_u32()?,
            max_net_usage_words: unpacker.unpack_varuint32()?,
            max_cpu_usage_ms: unpacker.unpack_u8()?,
            delay_sec: unpacker.unpack_varuint32()?,
            context_free_actions: unpacker.unpack_array()?,
            actions: unpacker.unpack_array()?,
            transaction_extensions: unpacker.unpack_array()?,
            signatures: unpacker.unpack_array()?,
            context_free_data: unpacker.unpack_array()?,
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned transactions.
///
/// # Usage
///
/// ```rust
/// use eosio_packer::transaction::{Action, HexBytes, TransactionBuilder};
///
/// let tx = TransactionBuilder::new()
///     .expiration(1_514_764_800)
///     .ref_block_num(1)
///     .ref_block_prefix(2)
///     .action(Action::single(
///         "eosio.token",
///         "transfer",
///         "alice",
///         "active",
///         HexBytes::from(vec![0x01, 0x02]),
///     ))
///     .build();
///
/// assert_eq!(tx.actions.len(), 1);
/// assert!(!tx.is_signed());
/// ```
///
/// Without an explicit expiration, `build()` sets it to the current UTC time
/// plus [`DEFAULT_EXPIRATION_WINDOW`].
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    expiration: Option<u32>,
    ref_block_num: u16,
    ref_block_prefix: u32,
    max_net_usage_words: u32,
    max_cpu_usage_ms: u8,
    delay_sec: u32,
    context_free_actions: Vec<Action>,
    actions: Vec<Action>,
    context_free_data: Vec<HexBytes>,
}

impl TransactionBuilder {
    /// An empty builder; see the type docs for defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expiration explicitly (Unix seconds).
    pub fn expiration(mut self, secs: u32) -> Self {
        self.expiration = Some(secs);
        self
    }

    /// Expires `window` after the current UTC time.
    pub fn expires_in(mut self, window: Duration) -> Self {
        self.expiration = Some(expiration_from_now(window));
        self
    }

    /// Sets the low 16 bits of the reference block number.
    pub fn ref_block_num(mut self, num: u16) -> Self {
        self.ref_block_num = num;
        self
    }

    /// Sets the reference block prefix.
    pub fn ref_block_prefix(mut self, prefix: u32) -> Self {
        self.ref_block_prefix = prefix;
        self
    }

    /// Sets both TaPoS fields from a recent block.
    pub fn reference_block(mut self, block: &RefBlock) -> Self {
        self.ref_block_num = block.ref_block_num;
        self.ref_block_prefix = block.ref_block_prefix;
        self
    }

    /// Caps network usage, in 8-byte words.
    pub fn max_net_usage_words(mut self, words: u32) -> Self {
        self.max_net_usage_words = words;
        self
    }

    /// Caps CPU usage, in milliseconds.
    pub fn max_cpu_usage_ms(mut self, ms: u8) -> Self {
        self.max_cpu_usage_ms = ms;
        self
    }

    /// Delays execution by `secs` seconds.
    pub fn delay_sec(mut self, secs: u32) -> Self {
        self.delay_sec = secs;
        self
    }

    /// Appends an action. Order is preserved.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends a context-free action.
    pub fn context_free_action(mut self, action: Action) -> Self {
        self.context_free_actions.push(action);
        self
    }

    /// Appends a context-free data blob.
    pub fn context_free_data(mut self, data: HexBytes) -> Self {
        self.context_free_data.push(data);
        self
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    pub fn build(self) -> Transaction {
        let expiration = self
            .expiration
            .unwrap_or_else(|| expiration_from_now(DEFAULT_EXPIRATION_WINDOW));

        Transaction {
            expiration,
            ref_block_num: self.ref_block_num,
            ref_block_prefix: self.ref_block_prefix,
            max_net_usage_words: self.max_net_usage_words,
            max_cpu_usage_ms: self.max_cpu_usage_ms,
            delay_sec: self.delay_sec,
            context_free_actions: self.context_free_actions,
            actions: self.actions,
            transaction_extensions: Vec::new(),
            signatures: Vec::new(),
            context_free_data: self.context_free_data,
        }
    }
}

fn expiration_from_now(window: Duration) -> u32 {
    (Utc::now().timestamp() as u64).saturating_add(window.as_secs()) as u32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
