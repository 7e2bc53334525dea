//! # Transaction Module
//!
//! The entity graph of a transaction and its two conversions: to and from
//! the structured JSON form, and to and from the canonical packed bytes.
//!
//! ## Architecture
//!
//! ```text
//! types.rs         — PermissionLevel, Action, Extension, HexBytes
//! builder.rs       — The Transaction envelope and TransactionBuilder
//! serde_helpers.rs — JSON adapters: expiration timestamps, narrowed integers, extensions
//! signing.rs       — Transaction ID and signing digest (no key material)
//! block.rs         — Reference-block fields derived from a block ID
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — [`Transaction::from_json`], [`Transaction::single_action`]
//!    or [`TransactionBuilder`].
//! 2. **Digest** — [`signing_digest`] for an external signer.
//! 3. **Sign** — the signer's output goes in via [`Transaction::add_signature`].
//! 4. **Pack** — [`Transaction::pack_hex`] for submission.
//!
//! Ownership is strictly nested (transaction owns actions owns permission
//! levels); nothing is shared or mutated during packing.

pub mod block;
pub mod builder;
pub mod serde_helpers;
pub mod signing;
pub mod types;

pub use block::{block_prefix, RefBlock};
pub use builder::{Transaction, TransactionBuilder};
pub use signing::{context_free_data_digest, signing_digest};
pub use types::{Action, Extension, HexBytes, PermissionLevel};
