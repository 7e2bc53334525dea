// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # EOSIO Packer — Core Library
//!
//! Turns an EOSIO transaction from its JSON form into the exact bytes a node
//! expects, and back. Those bytes are what gets signed, so there is no
//! "close enough": a single misplaced bit and every signature is garbage.
//!
//! ## Architecture
//!
//! - **codec** — Primitive packers, the varint, and the 64-bit name encoding.
//! - **transaction** — Permission levels, actions, the envelope, JSON bridge,
//!   IDs and signing digests.
//! - **config** — Format constants and well-known chain IDs.
//!
//! ## Example
//!
//! ```
//! use eosio_packer::transaction::Transaction;
//!
//! let tx = Transaction::from_json_str(r#"{
//!     "expiration": "2018-01-01T00:00:00",
//!     "ref_block_num": 1,
//!     "ref_block_prefix": 2,
//!     "max_net_usage_words": 0,
//!     "max_cpu_usage_ms": 0,
//!     "delay_sec": 0,
//!     "context_free_actions": [],
//!     "actions": [{
//!         "account": "eosio.token",
//!         "name": "transfer",
//!         "authorization": [{"actor": "alice", "permission": "active"}],
//!         "data": "0102"
//!     }],
//!     "transaction_extensions": [],
//!     "signatures": [],
//!     "context_free_data": []
//! }"#).unwrap();
//!
//! assert!(tx.pack_hex().starts_with("007a495a"));
//! ```
//!
//! ## What this crate does not do
//!
//! 1. Sign. It hands out the digest; keys live somewhere else.
//! 2. Judge. Authorizations and action payloads are packed as given.
//! 3. Talk to nodes. Bytes in, bytes out.

pub mod codec;
pub mod config;
pub mod transaction;
