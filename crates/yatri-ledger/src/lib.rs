//! # yatri-ledger — In-Memory Demonstration Ledger
//!
//! Implements the ledger core of the Yatri Stack: submitted records
//! accumulate in a pending buffer and are periodically sealed into an
//! append-only chain of blocks, each linked to the previous block's content
//! hash.
//!
//! This is a demonstration structure, not a distributed ledger: there is no
//! consensus, no proof-of-work (the `nonce` field exists and stays zero), no
//! persistence, and no eviction — the chain lives and dies with the process.
//! What it does guarantee, structurally, is the hash link: every non-genesis
//! block's `previous_hash` equals the digest of the block sealed before it.
//!
//! ## Crate Policy
//!
//! - Depends only on `yatri-core` internally.
//! - Chain and buffer are private state; sealed blocks are immutable.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod block;
pub mod ledger;
pub mod record;

pub use block::{calculate_hash, Block, GENESIS_PREVIOUS_HASH};
pub use ledger::{Ledger, LedgerError, SEAL_THRESHOLD};
pub use record::LedgerRecord;
