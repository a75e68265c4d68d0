//! # Blocks — Hash-Linked Batches of Sealed Records
//!
//! A block is an immutable batch of ledger records linked to its predecessor
//! by that predecessor's content hash. The block hash is a SHA-256 digest of
//! the JCS-canonical header `(nonce, previous_hash, timestamp, transactions)`
//! — the `hash` field itself is never part of its own preimage.

use serde::{Deserialize, Serialize};

use yatri_core::error::CanonicalizationError;
use yatri_core::{sha256_hex, CanonicalBytes, Timestamp};

use crate::record::LedgerRecord;

/// Sentinel `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// An immutable, hash-linked batch of sealed ledger records.
///
/// Blocks are only created by the ledger's sealing path; all fields are
/// read-only once sealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    timestamp: Timestamp,
    transactions: Vec<LedgerRecord>,
    previous_hash: String,
    hash: String,
    nonce: u64,
}

/// Canonical header shape the block hash is computed over.
#[derive(Serialize)]
struct BlockHeader<'a> {
    nonce: u64,
    previous_hash: &'a str,
    timestamp: Timestamp,
    transactions: &'a [LedgerRecord],
}

/// Compute a block hash from its header fields.
///
/// Pure and deterministic: the same inputs always yield the same 64-char hex
/// digest. Collisions are not handled — the digest is treated as unique.
///
/// # Errors
///
/// Fails only when the transactions cannot be canonically serialized; the
/// ledger validates records at submission, so its own sealing path never
/// hits this.
pub fn calculate_hash(
    timestamp: Timestamp,
    transactions: &[LedgerRecord],
    previous_hash: &str,
    nonce: u64,
) -> Result<String, CanonicalizationError> {
    let header = BlockHeader {
        nonce,
        previous_hash,
        timestamp,
        transactions,
    };
    Ok(sha256_hex(&CanonicalBytes::new(&header)?))
}

impl Block {
    /// Assemble a block from a precomputed header digest.
    ///
    /// Only the ledger's sealing path calls this; `hash` must have been
    /// produced by [`calculate_hash`] over exactly these fields.
    pub(crate) fn from_parts(
        timestamp: Timestamp,
        transactions: Vec<LedgerRecord>,
        previous_hash: String,
        hash: String,
    ) -> Self {
        Self {
            timestamp,
            transactions,
            previous_hash,
            hash,
            nonce: 0,
        }
    }

    /// Build the genesis block: no records, sentinel previous hash.
    pub(crate) fn genesis(timestamp: Timestamp) -> Self {
        // The empty header always canonicalizes.
        let hash =
            calculate_hash(timestamp, &[], GENESIS_PREVIOUS_HASH, 0).unwrap_or_default();
        Self::from_parts(
            timestamp,
            Vec::new(),
            GENESIS_PREVIOUS_HASH.to_string(),
            hash,
        )
    }

    /// When this block was sealed.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The sealed records, in submission order.
    pub fn transactions(&self) -> &[LedgerRecord] {
        &self.transactions
    }

    /// The `hash` of the immediately preceding block, or the genesis
    /// sentinel.
    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    /// This block's header digest (64-char lowercase hex).
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Present for structural compatibility with proof-of-work chains;
    /// always zero — no difficulty search is performed.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Whether this is the chain's genesis block.
    pub fn is_genesis(&self) -> bool {
        self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    /// Recompute this block's header digest from its stored fields.
    pub fn recompute_hash(&self) -> Result<String, CanonicalizationError> {
        calculate_hash(
            self.timestamp,
            &self.transactions,
            &self.previous_hash,
            self.nonce,
        )
    }
}
