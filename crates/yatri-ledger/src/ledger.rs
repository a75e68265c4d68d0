//! # Ledger — Pending Buffer and Append-Only Chain
//!
//! The ledger owns two pieces of state: the pending buffer (records
//! submitted but not yet sealed) and the chain (an append-only sequence of
//! hash-linked blocks, starting from a genesis block created at
//! construction). Both are private; nothing outside this module can mutate a
//! sealed block or reorder the buffer.
//!
//! Record lifecycle is two states, one direction: **pending** (buffered) →
//! **sealed** (embedded in a block). Sealing is triggered synchronously when
//! the buffer reaches [`SEAL_THRESHOLD`]; there is no time-based sealing and
//! no path back to pending.
//!
//! All operations run to completion on the calling thread. A `Ledger` is an
//! owned value — Rust's `&mut` discipline is what makes "no concurrent
//! writers" hold by construction. Wrap it in a mutex before sharing it
//! across threads; nothing here does that for you.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use yatri_core::error::CanonicalizationError;
use yatri_core::{CanonicalBytes, Timestamp};

use crate::block::{calculate_hash, Block, GENESIS_PREVIOUS_HASH};
use crate::record::LedgerRecord;

/// Buffer length at which a seal is triggered.
pub const SEAL_THRESHOLD: usize = 3;

/// Errors raised by ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Submitted record was not a field map.
    #[error("ledger records must be field maps, got {0}")]
    RecordShape(String),

    /// Submitted record cannot be canonically serialized, so it could never
    /// be hashed into a block.
    #[error("record rejected: {0}")]
    InvalidRecord(#[from] CanonicalizationError),

    /// A chain walk found a broken link or a non-reproducible block hash.
    #[error("chain integrity violation at block {index}: {reason}")]
    IntegrityViolation {
        /// Index of the offending block.
        index: usize,
        /// What failed to check out.
        reason: String,
    },
}

/// The in-memory ledger: pending buffer plus append-only chain.
#[derive(Debug, Clone)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<LedgerRecord>,
}

impl Ledger {
    /// Create a ledger whose chain holds exactly the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis(Timestamp::now())],
            pending: Vec::new(),
        }
    }

    /// Submit a record for inclusion in the chain.
    ///
    /// The record is stamped and buffered. When the buffer reaches
    /// [`SEAL_THRESHOLD`], a block is sealed over the buffered records
    /// immediately and returned; otherwise `None` comes back and the record
    /// waits for the next submissions.
    ///
    /// # Errors
    ///
    /// Rejects records that are not field maps, and records that cannot be
    /// canonically serialized (these could never be hashed into a block).
    /// Validation happens here, at submission, so sealing itself never
    /// rejects a buffered record.
    pub fn add_transaction(&mut self, record: impl Serialize) -> Result<Option<Block>, LedgerError> {
        let value = serde_json::to_value(&record).map_err(CanonicalizationError::from)?;
        let fields = match value {
            Value::Object(map) => map,
            Value::Null => return Err(LedgerError::RecordShape("null".to_string())),
            Value::Bool(_) => return Err(LedgerError::RecordShape("a boolean".to_string())),
            Value::Number(_) => return Err(LedgerError::RecordShape("a number".to_string())),
            Value::String(_) => return Err(LedgerError::RecordShape("a string".to_string())),
            Value::Array(_) => return Err(LedgerError::RecordShape("an array".to_string())),
        };
        CanonicalBytes::new(&fields)?;

        self.pending.push(LedgerRecord::stamped(fields));
        tracing::debug!(pending = self.pending.len(), "ledger record buffered");

        if self.pending.len() >= SEAL_THRESHOLD {
            let previous_hash = self
                .chain
                .last()
                .map(|b| b.hash().to_string())
                .unwrap_or_else(|| GENESIS_PREVIOUS_HASH.to_string());
            return Ok(Some(self.seal_block(&previous_hash)?));
        }
        Ok(None)
    }

    /// Seal the current buffer into a new block linked to `previous_hash`.
    ///
    /// Builds the block over every buffered record in submission order,
    /// appends it to the chain, clears the buffer, and returns the sealed
    /// block. Sealing is terminal: the records can never return to the
    /// buffer.
    pub fn seal_block(&mut self, previous_hash: &str) -> Result<Block, LedgerError> {
        let timestamp = Timestamp::now();
        // Hash over the live buffer first; it is only drained once the
        // header digest exists.
        let hash = calculate_hash(timestamp, &self.pending, previous_hash, 0)?;
        let block = Block::from_parts(
            timestamp,
            std::mem::take(&mut self.pending),
            previous_hash.to_string(),
            hash,
        );
        self.chain.push(block.clone());
        tracing::info!(
            height = self.chain.len(),
            transactions = block.transactions().len(),
            hash = block.hash(),
            "block sealed"
        );
        Ok(block)
    }

    /// The full chain, genesis first.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Number of blocks in the chain (always at least 1).
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Never true — the chain always holds its genesis block. Present to
    /// pair with [`Ledger::len()`].
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The most recently sealed block.
    pub fn tip(&self) -> Option<&Block> {
        self.chain.last()
    }

    /// Records submitted but not yet sealed, in submission order.
    pub fn pending(&self) -> &[LedgerRecord] {
        &self.pending
    }

    /// Number of records awaiting the next seal.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Walk the chain, checking every hash link and re-deriving every block
    /// digest from its stored fields.
    ///
    /// The ledger never calls this itself — sealing is trusted at creation
    /// time. It exists for callers and tests that want the structural
    /// guarantee checked explicitly.
    pub fn verify_integrity(&self) -> Result<(), LedgerError> {
        for (index, block) in self.chain.iter().enumerate() {
            let expected_previous = if index == 0 {
                GENESIS_PREVIOUS_HASH
            } else {
                self.chain[index - 1].hash()
            };
            if block.previous_hash() != expected_previous {
                return Err(LedgerError::IntegrityViolation {
                    index,
                    reason: format!(
                        "previous_hash {} does not match predecessor hash {}",
                        block.previous_hash(),
                        expected_previous
                    ),
                });
            }
            let recomputed =
                block
                    .recompute_hash()
                    .map_err(|e| LedgerError::IntegrityViolation {
                        index,
                        reason: format!("header does not canonicalize: {e}"),
                    })?;
            if recomputed != block.hash() {
                return Err(LedgerError::IntegrityViolation {
                    index,
                    reason: "stored hash does not match recomputed digest".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_genesis_on_construction() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pending_len(), 0);
        let genesis = ledger.tip().unwrap();
        assert!(genesis.is_genesis());
        assert_eq!(genesis.previous_hash(), GENESIS_PREVIOUS_HASH);
    }

    #[test]
    fn test_two_records_stay_pending() {
        let mut ledger = Ledger::new();
        assert!(ledger.add_transaction(json!({"name": "Alice"})).unwrap().is_none());
        assert!(ledger.add_transaction(json!({"name": "Bob"})).unwrap().is_none());
        assert_eq!(ledger.pending_len(), 2);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_third_record_seals() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(json!({"name": "Alice"})).unwrap();
        ledger.add_transaction(json!({"name": "Bob"})).unwrap();
        let sealed = ledger
            .add_transaction(json!({"name": "Carol"}))
            .unwrap()
            .expect("third record must seal a block");

        assert_eq!(ledger.pending_len(), 0);
        assert_eq!(ledger.len(), 2);

        let names: Vec<_> = sealed
            .transactions()
            .iter()
            .map(|r| r.get("name").cloned().unwrap())
            .collect();
        assert_eq!(names, vec![json!("Alice"), json!("Bob"), json!("Carol")]);
    }

    #[test]
    fn test_sealed_block_links_to_genesis() {
        let mut ledger = Ledger::new();
        for name in ["Alice", "Bob", "Carol"] {
            ledger.add_transaction(json!({"name": name})).unwrap();
        }
        let chain = ledger.chain();
        assert_eq!(chain[1].previous_hash(), chain[0].hash());
    }

    #[test]
    fn test_explicit_seal_of_partial_buffer() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(json!({"name": "Alice"})).unwrap();
        let previous = ledger.tip().unwrap().hash().to_string();
        let block = ledger.seal_block(&previous).unwrap();
        assert_eq!(block.transactions().len(), 1);
        assert_eq!(ledger.pending_len(), 0);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_non_map_records_rejected() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.add_transaction(json!("just a string")),
            Err(LedgerError::RecordShape(_))
        ));
        assert!(matches!(
            ledger.add_transaction(json!([1, 2, 3])),
            Err(LedgerError::RecordShape(_))
        ));
        assert!(matches!(
            ledger.add_transaction(json!(null)),
            Err(LedgerError::RecordShape(_))
        ));
        assert_eq!(ledger.pending_len(), 0);
    }

    #[test]
    fn test_float_record_rejected_at_submission() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add_transaction(json!({"latitude": 26.85}))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord(_)));
        assert_eq!(ledger.pending_len(), 0);
    }

    #[test]
    fn test_verify_integrity_of_grown_chain() {
        let mut ledger = Ledger::new();
        for i in 0..7 {
            ledger.add_transaction(json!({"seq": i})).unwrap();
        }
        assert_eq!(ledger.len(), 3); // genesis + two sealed blocks
        assert_eq!(ledger.pending_len(), 1);
        ledger.verify_integrity().unwrap();
    }

    #[test]
    fn test_chain_grows_monotonically() {
        let mut ledger = Ledger::new();
        let mut last_len = ledger.len();
        for i in 0..12 {
            ledger.add_transaction(json!({"seq": i})).unwrap();
            assert!(ledger.len() >= last_len);
            last_len = ledger.len();
        }
        assert_eq!(last_len, 5); // genesis + 12/3 sealed blocks
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        /// Buffer length and chain length are fully determined by the number
        /// of accepted submissions.
        #[test]
        fn threshold_arithmetic_holds(n in 0usize..40) {
            let mut ledger = Ledger::new();
            for i in 0..n {
                ledger.add_transaction(json!({"seq": i as u64})).unwrap();
            }
            prop_assert_eq!(ledger.pending_len(), n % SEAL_THRESHOLD);
            prop_assert_eq!(ledger.len(), 1 + n / SEAL_THRESHOLD);
        }

        /// Every grown chain passes its own integrity walk.
        #[test]
        fn grown_chains_verify(n in 0usize..40) {
            let mut ledger = Ledger::new();
            for i in 0..n {
                ledger.add_transaction(json!({"seq": i as u64})).unwrap();
            }
            prop_assert!(ledger.verify_integrity().is_ok());
        }
    }
}
