//! Block-ordered vault event log
//!
//! Mirrors what a node exposes through `getLogs`: each event is stored with
//! the block it was included in, its index within that block, and the hash
//! of the transaction that emitted it.
//!
//! Invariants:
//! - Block numbers never decrease
//! - Log indices are consecutive within a block, starting at 0

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{debug, warn};
use vault_contracts::events::VaultEvent;

use crate::errors::IndexerError;

/// 32-byte transaction hash, rendered as `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One emitted event and its position on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub block_number: u64,
    pub log_index: u64,
    pub tx_hash: TxHash,
    pub event: VaultEvent,
}

/// Append-only event log for one vault.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<LogRecord>,
    /// Chain head; may be ahead of the last block containing events.
    latest_block: u64,
    /// Transactions already recorded in `latest_block`.
    txs_in_block: u64,
    /// Next log index within `latest_block`.
    next_log_index: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the events of one transaction included in `block_number`.
    ///
    /// Events keep their emission order. Returns the transaction hash.
    pub fn record_transaction(
        &mut self,
        block_number: u64,
        events: Vec<VaultEvent>,
    ) -> Result<TxHash, IndexerError> {
        self.advance_to(block_number)?;

        let tx_hash = Self::hash_transaction(block_number, self.txs_in_block, &events)?;
        self.txs_in_block += 1;

        debug!(
            block = block_number,
            tx = %tx_hash,
            event_count = events.len(),
            "Recording transaction"
        );

        for event in events {
            self.records.push(LogRecord {
                block_number,
                log_index: self.next_log_index,
                tx_hash,
                event,
            });
            self.next_log_index += 1;
        }
        Ok(tx_hash)
    }

    /// Move the chain head forward without recording anything.
    pub fn advance_to(&mut self, block_number: u64) -> Result<(), IndexerError> {
        if block_number < self.latest_block {
            warn!(
                latest = self.latest_block,
                received = block_number,
                "Rejecting out-of-order block"
            );
            return Err(IndexerError::NonMonotonicBlock {
                latest: self.latest_block,
                received: block_number,
            });
        }
        if block_number > self.latest_block {
            self.latest_block = block_number;
            self.txs_in_block = 0;
            self.next_log_index = 0;
        }
        Ok(())
    }

    pub fn latest_block(&self) -> u64 {
        self.latest_block
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with `from <= block_number <= to`, oldest first.
    pub fn range(&self, from: u64, to: u64) -> impl Iterator<Item = &LogRecord> + '_ {
        let start = self.records.partition_point(|r| r.block_number < from);
        self.records[start..]
            .iter()
            .take_while(move |r| r.block_number <= to)
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    fn hash_transaction(
        block_number: u64,
        position: u64,
        events: &[VaultEvent],
    ) -> Result<TxHash, IndexerError> {
        let payload = serde_json::to_vec(events).map_err(|e| IndexerError::Encoding(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(block_number.to_be_bytes());
        hasher.update(position.to_be_bytes());
        hasher.update(&payload);
        Ok(TxHash(hasher.finalize().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::Address;
    use vault_contracts::events::{Deposited, Paused};

    fn deposit(amount: u128) -> VaultEvent {
        VaultEvent::Deposited(Deposited {
            user: Address::from_seed("user"),
            usdc_amount: amount,
            shares: amount,
        })
    }

    #[test]
    fn test_log_indices_within_block() {
        let mut log = EventLog::new();
        log.record_transaction(10, vec![deposit(1)]).unwrap();
        log.record_transaction(10, vec![deposit(2), deposit(3)]).unwrap();
        log.record_transaction(11, vec![deposit(4)]).unwrap();

        let positions: Vec<(u64, u64)> = log
            .records()
            .iter()
            .map(|r| (r.block_number, r.log_index))
            .collect();
        assert_eq!(positions, vec![(10, 0), (10, 1), (10, 2), (11, 0)]);
        assert_eq!(log.latest_block(), 11);
    }

    #[test]
    fn test_events_of_one_transaction_share_hash() {
        let mut log = EventLog::new();
        let paused = VaultEvent::Paused(Paused {
            account: Address::from_seed("owner"),
        });
        let hash = log.record_transaction(5, vec![deposit(1), paused]).unwrap();

        assert!(log.records().iter().all(|r| r.tx_hash == hash));
    }

    #[test]
    fn test_distinct_transactions_distinct_hashes() {
        let mut log = EventLog::new();
        let a = log.record_transaction(5, vec![deposit(1)]).unwrap();
        let b = log.record_transaction(5, vec![deposit(1)]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 66);
    }

    #[test]
    fn test_out_of_order_block_rejected() {
        let mut log = EventLog::new();
        log.record_transaction(10, vec![deposit(1)]).unwrap();
        let result = log.record_transaction(9, vec![deposit(2)]);
        assert_eq!(
            result,
            Err(IndexerError::NonMonotonicBlock {
                latest: 10,
                received: 9
            })
        );
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_advance_moves_head_without_records() {
        let mut log = EventLog::new();
        log.advance_to(1_000).unwrap();
        assert_eq!(log.latest_block(), 1_000);
        assert!(log.is_empty());
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut log = EventLog::new();
        for block in [1, 5, 5, 9, 12] {
            log.record_transaction(block, vec![deposit(block as u128)]).unwrap();
        }

        let blocks: Vec<u64> = log.range(5, 9).map(|r| r.block_number).collect();
        assert_eq!(blocks, vec![5, 5, 9]);
        assert_eq!(log.range(13, 20).count(), 0);
        assert_eq!(log.range(0, 100).count(), 5);
    }
}
