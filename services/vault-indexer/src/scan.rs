//! Block-range scans
//!
//! Resolves a scan window the way the dashboard API does and returns the
//! deposit/withdraw events inside it, newest first:
//! - `to = to_block` if given, else the chain head
//! - `from = from_block` if given, else `head - lookback` (floored at 0)

use std::collections::HashMap;

use serde::{Serialize, Serializer};
use tracing::{info, warn};
use types::ids::Address;
use vault_contracts::events::VaultEvent;

use crate::config::{self, IndexerConfig};
use crate::errors::IndexerError;
use crate::log::{EventLog, LogRecord, TxHash};

/// Scan parameters. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanQuery {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    /// Overrides the configured default lookback.
    pub lookback: Option<u64>,
}

impl ScanQuery {
    /// Scan the last `blocks` blocks up to the head.
    pub fn last(blocks: u64) -> Self {
        Self {
            lookback: Some(blocks),
            ..Self::default()
        }
    }

    /// Scan an explicit inclusive range.
    pub fn between(from_block: u64, to_block: u64) -> Self {
        Self {
            from_block: Some(from_block),
            to_block: Some(to_block),
            lookback: None,
        }
    }

    /// Resolve to an inclusive `(from, to)` block range.
    pub fn resolve(&self, latest: u64, default_lookback: u64) -> Result<(u64, u64), IndexerError> {
        let lookback = self.lookback.unwrap_or(default_lookback);
        let from = self
            .from_block
            .unwrap_or_else(|| latest.saturating_sub(lookback));
        let to = self.to_block.unwrap_or(latest);

        if from > to {
            return Err(IndexerError::InvalidRange { from, to });
        }
        Ok((from, to))
    }
}

/// One event in a scan response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedEvent {
    pub chain_id: u64,
    pub address: Address,
    #[serde(serialize_with = "as_string")]
    pub block_number: u64,
    pub transaction_hash: TxHash,
    #[serde(serialize_with = "as_string")]
    pub log_index: u64,
    #[serde(flatten)]
    pub event: VaultEvent,
}

/// Scan result, serialized in the dashboard API's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub chain_id: u64,
    pub vault_address: Address,
    #[serde(serialize_with = "as_string")]
    pub from_block: u64,
    #[serde(serialize_with = "as_string")]
    pub to_block: u64,
    pub count: usize,
    pub events: Vec<ScannedEvent>,
}

impl ScanResponse {
    /// The bare events, newest first.
    pub fn vault_events(&self) -> impl Iterator<Item = &VaultEvent> {
        self.events.iter().map(|e| &e.event)
    }
}

fn as_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Read side of the vault: one event log per supported chain.
#[derive(Debug)]
pub struct Indexer {
    config: IndexerConfig,
    logs: HashMap<u64, EventLog>,
}

impl Indexer {
    pub fn new(config: IndexerConfig) -> Self {
        Self {
            config,
            logs: HashMap::new(),
        }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Record one transaction's events on `chain_id`.
    pub fn ingest(
        &mut self,
        chain_id: u64,
        block_number: u64,
        events: Vec<VaultEvent>,
    ) -> Result<TxHash, IndexerError> {
        self.vault_for(chain_id)?;
        self.logs
            .entry(chain_id)
            .or_default()
            .record_transaction(block_number, events)
    }

    /// Move the chain head forward on `chain_id`.
    pub fn advance_to(&mut self, chain_id: u64, block_number: u64) -> Result<(), IndexerError> {
        self.vault_for(chain_id)?;
        self.logs.entry(chain_id).or_default().advance_to(block_number)
    }

    pub fn latest_block(&self, chain_id: u64) -> u64 {
        self.logs.get(&chain_id).map_or(0, EventLog::latest_block)
    }

    /// Deposited and Withdrawn events in the resolved window, newest first by
    /// `(block_number, log_index)`.
    pub fn scan(&self, chain_id: u64, query: &ScanQuery) -> Result<ScanResponse, IndexerError> {
        let vault_address = self.vault_for(chain_id)?;
        let latest = self.latest_block(chain_id);

        let (from_block, to_block) = query
            .resolve(latest, self.config.default_lookback)
            .inspect_err(|err| warn!(chain_id, error = %err, "Rejected scan"))?;

        let mut events: Vec<ScannedEvent> = self
            .logs
            .get(&chain_id)
            .into_iter()
            .flat_map(|log| log.range(from_block, to_block))
            .filter(|record| record.event.is_flow())
            .map(|record| Self::to_scanned(chain_id, vault_address, record))
            .collect();

        events.sort_by(|a, b| {
            (b.block_number, b.log_index).cmp(&(a.block_number, a.log_index))
        });

        info!(
            chain_id,
            from_block,
            to_block,
            count = events.len(),
            "Scan complete"
        );

        Ok(ScanResponse {
            chain_id,
            vault_address,
            from_block,
            to_block,
            count: events.len(),
            events,
        })
    }

    fn vault_for(&self, chain_id: u64) -> Result<Address, IndexerError> {
        if config::chain(chain_id).is_none() {
            return Err(IndexerError::UnsupportedChain { chain_id });
        }
        self.config
            .vault_address(chain_id)
            .ok_or(IndexerError::VaultNotConfigured { chain_id })
    }

    fn to_scanned(chain_id: u64, address: Address, record: &LogRecord) -> ScannedEvent {
        ScannedEvent {
            chain_id,
            address,
            block_number: record.block_number,
            transaction_hash: record.tx_hash,
            log_index: record.log_index,
            event: record.event.clone(),
        }
    }
}
