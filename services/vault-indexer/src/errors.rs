//! Indexer error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexerError {
    #[error("Unsupported chain: {chain_id}")]
    UnsupportedChain { chain_id: u64 },

    #[error("Vault address not configured for chain {chain_id}")]
    VaultNotConfigured { chain_id: u64 },

    #[error("Invalid block range: from {from} is after to {to}")]
    InvalidRange { from: u64, to: u64 },

    #[error("Non-monotonic block: latest={latest}, received={received}")]
    NonMonotonicBlock { latest: u64, received: u64 },

    #[error("Invalid config value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("Event encoding failed: {0}")]
    Encoding(String),
}
