//! Indexer configuration
//!
//! Which chains are served, where the vault lives on each, and how far back a
//! scan looks when the caller gives no starting block.

use std::collections::HashMap;

use tracing::info;
use types::ids::Address;

use crate::errors::IndexerError;

/// A network the dashboard can read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub id: u64,
    pub name: &'static str,
    pub explorer_url: &'static str,
    /// Environment variable holding the vault address on this chain.
    pub vault_env_key: &'static str,
}

pub const SEPOLIA: Chain = Chain {
    id: 11_155_111,
    name: "Sepolia",
    explorer_url: "https://sepolia.etherscan.io",
    vault_env_key: "VAULT_ADDRESS_SEPOLIA",
};

pub const BASE_SEPOLIA: Chain = Chain {
    id: 84_532,
    name: "Base Sepolia",
    explorer_url: "https://sepolia.basescan.org",
    vault_env_key: "VAULT_ADDRESS_BASE_SEPOLIA",
};

pub const SUPPORTED_CHAINS: [Chain; 2] = [SEPOLIA, BASE_SEPOLIA];

/// Environment variable overriding the default scan window.
pub const LOOKBACK_ENV_KEY: &str = "VAULT_LOOKBACK_BLOCKS";

/// Look up a supported chain by id.
pub fn chain(chain_id: u64) -> Option<&'static Chain> {
    SUPPORTED_CHAINS.iter().find(|c| c.id == chain_id)
}

/// Block explorer page for an address, if the chain has an explorer.
pub fn explorer_address_url(chain_id: u64, address: &Address) -> Option<String> {
    chain(chain_id).map(|c| format!("{}/address/{}", c.explorer_url, address))
}

/// Configuration for the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Vault address per chain id.
    pub vaults: HashMap<u64, Address>,
    /// Blocks scanned back from the head when no start block is given.
    pub default_lookback: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            vaults: HashMap::new(),
            default_lookback: 50_000,
        }
    }
}

impl IndexerConfig {
    /// Register the vault address for a chain.
    pub fn with_vault(mut self, chain_id: u64, address: Address) -> Self {
        self.vaults.insert(chain_id, address);
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, IndexerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset keys keep defaults,
    /// set-but-invalid keys are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, IndexerError> {
        let mut config = Self::default();

        for network in SUPPORTED_CHAINS {
            let Some(raw) = lookup(network.vault_env_key) else {
                continue;
            };
            let address = raw.trim().parse::<Address>().map_err(|_| IndexerError::InvalidConfig {
                key: network.vault_env_key.to_string(),
                value: raw.clone(),
            })?;
            config.vaults.insert(network.id, address);
        }

        if let Some(raw) = lookup(LOOKBACK_ENV_KEY) {
            config.default_lookback =
                raw.trim().parse().map_err(|_| IndexerError::InvalidConfig {
                    key: LOOKBACK_ENV_KEY.to_string(),
                    value: raw.clone(),
                })?;
        }

        info!(
            vaults = config.vaults.len(),
            default_lookback = config.default_lookback,
            "Indexer configuration loaded"
        );
        Ok(config)
    }

    pub fn vault_address(&self, chain_id: u64) -> Option<Address> {
        self.vaults.get(&chain_id).copied()
    }
}
