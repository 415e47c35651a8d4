//! Vault Indexer
//!
//! Read-only consumer of vault events. Keeps a block-ordered log per chain,
//! answers block-range scans in the shape the dashboard API serves, and
//! reconstructs the fees the contract never logs directly.
//!
//! # Modules
//! - `config`: Supported chains, vault addresses, scan defaults
//! - `log`: Append-only event log with block numbers and log indices
//! - `scan`: Block-range queries and the JSON response shape
//! - `impact`: Fee and flow aggregation over scanned events
//! - `errors`: Indexer error taxonomy

pub mod config;
pub mod errors;
pub mod impact;
pub mod log;
pub mod scan;

pub use config::IndexerConfig;
pub use errors::IndexerError;
pub use scan::{Indexer, ScanQuery, ScanResponse};
