//! Vault contract logic
//!
//! Single-asset custody: users deposit a stablecoin and receive shares 1:1,
//! withdrawals burn shares and pay out the principal minus a flat fee that
//! goes to a configurable recipient.
//!
//! # Modules
//! - `token`: Deposit token interface and an in-memory USDC mock
//! - `security`: Ownership and pause primitives
//! - `vault`: Share ledger, deposit/withdraw, fee and pause administration
//! - `events`: Contract events in their indexer-facing shape
//! - `errors`: Contract error taxonomy

pub mod errors;
pub mod events;
pub mod security;
pub mod token;
pub mod vault;

/// Contract ABI version, frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
