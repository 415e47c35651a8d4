//! Contract events
//!
//! Events are immutable records emitted by successful vault operations and
//! consumed by external indexers. Field names follow the contract ABI so the
//! serialized form is what a log decoder would produce; amounts are decimal
//! strings.

use serde::{Deserialize, Serialize};
use types::ids::Address;
use types::numeric::{serde_amount, Amount};

/// `Deposited(address indexed user, uint256 usdcAmount, uint256 shares)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposited {
    pub user: Address,
    #[serde(with = "serde_amount")]
    pub usdc_amount: Amount,
    #[serde(with = "serde_amount")]
    pub shares: Amount,
}

/// `Withdrawn(address indexed user, uint256 shares, uint256 usdcAmount)`
///
/// `shares` is the gross amount burned, `usdc_amount` the net paid to the user.
/// The fee itself is not logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawn {
    pub user: Address,
    #[serde(with = "serde_amount")]
    pub shares: Amount,
    #[serde(with = "serde_amount")]
    pub usdc_amount: Amount,
}

impl Withdrawn {
    /// Fee withheld by this withdrawal, reconstructed as `shares - usdcAmount`.
    pub fn fee(&self) -> Amount {
        self.shares.saturating_sub(self.usdc_amount)
    }
}

/// `FeeRecipientUpdated(address oldRecipient, address newRecipient)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecipientUpdated {
    pub old_recipient: Address,
    pub new_recipient: Address,
}

/// `Paused(address account)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paused {
    pub account: Address,
}

/// `Unpaused(address account)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unpaused {
    pub account: Address,
}

/// `OwnershipTransferred(address indexed previousOwner, address indexed newOwner)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

/// Enum wrapper for all vault events, enabling uniform handling.
///
/// Serializes as `{"eventName": ..., "args": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventName", content = "args")]
pub enum VaultEvent {
    Deposited(Deposited),
    Withdrawn(Withdrawn),
    FeeRecipientUpdated(FeeRecipientUpdated),
    Paused(Paused),
    Unpaused(Unpaused),
    OwnershipTransferred(OwnershipTransferred),
}

impl VaultEvent {
    pub fn name(&self) -> &'static str {
        match self {
            VaultEvent::Deposited(_) => "Deposited",
            VaultEvent::Withdrawn(_) => "Withdrawn",
            VaultEvent::FeeRecipientUpdated(_) => "FeeRecipientUpdated",
            VaultEvent::Paused(_) => "Paused",
            VaultEvent::Unpaused(_) => "Unpaused",
            VaultEvent::OwnershipTransferred(_) => "OwnershipTransferred",
        }
    }

    /// Canonical ABI signature, as hashed into the log topic.
    pub fn signature(&self) -> &'static str {
        match self {
            VaultEvent::Deposited(_) => "Deposited(address,uint256,uint256)",
            VaultEvent::Withdrawn(_) => "Withdrawn(address,uint256,uint256)",
            VaultEvent::FeeRecipientUpdated(_) => "FeeRecipientUpdated(address,address)",
            VaultEvent::Paused(_) => "Paused(address)",
            VaultEvent::Unpaused(_) => "Unpaused(address)",
            VaultEvent::OwnershipTransferred(_) => "OwnershipTransferred(address,address)",
        }
    }

    /// True for the share-movement events indexers aggregate.
    pub fn is_flow(&self) -> bool {
        matches!(self, VaultEvent::Deposited(_) | VaultEvent::Withdrawn(_))
    }
}
