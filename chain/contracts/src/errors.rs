//! Contract-specific error types
//!
//! Every error is a rejected call: the operation that produced it has left
//! the ledger, the counters, token balances and the event buffer untouched.

use thiserror::Error;
use types::ids::Address;
use types::numeric::Amount;

/// Deposit token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient token balance: needed {needed}, available {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("Insufficient allowance: needed {needed}, allowed {allowed}")]
    InsufficientAllowance { needed: Amount, allowed: Amount },

    #[error("Invalid receiver: zero address")]
    InvalidReceiver,

    #[error("Token supply overflow")]
    SupplyOverflow,

    #[error("Transfer rejected by token: {reason}")]
    Rejected { reason: String },
}

/// Vault-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Deposit amount must be positive")]
    ZeroAmount,

    #[error("Insufficient share balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    #[error("Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: Address },

    #[error("Vault is paused")]
    EnforcedPause,

    #[error("Invalid state: vault is {}", pause_state(.paused))]
    InvalidState { paused: bool },

    #[error("Token transfer failed: {0}")]
    TokenTransferFailed(#[from] TokenError),

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("Arithmetic overflow in share accounting")]
    Overflow,
}

fn pause_state(paused: &bool) -> &'static str {
    if *paused {
        "already paused"
    } else {
        "not paused"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_error_display() {
        let err = VaultError::InsufficientBalance {
            requested: 10,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient share balance: requested 10, available 3"
        );
    }

    #[test]
    fn test_invalid_state_display() {
        assert_eq!(
            VaultError::InvalidState { paused: true }.to_string(),
            "Invalid state: vault is already paused"
        );
        assert_eq!(
            VaultError::InvalidState { paused: false }.to_string(),
            "Invalid state: vault is not paused"
        );
    }

    #[test]
    fn test_unauthorized_names_caller() {
        let caller = Address::from_seed("eve");
        let err = VaultError::Unauthorized { caller };
        assert!(err.to_string().contains(&caller.to_string()));
    }

    #[test]
    fn test_vault_error_from_token_error() {
        let token_err = TokenError::InsufficientAllowance {
            needed: 5,
            allowed: 0,
        };
        let vault_err: VaultError = token_err.into();
        assert!(matches!(vault_err, VaultError::TokenTransferFailed(_)));
    }
}
