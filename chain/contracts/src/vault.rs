//! Vault: share ledger, deposits, fee-bearing withdrawals, administration
//!
//! Shares are minted 1:1 with deposited principal, so the share ledger and
//! the locked value are denominated identically:
//! - `total_value_locked == sum(balance_of(a))` for every account `a`
//! - a withdrawal of `s` shares pays `s - fee` to the user and `fee` to the
//!   fee recipient, where `fee = floor(s * bps / 10_000)`
//!
//! Every operation validates and stages its ledger changes first, runs the
//! token transfers, and only then commits. A failed transfer rolls back any
//! transfer that already went through, so a rejected call leaves no trace.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use types::fee::FeeRate;
use types::ids::Address;
use types::numeric::Amount;

use crate::errors::{TokenError, VaultError};
use crate::events::{
    Deposited, FeeRecipientUpdated, OwnershipTransferred, Paused, Unpaused, VaultEvent, Withdrawn,
};
use crate::security::{Ownable, PauseGuard};
use crate::token::FungibleToken;

/// Construction-time parameters. Nothing here can change after deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Withdrawal fee rate.
    pub fee_rate: FeeRate,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            fee_rate: FeeRate::DEFAULT_WITHDRAW_FEE,
        }
    }
}

/// Outcome of a withdrawal: `net + fee == shares`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// Gross shares burned.
    pub shares: Amount,
    /// Paid to the withdrawing account.
    pub net: Amount,
    /// Paid to the fee recipient.
    pub fee: Amount,
}

/// Single-asset vault contract.
///
/// Owns its deposit token so that all state a call can touch sits behind one
/// `&mut self`; independent instances share nothing.
#[derive(Debug, Clone)]
pub struct Vault<T> {
    /// The vault's own account on the token.
    address: Address,
    token: T,
    /// Share balances: account -> shares
    shares: HashMap<Address, Amount>,
    total_value_locked: Amount,
    fee_rate: FeeRate,
    fee_recipient: Address,
    ownable: Ownable,
    pause_guard: PauseGuard,
    /// Emitted events log (append-only)
    events: Vec<VaultEvent>,
}

impl<T: FungibleToken + Clone> Vault<T> {
    /// Deploy a vault at `address` with the default 50 bps withdrawal fee.
    ///
    /// The deployer becomes owner and initial fee recipient.
    pub fn new(address: Address, token: T, deployer: Address) -> Result<Self, VaultError> {
        Self::with_config(address, token, deployer, VaultConfig::default())
    }

    /// Deploy a vault with explicit construction parameters.
    pub fn with_config(
        address: Address,
        token: T,
        deployer: Address,
        config: VaultConfig,
    ) -> Result<Self, VaultError> {
        if address.is_zero() {
            return Err(VaultError::ZeroAddress);
        }
        let ownable = Ownable::new(deployer)?;

        info!(
            vault = %address,
            owner = %deployer,
            fee_bps = config.fee_rate.bps(),
            "Vault deployed"
        );

        Ok(Self {
            address,
            token,
            shares: HashMap::new(),
            total_value_locked: 0,
            fee_rate: config.fee_rate,
            fee_recipient: deployer,
            ownable,
            pause_guard: PauseGuard::new(),
            events: Vec::new(),
        })
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Pull `amount` of the deposit token from `caller` and mint as many shares.
    ///
    /// The caller must have approved the vault for at least `amount`.
    /// Emits `Deposited(caller, amount, amount)` and returns the shares minted.
    pub fn deposit(&mut self, caller: Address, amount: Amount) -> Result<Amount, VaultError> {
        self.pause_guard.ensure_not_paused()?;
        if amount == 0 {
            debug!(%caller, "Rejected zero deposit");
            return Err(VaultError::ZeroAmount);
        }

        // Stage
        let balance = self
            .balance_of(&caller)
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        let tvl = self
            .total_value_locked
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;

        let vault = self.address;
        self.atomically(|token| token.transfer_from(vault, caller, vault, amount))
            .inspect_err(|err| warn!(%caller, amount, error = %err, "Deposit transfer failed"))?;

        // Commit
        self.shares.insert(caller, balance);
        self.total_value_locked = tvl;
        self.emit(VaultEvent::Deposited(Deposited {
            user: caller,
            usdc_amount: amount,
            shares: amount,
        }));

        info!(%caller, amount, tvl, "Deposit");
        Ok(amount)
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Burn `shares` from `caller`, paying `shares - fee` to the caller and
    /// `fee` to the fee recipient.
    ///
    /// Emits `Withdrawn(caller, shares, net)`.
    pub fn withdraw(&mut self, caller: Address, shares: Amount) -> Result<WithdrawalReceipt, VaultError> {
        self.pause_guard.ensure_not_paused()?;

        let available = self.balance_of(&caller);
        if available < shares {
            debug!(%caller, requested = shares, available, "Rejected withdrawal");
            return Err(VaultError::InsufficientBalance {
                requested: shares,
                available,
            });
        }

        // Stage
        let receipt = self.preview_withdraw(shares);
        let tvl = self
            .total_value_locked
            .checked_sub(shares)
            .ok_or(VaultError::Overflow)?;

        let vault = self.address;
        let recipient = self.fee_recipient;
        self.atomically(|token| {
            if receipt.net > 0 {
                token.transfer(vault, caller, receipt.net)?;
            }
            if receipt.fee > 0 {
                token.transfer(vault, recipient, receipt.fee)?;
            }
            Ok(())
        })
        .inspect_err(|err| warn!(%caller, shares, error = %err, "Withdrawal transfer failed"))?;

        // Commit
        self.shares.insert(caller, available - shares);
        self.total_value_locked = tvl;
        self.emit(VaultEvent::Withdrawn(Withdrawn {
            user: caller,
            shares,
            usdc_amount: receipt.net,
        }));

        info!(%caller, shares, net = receipt.net, fee = receipt.fee, tvl, "Withdrawal");
        Ok(receipt)
    }

    /// Fee split a withdrawal of `shares` would produce right now.
    pub fn preview_withdraw(&self, shares: Amount) -> WithdrawalReceipt {
        let (net, fee) = self.fee_rate.split(shares);
        WithdrawalReceipt { shares, net, fee }
    }

    // ───────────────────────── Administration ─────────────────────────

    /// Replace the fee recipient. Owner-only; the new recipient must be non-zero.
    pub fn set_fee_recipient(&mut self, caller: Address, new_recipient: Address) -> Result<(), VaultError> {
        self.ownable.ensure_owner(&caller)?;
        if new_recipient.is_zero() {
            return Err(VaultError::ZeroAddress);
        }

        let old_recipient = std::mem::replace(&mut self.fee_recipient, new_recipient);
        self.emit(VaultEvent::FeeRecipientUpdated(FeeRecipientUpdated {
            old_recipient,
            new_recipient,
        }));

        info!(old = %old_recipient, new = %new_recipient, "Fee recipient updated");
        Ok(())
    }

    /// Pause deposits and withdrawals. Owner-only; fails if already paused.
    pub fn pause(&mut self, caller: Address) -> Result<(), VaultError> {
        self.ownable.ensure_owner(&caller)?;
        self.pause_guard.pause()?;
        self.emit(VaultEvent::Paused(Paused { account: caller }));
        info!(%caller, "Vault paused");
        Ok(())
    }

    /// Resume deposits and withdrawals. Owner-only; fails if not paused.
    pub fn unpause(&mut self, caller: Address) -> Result<(), VaultError> {
        self.ownable.ensure_owner(&caller)?;
        self.pause_guard.unpause()?;
        self.emit(VaultEvent::Unpaused(Unpaused { account: caller }));
        info!(%caller, "Vault unpaused");
        Ok(())
    }

    /// Hand ownership to `new_owner`. The fee recipient is left unchanged.
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<(), VaultError> {
        let previous_owner = self.ownable.transfer_ownership(&caller, new_owner)?;
        self.emit(VaultEvent::OwnershipTransferred(OwnershipTransferred {
            previous_owner,
            new_owner,
        }));
        info!(previous = %previous_owner, new = %new_owner, "Ownership transferred");
        Ok(())
    }

    // ───────────────────────── Views ─────────────────────────

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.shares.get(account).copied().unwrap_or(0)
    }

    pub fn total_value_locked(&self) -> Amount {
        self.total_value_locked
    }

    pub fn fee_recipient(&self) -> Address {
        self.fee_recipient
    }

    pub fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    pub fn is_paused(&self) -> bool {
        self.pause_guard.is_paused()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The deposit token.
    pub fn token(&self) -> &T {
        &self.token
    }

    /// Direct access to the deposit token, for calls users make on the token
    /// itself (approvals, transfers between accounts).
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    /// True when the locked-value counter equals the sum of all share balances.
    pub fn is_consistent(&self) -> bool {
        let mut sum: Amount = 0;
        for balance in self.shares.values() {
            match sum.checked_add(*balance) {
                Some(next) => sum = next,
                None => return false,
            }
        }
        sum == self.total_value_locked
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[VaultEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<VaultEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internals ─────────────────────────

    fn emit(&mut self, event: VaultEvent) {
        debug!(event = event.name(), "Event emitted");
        self.events.push(event);
    }

    /// Run token calls all-or-nothing: on error the token is restored to its
    /// state before `f` ran.
    fn atomically<R>(
        &mut self,
        f: impl FnOnce(&mut T) -> Result<R, TokenError>,
    ) -> Result<R, VaultError> {
        let checkpoint = self.token.clone();
        match f(&mut self.token) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.token = checkpoint;
                Err(VaultError::TokenTransferFailed(err))
            }
        }
    }
}
