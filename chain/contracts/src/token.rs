//! Deposit token interface
//!
//! The vault never touches token balances directly: it pulls deposits with
//! `transfer_from` and pays out with `transfer`, and treats any error as a
//! failed transfer. `MockUsdc` is an in-memory 6-decimal stablecoin used by
//! tests and local setups.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use types::ids::Address;
use types::numeric::{Amount, USDC_DECIMALS};

use crate::errors::TokenError;

/// Fungible token semantics required by the vault.
///
/// The acting account is always an explicit argument. Each method either
/// applies all of its effects or none of them.
pub trait FungibleToken {
    /// Display precision. Never used by vault arithmetic.
    fn decimals(&self) -> u8;

    fn total_supply(&self) -> Amount;

    fn balance_of(&self, account: &Address) -> Amount;

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Set `spender`'s allowance over `owner`'s balance.
    fn approve(&mut self, owner: Address, spender: Address, amount: Amount) -> Result<(), TokenError>;

    /// Move `amount` from `from` (the caller) to `to`.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming allowance.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;
}

/// In-memory USDC-style token.
///
/// Anyone may mint. An allowance of `Amount::MAX` is treated as infinite and
/// is not decremented. Frozen accounts can neither send nor receive.
#[derive(Debug, Clone, Default)]
pub struct MockUsdc {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    frozen: HashSet<Address>,
    total_supply: Amount,
}

impl MockUsdc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` new tokens for `to`.
    pub fn mint(&mut self, to: Address, amount: Amount) -> Result<(), TokenError> {
        if to.is_zero() {
            return Err(TokenError::InvalidReceiver);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::SupplyOverflow)?;

        self.total_supply = supply;
        // Cannot overflow: every balance is bounded by total supply.
        *self.balances.entry(to).or_insert(0) += amount;
        debug!(%to, amount, "minted");
        Ok(())
    }

    /// Reject all transfers touching `account` until unfrozen.
    pub fn freeze(&mut self, account: Address) {
        self.frozen.insert(account);
    }

    pub fn unfreeze(&mut self, account: &Address) {
        self.frozen.remove(account);
    }

    pub fn is_frozen(&self, account: &Address) -> bool {
        self.frozen.contains(account)
    }

    fn check_transfer(&self, from: &Address, to: &Address, amount: Amount) -> Result<(), TokenError> {
        if to.is_zero() {
            return Err(TokenError::InvalidReceiver);
        }
        for account in [from, to] {
            if self.is_frozen(account) {
                return Err(TokenError::Rejected {
                    reason: format!("account {} is frozen", account),
                });
            }
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    fn apply_transfer(&mut self, from: Address, to: Address, amount: Amount) {
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance -= amount;
        }
        *self.balances.entry(to).or_insert(0) += amount;
    }
}

impl FungibleToken for MockUsdc {
    fn decimals(&self) -> u8 {
        USDC_DECIMALS
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: Amount) -> Result<(), TokenError> {
        if spender.is_zero() {
            return Err(TokenError::InvalidReceiver);
        }
        self.allowances.insert((owner, spender), amount);
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        self.check_transfer(&from, &to, amount)?;
        self.apply_transfer(from, to, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance {
                needed: amount,
                allowed,
            });
        }
        self.check_transfer(&from, &to, amount)?;

        if allowed != Amount::MAX {
            self.allowances.insert((from, spender), allowed - amount);
        }
        self.apply_transfer(from, to, amount);
        Ok(())
    }
}
