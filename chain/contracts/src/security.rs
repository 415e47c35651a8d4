//! Shared security primitives for the vault
//!
//! Ownership and pause state live here so that authorization and
//! pause-enforcement are checked the same way by every operation.
//!
//! There is no re-entrancy guard: every mutating vault operation takes
//! `&mut self` and the vault owns its token, so a token cannot call back
//! into a vault that is mid-operation.

use types::ids::Address;

use crate::errors::VaultError;

/// Single-owner access control.
///
/// The owner is the only caller allowed to run administrative operations
/// (fee recipient, pause, ownership transfer).
#[derive(Debug, Clone)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    /// Create access control with an initial owner. The owner must be non-zero.
    pub fn new(owner: Address) -> Result<Self, VaultError> {
        if owner.is_zero() {
            return Err(VaultError::ZeroAddress);
        }
        Ok(Self { owner })
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        self.owner == *caller
    }

    /// Reject any caller other than the owner.
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), VaultError> {
        if !self.is_owner(caller) {
            return Err(VaultError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Hand ownership to `new_owner`. Returns the previous owner.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<Address, VaultError> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(VaultError::ZeroAddress);
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}

/// Composable pause modifier.
///
/// When paused, protected operations must be rejected. Pausing twice or
/// unpausing an active contract is an error rather than a no-op.
#[derive(Debug, Clone, Default)]
pub struct PauseGuard {
    paused: bool,
}

impl PauseGuard {
    /// Create a new unpaused guard.
    pub fn new() -> Self {
        Self { paused: false }
    }

    pub fn pause(&mut self) -> Result<(), VaultError> {
        if self.paused {
            return Err(VaultError::InvalidState { paused: true });
        }
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<(), VaultError> {
        if !self.paused {
            return Err(VaultError::InvalidState { paused: false });
        }
        self.paused = false;
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Gate for operations that must not run while paused.
    pub fn ensure_not_paused(&self) -> Result<(), VaultError> {
        if self.paused {
            return Err(VaultError::EnforcedPause);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Ownable tests ---

    #[test]
    fn test_ownable_owner() {
        let alice = Address::from_seed("alice");
        let ownable = Ownable::new(alice).unwrap();
        assert!(ownable.is_owner(&alice));
        assert!(!ownable.is_owner(&Address::from_seed("bob")));
        assert_eq!(ownable.owner(), alice);
    }

    #[test]
    fn test_ownable_rejects_zero_owner() {
        assert_eq!(Ownable::new(Address::ZERO).unwrap_err(), VaultError::ZeroAddress);
    }

    #[test]
    fn test_ensure_owner_unauthorized() {
        let ownable = Ownable::new(Address::from_seed("alice")).unwrap();
        let eve = Address::from_seed("eve");
        assert_eq!(
            ownable.ensure_owner(&eve),
            Err(VaultError::Unauthorized { caller: eve })
        );
    }

    #[test]
    fn test_transfer_ownership() {
        let alice = Address::from_seed("alice");
        let bob = Address::from_seed("bob");
        let mut ownable = Ownable::new(alice).unwrap();

        assert_eq!(ownable.transfer_ownership(&alice, bob), Ok(alice));
        assert!(ownable.is_owner(&bob));
        assert!(!ownable.is_owner(&alice));
    }

    #[test]
    fn test_transfer_ownership_guards() {
        let alice = Address::from_seed("alice");
        let eve = Address::from_seed("eve");
        let mut ownable = Ownable::new(alice).unwrap();

        assert_eq!(
            ownable.transfer_ownership(&eve, eve),
            Err(VaultError::Unauthorized { caller: eve })
        );
        assert_eq!(
            ownable.transfer_ownership(&alice, Address::ZERO),
            Err(VaultError::ZeroAddress)
        );
        assert_eq!(ownable.owner(), alice);
    }

    // --- PauseGuard tests ---

    #[test]
    fn test_pause_guard() {
        let mut pg = PauseGuard::new();
        assert!(!pg.is_paused());
        assert!(pg.ensure_not_paused().is_ok());

        pg.pause().unwrap();
        assert!(pg.is_paused());
        assert_eq!(pg.ensure_not_paused(), Err(VaultError::EnforcedPause));

        pg.unpause().unwrap();
        assert!(!pg.is_paused());
    }

    #[test]
    fn test_pause_twice_fails() {
        let mut pg = PauseGuard::new();
        pg.pause().unwrap();
        assert_eq!(pg.pause(), Err(VaultError::InvalidState { paused: true }));
        assert!(pg.is_paused());
    }

    #[test]
    fn test_unpause_active_fails() {
        let mut pg = PauseGuard::new();
        assert_eq!(pg.unpause(), Err(VaultError::InvalidState { paused: false }));
    }
}
