//! Single-owner administrative guard.
//!
//! Holds the one address with the right to mint and to reassign
//! ownership. Exactly one owner exists at any time; the owner is never
//! the null address after construction.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use tokenpad_types::Address;

/// Authorizes or rejects privileged calls against the current owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OwnershipGuard {
    owner: Address,
}

impl OwnershipGuard {
    /// Create a guard with the given initial owner.
    ///
    /// The null address cannot own the ledger.
    pub fn new(owner: Address) -> Result<Self, LedgerError> {
        if owner.is_null() {
            return Err(LedgerError::InvalidAddress);
        }
        Ok(Self { owner })
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Check that `caller` is the current owner.
    ///
    /// Invoked at the top of every privileged operation.
    pub fn require_owner(&self, caller: &Address) -> Result<(), LedgerError> {
        if caller != &self.owner {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Hand ownership to `new_owner`. Only the current owner may do this,
    /// and the target must not be null. Returns the previous owner.
    ///
    /// This is the only way the owner ever changes; there is no
    /// renouncement path.
    pub fn transfer(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<Address, LedgerError> {
        self.require_owner(caller)?;
        if new_owner.is_null() {
            return Err(LedgerError::InvalidAddress);
        }
        let previous = std::mem::replace(&mut self.owner, new_owner);
        Ok(previous)
    }
}
