//! The token ledger — balances, total supply, and the mutating operations.
//!
//! All state lives in one owned structure; every operation receives the
//! caller's identity explicitly and takes the ledger by exclusive
//! reference. Validation strictly precedes mutation, so a failed call
//! leaves balances, allowances, supply, and owner exactly as they were.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::allowance::AllowanceRegistry;
use crate::error::LedgerError;
use crate::notification::{Notification, NotificationLog};
use crate::ownership::OwnershipGuard;
use tokenpad_types::{Address, Amount};

/// Fixed decimal places for every tokenpad token.
pub const DECIMALS: u8 = 18;

/// Immutable descriptive metadata fixed at deployment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Configuration for deploying a token ledger.
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    /// Credited to the deployer at construction.
    pub initial_supply: Amount,
    /// Becomes the initial owner. Must not be the null address.
    pub deployer: Address,
}

/// The fungible-value ledger with single-owner administrative gating.
///
/// Invariants held before and after every call:
/// - the total supply equals the sum of all balances,
/// - no balance or allowance is ever negative (unsigned by construction),
/// - the owner is never the null address,
/// - only the current owner may mint or reassign ownership.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    metadata: TokenMetadata,
    guard: OwnershipGuard,
    allowances: AllowanceRegistry,
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
    log: NotificationLog,
}

impl TokenLedger {
    /// Deploy a new ledger: the initial supply is credited to the
    /// deployer and the deployer becomes the owner.
    pub fn deploy(config: TokenConfig) -> Result<Self, LedgerError> {
        let guard = OwnershipGuard::new(config.deployer)?;
        let mut balances = HashMap::new();
        if !config.initial_supply.is_zero() {
            balances.insert(config.deployer, config.initial_supply);
        }
        let mut log = NotificationLog::new();
        log.record(Notification::Transfer {
            from: Address::NULL,
            to: config.deployer,
            amount: config.initial_supply,
        });
        Ok(Self {
            metadata: TokenMetadata {
                name: config.name,
                symbol: config.symbol,
                decimals: DECIMALS,
            },
            guard,
            allowances: AllowanceRegistry::new(),
            balances,
            total_supply: config.initial_supply,
            log,
        })
    }

    // ── Read surface ───────────────────────────────────────────────────

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn owner(&self) -> &Address {
        self.guard.owner()
    }

    /// Balance of `address`; zero for accounts never credited. A zeroed
    /// balance is a valid, persistent state — accounts are never deleted.
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.balances.get(address).copied().unwrap_or(Amount::ZERO)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.allowance(owner, spender)
    }

    /// The notifications emitted by every successful operation so far.
    pub fn notifications(&self) -> &NotificationLog {
        &self.log
    }

    // ── Mutating operations ────────────────────────────────────────────

    /// Move `amount` from the caller to `to`.
    ///
    /// A zero-amount transfer succeeds, changes no balances, and still
    /// emits a notification.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.prepare_transfer(caller, to, amount)?;
        self.apply_transfer(caller, to, amount);
        self.log.record(Notification::Transfer {
            from: *caller,
            to: *to,
            amount,
        });
        Ok(())
    }

    /// Set `spender`'s limit over the caller's balance to exactly
    /// `amount`, replacing any prior limit.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if caller.is_null() {
            return Err(LedgerError::InvalidAddress);
        }
        self.allowances.approve(*caller, *spender, amount);
        self.log.record(Notification::Approval {
            owner: *caller,
            spender: *spender,
            amount,
        });
        Ok(())
    }

    /// Move `amount` from `from` to `to` on the strength of an allowance
    /// granted to the caller.
    ///
    /// The allowance check runs first, then the same validation as
    /// [`transfer`](Self::transfer); only once everything passes is the
    /// allowance debited and the balances moved.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.allowances.check(from, caller, amount)?;
        self.prepare_transfer(from, to, amount)?;
        self.allowances.debit(from, caller, amount);
        self.apply_transfer(from, to, amount);
        self.log.record(Notification::Transfer {
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }

    /// Create `amount` new units and credit them to `to`. Owner-only.
    pub fn mint(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.guard.require_owner(caller)?;
        if to.is_null() {
            return Err(LedgerError::InvalidAddress);
        }
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow { amount })?;
        // A single balance is bounded by the total supply, so this credit
        // cannot overflow once the supply addition succeeded.
        let credited = self.balance_of(to) + amount;
        self.balances.insert(*to, credited);
        self.log.record(Notification::Transfer {
            from: Address::NULL,
            to: *to,
            amount,
        });
        Ok(())
    }

    /// Destroy `amount` units from the caller's own balance. No
    /// ownership gate — any account may burn what it holds.
    pub fn burn(&mut self, caller: &Address, amount: Amount) -> Result<(), LedgerError> {
        if caller.is_null() {
            return Err(LedgerError::InvalidAddress);
        }
        let available = self.balance_of(caller);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        // The guard above rules out underflow; the supply is the sum of
        // all balances, so it covers the caller's balance as well.
        self.balances.insert(*caller, available - amount);
        self.total_supply = self.total_supply - amount;
        self.log.record(Notification::Transfer {
            from: *caller,
            to: Address::NULL,
            amount,
        });
        Ok(())
    }

    /// Hand ownership to `new_owner`. Owner-only; the target must not be
    /// the null address.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), LedgerError> {
        let previous = self.guard.transfer(caller, new_owner)?;
        self.log.record(Notification::OwnershipChanged {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Validate a balance move without touching any state.
    fn prepare_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if from.is_null() || to.is_null() {
            return Err(LedgerError::InvalidAddress);
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        // The credit is checked against the post-debit balance so a
        // self-transfer of a large balance cannot trip it.
        let target = if to == from {
            available - amount
        } else {
            self.balance_of(to)
        };
        target
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { amount })?;
        Ok(())
    }

    /// Apply a balance move proven valid by [`prepare_transfer`].
    fn apply_transfer(&mut self, from: &Address, to: &Address, amount: Amount) {
        let debited = self.balance_of(from) - amount;
        self.balances.insert(*from, debited);
        // Reads the post-debit balance, so from == to nets out to zero.
        let credited = self.balance_of(to) + amount;
        self.balances.insert(*to, credited);
    }
}
