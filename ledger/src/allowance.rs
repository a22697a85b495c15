//! Per-owner, per-spender spending limits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use tokenpad_types::{Address, Amount};

/// Spending limits keyed owner → spender. Independent of balances but
/// consumed by delegated transfers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AllowanceRegistry {
    limits: HashMap<Address, HashMap<Address, Amount>>,
}

impl AllowanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `spender`'s limit over `owner`'s balance to exactly `amount`.
    ///
    /// Each approval overwrites the prior limit, it never accumulates.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.limits.entry(owner).or_default().insert(spender, amount);
    }

    /// Current limit for (owner, spender); zero when none was granted.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.limits
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Check that (owner, spender) covers `amount`.
    pub fn check(
        &self,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(owner, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Decrement (owner, spender) by `amount`.
    ///
    /// Callers must have run [`check`](Self::check) first; the prior
    /// comparison rules out underflow, so this subtracts directly.
    pub fn debit(&mut self, owner: &Address, spender: &Address, amount: Amount) {
        if let Some(limit) = self
            .limits
            .get_mut(owner)
            .and_then(|spenders| spenders.get_mut(spender))
        {
            *limit = *limit - amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn allowance_defaults_to_zero() {
        let registry = AllowanceRegistry::new();
        assert_eq!(registry.allowance(&addr(1), &addr(2)), Amount::ZERO);
    }

    #[test]
    fn approve_overwrites_instead_of_accumulating() {
        let mut registry = AllowanceRegistry::new();
        registry.approve(addr(1), addr(2), Amount::new(100));
        registry.approve(addr(1), addr(2), Amount::new(40));
        assert_eq!(registry.allowance(&addr(1), &addr(2)), Amount::new(40));
    }

    #[test]
    fn check_reports_needed_and_available() {
        let mut registry = AllowanceRegistry::new();
        registry.approve(addr(1), addr(2), Amount::new(50));
        let err = registry
            .check(&addr(1), &addr(2), Amount::new(80))
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientAllowance {
                needed: Amount::new(80),
                available: Amount::new(50),
            }
        );
    }

    #[test]
    fn debit_exact_limit_leaves_zero() {
        let mut registry = AllowanceRegistry::new();
        registry.approve(addr(1), addr(2), Amount::new(50));
        registry.check(&addr(1), &addr(2), Amount::new(50)).unwrap();
        registry.debit(&addr(1), &addr(2), Amount::new(50));
        assert_eq!(registry.allowance(&addr(1), &addr(2)), Amount::ZERO);
    }

    #[test]
    fn limits_are_per_spender() {
        let mut registry = AllowanceRegistry::new();
        registry.approve(addr(1), addr(2), Amount::new(10));
        registry.approve(addr(1), addr(3), Amount::new(20));
        assert_eq!(registry.allowance(&addr(1), &addr(2)), Amount::new(10));
        assert_eq!(registry.allowance(&addr(1), &addr(3)), Amount::new(20));
        assert_eq!(registry.allowance(&addr(2), &addr(1)), Amount::ZERO);
    }
}
