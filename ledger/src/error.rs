use thiserror::Error;

use tokenpad_types::{Address, Amount};

/// Errors raised by ledger operations.
///
/// Every variant aborts the whole call: a failed operation leaves
/// balances, allowances, supply, and owner exactly as they were.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("caller {caller} is not the owner")]
    Unauthorized { caller: Address },

    #[error("the null address is not a valid target")]
    InvalidAddress,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    #[error("minting {amount} would overflow the total supply")]
    SupplyOverflow { amount: Amount },

    #[error("crediting {amount} would overflow the recipient balance")]
    BalanceOverflow { amount: Amount },
}
