//! Token ledger core for the tokenpad platform.
//!
//! Balance and allowance accounting, mint/burn/transfer state
//! transitions, and the single-owner guard that gates administrative
//! operations. Every call is a single atomic transition from one
//! consistent snapshot to the next.

pub mod allowance;
pub mod error;
pub mod ledger;
pub mod notification;
pub mod ownership;

pub use allowance::AllowanceRegistry;
pub use error::LedgerError;
pub use ledger::{TokenConfig, TokenLedger, TokenMetadata, DECIMALS};
pub use notification::{Notification, NotificationLog};
pub use ownership::OwnershipGuard;
