//! Fundamental types for the tokenpad platform.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: account addresses and token amounts.

pub mod address;
pub mod amount;

pub use address::{Address, AddressParseError};
pub use amount::Amount;
