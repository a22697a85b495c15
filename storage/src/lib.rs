//! Trivial single-value store — one integer, readable and writable by
//! anyone. A demo collaborator with no invariants of its own.

use serde::{Deserialize, Serialize};

/// Holds a single integer value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValueStore {
    value: u64,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    /// Replace the stored value, returning the previous one.
    pub fn set(&mut self, value: u64) -> u64 {
        std::mem::replace(&mut self.value, value)
    }
}
