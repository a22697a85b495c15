//! Append-only registry of platform deployments.
//!
//! Records `(address, kind, deployer, height)` tuples for every component
//! deployed on the platform. Append-and-count only: nothing is ever
//! updated or deleted, and the ledger core neither calls nor is called by
//! this registry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tokenpad_types::Address;

/// The kinds of component the platform can deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractKind {
    /// A token ledger.
    Token,
    /// A single-value store.
    Storage,
}

impl ContractKind {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Storage => "storage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "token" => Some(Self::Token),
            "storage" => Some(Self::Storage),
            _ => None,
        }
    }
}

/// One deployment, as recorded at deploy time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Address assigned to the deployed component.
    pub address: Address,
    pub kind: ContractKind,
    pub deployer: Address,
    /// Platform height at which the deployment happened.
    pub height: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry index {index} out of range, {total} records")]
    IndexOutOfRange { index: u64, total: u64 },
}

/// The append-only deployment registry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeploymentRegistry {
    records: Vec<DeploymentRecord>,
}

impl DeploymentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its index.
    pub fn register(&mut self, record: DeploymentRecord) -> u64 {
        self.records.push(record);
        self.records.len() as u64 - 1
    }

    /// Fetch the record at `index`.
    ///
    /// The one read that can fail in the platform: an out-of-range index
    /// is reported, not clamped.
    pub fn get(&self, index: u64) -> Result<&DeploymentRecord, RegistryError> {
        self.records
            .get(index as usize)
            .ok_or(RegistryError::IndexOutOfRange {
                index,
                total: self.total(),
            })
    }

    /// Number of records registered so far.
    pub fn total(&self) -> u64 {
        self.records.len() as u64
    }

    /// All records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DeploymentRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn record(n: u8, kind: ContractKind, height: u64) -> DeploymentRecord {
        DeploymentRecord {
            address: Address::derive(&addr(n), height),
            kind,
            deployer: addr(n),
            height,
        }
    }

    #[test]
    fn register_returns_sequential_indices() {
        let mut registry = DeploymentRegistry::new();
        assert_eq!(registry.register(record(1, ContractKind::Token, 1)), 0);
        assert_eq!(registry.register(record(1, ContractKind::Storage, 2)), 1);
        assert_eq!(registry.total(), 2);
    }

    #[test]
    fn get_returns_what_was_registered() {
        let mut registry = DeploymentRegistry::new();
        let rec = record(3, ContractKind::Token, 7);
        registry.register(rec.clone());

        assert_eq!(registry.get(0).unwrap(), &rec);
    }

    #[test]
    fn get_out_of_range_is_an_error() {
        let mut registry = DeploymentRegistry::new();
        registry.register(record(1, ContractKind::Token, 1));

        let err = registry.get(5).unwrap_err();
        assert_eq!(err, RegistryError::IndexOutOfRange { index: 5, total: 1 });
    }

    #[test]
    fn kind_parse_roundtrip() {
        for kind in [ContractKind::Token, ContractKind::Storage] {
            assert_eq!(ContractKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ContractKind::parse("registry"), None);
    }

    #[test]
    fn json_roundtrip() {
        let mut registry = DeploymentRegistry::new();
        registry.register(record(1, ContractKind::Token, 1));
        registry.register(record(2, ContractKind::Storage, 4));

        let encoded = serde_json::to_string(&registry).unwrap();
        let decoded: DeploymentRegistry = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.total(), 2);
        assert_eq!(decoded.get(1).unwrap(), registry.get(1).unwrap());
    }
}
