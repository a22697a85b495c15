//! Account address type — a 20-byte identifier rendered as `0x…` hex.

use std::fmt;
use std::str::FromStr;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

type Blake2b256 = Blake2b<U32>;

/// Number of raw bytes in an address.
pub const ADDRESS_LEN: usize = 20;

/// A tokenpad account address.
///
/// The all-zero address is the null sentinel: it represents "no account"
/// and is used to model mint/burn as transfers to/from nowhere. It is
/// never a valid transfer endpoint or owner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

/// Error parsing an address from its hex form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address must start with 0x")]
    MissingPrefix,

    #[error("address must be {expected} hex characters, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("address contains invalid hex: {0}")]
    InvalidHex(String),
}

impl Address {
    /// The null sentinel address (all zero bytes).
    pub const NULL: Self = Self([0u8; ADDRESS_LEN]);

    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// True for the null sentinel.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// Derive a deployment address from the deployer and a nonce.
    ///
    /// First 20 bytes of Blake2b-256 over deployer bytes ‖ big-endian
    /// nonce. Deterministic: the same (deployer, nonce) pair always maps
    /// to the same address.
    pub fn derive(deployer: &Address, nonce: u64) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(deployer.as_bytes());
        hasher.update(nonce.to_be_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[..ADDRESS_LEN]);
        Self(bytes)
    }

    /// Render as a `0x`-prefixed lowercase hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressParseError::MissingPrefix)?;
        if stripped.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::BadLength {
                expected: ADDRESS_LEN * 2,
                actual: stripped.len(),
            });
        }
        let raw = hex::decode(stripped)
            .map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{}…)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// Addresses serialize as their hex form so they can key JSON maps.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AddressVisitor;

        impl Visitor<'_> for AddressVisitor {
            type Value = Address;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 0x-prefixed hex address")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Address, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(AddressVisitor)
    }
}
