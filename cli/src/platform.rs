//! Persisted platform state — the deployed components and their history.
//!
//! The state file plays the role of the chain: one CLI invocation loads
//! the snapshot, applies a single command, and persists the result only
//! if the command succeeded, so a failed call never leaves a partial
//! mutation behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use tokenpad_ledger::{TokenConfig, TokenLedger};
use tokenpad_registry::{ContractKind, DeploymentRecord, DeploymentRegistry};
use tokenpad_storage::ValueStore;
use tokenpad_types::{Address, Amount};

const STATE_FILE: &str = "platform.json";

/// Everything the platform persists between CLI invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Platform {
    /// Logical height, bumped once per mutating command. Deployment
    /// records carry the height at which they were created.
    height: u64,
    token: Option<TokenLedger>,
    store: Option<ValueStore>,
    registry: DeploymentRegistry,
}

impl Platform {
    /// Load the platform state from `data_dir`, or start fresh if no
    /// state file exists yet.
    pub fn load(data_dir: &Path) -> anyhow::Result<Self> {
        let path = Self::state_path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))
    }

    /// Persist the platform state under `data_dir`.
    pub fn save(&self, data_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("creating {}", data_dir.display()))?;
        let path = Self::state_path(data_dir);
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn state_path(data_dir: &Path) -> PathBuf {
        data_dir.join(STATE_FILE)
    }

    /// Bump the logical height for a mutating command and return it.
    pub fn advance(&mut self) -> u64 {
        self.height += 1;
        self.height
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    // ── Deployments ────────────────────────────────────────────────────

    /// Deploy the token ledger and register the deployment.
    pub fn deploy_token(
        &mut self,
        name: String,
        symbol: String,
        initial_supply: Amount,
        deployer: Address,
    ) -> anyhow::Result<DeploymentRecord> {
        if self.token.is_some() {
            bail!("a token ledger is already deployed");
        }
        let height = self.advance();
        let ledger = TokenLedger::deploy(TokenConfig {
            name,
            symbol,
            initial_supply,
            deployer,
        })?;
        let record = DeploymentRecord {
            address: Address::derive(&deployer, height),
            kind: ContractKind::Token,
            deployer,
            height,
        };
        self.registry.register(record.clone());
        self.token = Some(ledger);
        Ok(record)
    }

    /// Deploy the single-value store and register the deployment.
    pub fn deploy_store(&mut self, deployer: Address) -> anyhow::Result<DeploymentRecord> {
        if self.store.is_some() {
            bail!("a value store is already deployed");
        }
        if deployer.is_null() {
            bail!("the null address cannot deploy");
        }
        let height = self.advance();
        let record = DeploymentRecord {
            address: Address::derive(&deployer, height),
            kind: ContractKind::Storage,
            deployer,
            height,
        };
        self.registry.register(record.clone());
        self.store = Some(ValueStore::new());
        Ok(record)
    }

    // ── Component access ───────────────────────────────────────────────

    pub fn token(&self) -> anyhow::Result<&TokenLedger> {
        self.token.as_ref().context("no token ledger deployed yet")
    }

    pub fn token_mut(&mut self) -> anyhow::Result<&mut TokenLedger> {
        self.token.as_mut().context("no token ledger deployed yet")
    }

    pub fn store(&self) -> anyhow::Result<&ValueStore> {
        self.store.as_ref().context("no value store deployed yet")
    }

    pub fn store_mut(&mut self) -> anyhow::Result<&mut ValueStore> {
        self.store.as_mut().context("no value store deployed yet")
    }

    pub fn registry(&self) -> &DeploymentRegistry {
        &self.registry
    }
}
