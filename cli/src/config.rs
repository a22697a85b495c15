//! CLI configuration with TOML file support.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use tokenpad_types::Address;

/// Optional settings loaded from a TOML file. File settings are the
/// base; CLI flags and env vars override them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Directory holding the persisted platform state.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Acting account used when no `--caller` flag is given.
    #[serde(default)]
    pub default_caller: Option<Address>,
}

impl PlatformConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
