//! Deployment configuration.
//!
//! A [`DeploymentConfig`] file describes how to reach the chains and what to
//! deploy. It is read from TOML and any field can be overridden with a
//! `BRIDGEUP_`-prefixed environment variable, nested keys separated by `__`
//! (for example `BRIDGEUP_L2__L2_CHAIN_ID=137`).

use std::path::{Path, PathBuf};

use alloy_core::primitives::Address;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::{ChainId, client::ReceiptPolling};

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "BRIDGEUP_";

/// Default file deployment records are merged into.
pub const DEFAULT_RECORD_FILE: &str = "deployments.json";

/// Name, symbol and decimals of a token to deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Name and symbol of the swap's LP token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpTokenConfig {
    pub name: String,
    pub symbol: String,
}

/// Inputs of one L2 deployment run. Read once when the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2DeploymentConfig {
    #[serde(with = "chain_id_serde")]
    pub l1_chain_id: ChainId,
    #[serde(with = "chain_id_serde")]
    pub l2_chain_id: ChainId,
    pub l1_bridge: Address,
    /// The base-chain messenger wrapper the messenger proxy tunnels to.
    pub l1_messenger_wrapper: Address,
    pub l2_canonical_token: Address,
    pub l2_messenger: Address,
    pub bridge_token: TokenConfig,
    pub lp_token: LpTokenConfig,
    /// Force explicit gas limits on or off. Derived from the chain id when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_gas_override: Option<bool>,
}

impl L2DeploymentConfig {
    /// SHA-256 of the configuration, hex-encoded.
    ///
    /// Stored with each record so runs made from the same inputs can be told
    /// apart from runs made from different ones.
    pub fn config_hash(&self) -> Result<String> {
        let json = serde_json::to_string(self).context("Failed to serialize deployment config")?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Inputs of a base-chain messenger wrapper deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperDeploymentConfig {
    /// The target chain the wrapper relays messages to.
    #[serde(with = "chain_id_serde")]
    pub l2_chain_id: ChainId,
    pub l1_bridge: Address,
    pub l2_bridge: Address,
    pub l1_messenger: Address,
}

/// A full configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// JSON-RPC endpoint of the target network.
    pub l2_rpc_url: Url,
    /// JSON-RPC endpoint of the base chain, for wrapper deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_rpc_url: Option<Url>,
    /// Hardhat `artifacts/` directory.
    pub artifacts: PathBuf,
    #[serde(default = "default_record_file")]
    pub output: PathBuf,
    #[serde(default)]
    pub polling: ReceiptPolling,
    pub l2: L2DeploymentConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<WrapperDeploymentConfig>,
}

fn default_record_file() -> PathBuf {
    PathBuf::from(DEFAULT_RECORD_FILE)
}

impl DeploymentConfig {
    /// Load a configuration file, applying environment overrides on top.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Save the configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize deployment config to TOML")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}

/// Chain ids as plain integers, or as decimal/`0x` strings for ids too large
/// for the format.
pub(crate) mod chain_id_serde {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::ChainId;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u64),
        Str(String),
    }

    pub fn serialize<S: Serializer>(id: &ChainId, serializer: S) -> Result<S::Ok, S::Error> {
        match u64::try_from(*id) {
            Ok(id) if i64::try_from(id).is_ok() => serializer.serialize_u64(id),
            _ => serializer.serialize_str(&id.to_string()),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ChainId, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Int(id) => Ok(ChainId::from(id)),
            Repr::Str(id) => ChainId::from_str(id.trim())
                .map_err(|e| D::Error::custom(format!("invalid chain id {id:?}: {e}"))),
        }
    }
}
