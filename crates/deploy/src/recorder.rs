//! Where completed deployments are written.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{ChainId, DeploymentResult, L2DeploymentConfig, config::chain_id_serde};

/// A completed deployment with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    #[serde(flatten)]
    pub result: DeploymentResult,
    #[serde(with = "chain_id_serde")]
    pub l1_chain_id: ChainId,
    #[serde(with = "chain_id_serde")]
    pub l2_chain_id: ChainId,
    /// Hash of the configuration the run was made from.
    pub config_hash: String,
    /// Unix timestamp of the record.
    pub recorded_at: i64,
}

impl DeploymentRecord {
    pub fn new(config: &L2DeploymentConfig, result: DeploymentResult) -> Result<Self> {
        Ok(Self {
            result,
            l1_chain_id: config.l1_chain_id,
            l2_chain_id: config.l2_chain_id,
            config_hash: config.config_hash()?,
            recorded_at: chrono::Utc::now().timestamp(),
        })
    }
}

/// Sink for completed deployments.
pub trait DeploymentRecorder: Send + Sync {
    fn record(&self, record: &DeploymentRecord) -> Result<()>;
}

/// Records kept in memory.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    records: Mutex<Vec<DeploymentRecord>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<DeploymentRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl DeploymentRecorder for MemoryRecorder {
    fn record(&self, record: &DeploymentRecord) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory recorder lock poisoned"))?
            .push(record.clone());
        Ok(())
    }
}

/// Records merged into a JSON file, keyed by L2 chain id.
///
/// Every run is appended to the list of its chain; earlier runs are kept.
#[derive(Debug)]
pub struct JsonFileRecorder {
    path: PathBuf,
    lock: Mutex<()>,
}

/// On-disk layout of a [`JsonFileRecorder`] file.
pub type RecordFile = BTreeMap<String, Vec<DeploymentRecord>>;

impl JsonFileRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in the file. A missing file has none.
    pub fn load(&self) -> Result<RecordFile> {
        if !self.path.exists() {
            return Ok(RecordFile::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read records file: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse records file: {}", self.path.display()))
    }
}

impl DeploymentRecorder for JsonFileRecorder {
    fn record(&self, record: &DeploymentRecord) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("records file lock poisoned"))?;

        let mut records = self.load()?;
        records
            .entry(record.l2_chain_id.to_string())
            .or_default()
            .push(record.clone());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(&records).context("Failed to serialize records")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write records file: {}", self.path.display()))?;

        tracing::info!(
            path = %self.path.display(),
            l2_chain_id = %record.l2_chain_id,
            "Deployment recorded"
        );
        Ok(())
    }
}
