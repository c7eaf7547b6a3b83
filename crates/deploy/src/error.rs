//! Error types for parameter resolution, chain calls and deployment runs.

use alloy_core::primitives::{Address, B256};

use crate::{ChainId, client::Contract, orchestrator::Step};

/// A fixed lookup table has no entry for the given chain id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unrecognized chain id {0}: no known infrastructure addresses")]
    UnrecognizedChainId(ChainId),
}

/// Constructor parameters could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("chain {0} routes messages through a messenger proxy, but none was deployed")]
    MissingMessengerProxy(ChainId),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A call to the chain client failed.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("transaction {0} reverted")]
    Reverted(B256),
    #[error("deployment transaction {0} has no contract address in its receipt")]
    MissingContractAddress(B256),
    #[error("no contract code at {0}")]
    NoCode(Address),
    #[error("artifact error for {contract}: {reason}")]
    Artifact { contract: String, reason: String },
    #[error("ABI encoding error: {0}")]
    Abi(String),
    #[error("failed to decode call result: {0}")]
    Decode(String),
    #[error("timed out waiting for transaction {0}")]
    Timeout(B256),
}

/// A deployment run stopped at `step`.
///
/// There is no rollback: whatever was confirmed before the failing step stays
/// on chain, and recovery is a fresh run.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("{step}: {source}")]
    UnrecognizedChainId {
        step: Step,
        #[source]
        source: RegistryError,
    },
    #[error("{step}: failed to attach {contract} at {address}: {source}")]
    AttachmentFailure {
        step: Step,
        contract: Contract,
        address: Address,
        #[source]
        source: ChainError,
    },
    #[error("{step}: chain call failed: {source}")]
    ChainCallFailure {
        step: Step,
        #[source]
        source: ChainError,
    },
    #[error("{step}: need at least {needed} signers, client has {available}")]
    InsufficientSigners {
        step: Step,
        needed: usize,
        available: usize,
    },
    #[error("{step}: {source}")]
    Resolve {
        step: Step,
        #[source]
        source: ResolveError,
    },
    #[error("{step}: no messenger wrapper exists for chain {chain_id}")]
    UnsupportedFamily { step: Step, chain_id: ChainId },
    #[error("{step}: failed to record deployment: {source}")]
    Record {
        step: Step,
        #[source]
        source: anyhow::Error,
    },
}

impl DeployError {
    /// The step the run failed at.
    pub fn step(&self) -> Step {
        match self {
            Self::UnrecognizedChainId { step, .. }
            | Self::AttachmentFailure { step, .. }
            | Self::ChainCallFailure { step, .. }
            | Self::InsufficientSigners { step, .. }
            | Self::Resolve { step, .. }
            | Self::UnsupportedFamily { step, .. }
            | Self::Record { step, .. } => *step,
        }
    }

    pub(crate) fn chain(step: Step) -> impl FnOnce(ChainError) -> Self {
        move |source| Self::ChainCallFailure { step, source }
    }

    pub(crate) fn resolve(step: Step) -> impl FnOnce(ResolveError) -> Self {
        move |source| match source {
            ResolveError::Registry(source) => Self::UnrecognizedChainId { step, source },
            source => Self::Resolve { step, source },
        }
    }
}
