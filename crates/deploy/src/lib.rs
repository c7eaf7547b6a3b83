//! bridgeup-deploy - Deployment library for cross-chain bridge contracts.
//!
//! This crate resolves per-network constructor parameters and drives the
//! deployment of a bridge stack (bridge token, swap, bridge, AMM wrapper and
//! optional messenger proxy) onto a target network.

pub mod chain;
pub use chain::{BaseNetwork, ChainId, NetworkFamily, classify};

pub mod client;
pub use client::{ArtifactStore, ChainClient, JsonRpcChainClient, ReceiptPolling};

mod config;
pub use config::{
    DEFAULT_RECORD_FILE, DeploymentConfig, ENV_PREFIX, L2DeploymentConfig, LpTokenConfig,
    TokenConfig, WrapperDeploymentConfig,
};

pub mod constants;

mod error;
pub use error::{ChainError, DeployError, RegistryError, ResolveError};

pub mod gas;
pub use gas::{GasOverrides, GasPolicy, needs_explicit_gas_override};

pub mod orchestrator;
pub use orchestrator::{DeploymentResult, Step, deploy_all, deploy_l2};

mod params;
pub use params::{
    BridgeShape, ConstructorArg, DeploymentParameters, L2BridgeConfig, MessengerWrapperConfig,
    ParameterStrategy, WrapperShape, resolve_l2_bridge_parameters,
    resolve_messenger_wrapper_parameters,
};

pub mod recorder;
pub use recorder::{DeploymentRecord, DeploymentRecorder, JsonFileRecorder, MemoryRecorder};

pub mod registry;
pub use registry::{EndpointRole, lookup_bridge_endpoint};

mod wrapper;
pub use wrapper::deploy_messenger_wrapper;
