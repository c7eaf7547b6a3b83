use std::path::PathBuf;

use alloy_core::primitives::Address;
use bridgeup_deploy::ChainId;
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "bridgeup")]
#[command(
    author,
    version,
    about = "Deploy cross-chain bridge contracts onto rollups and sidechains"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "BRIDGEUP_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy the bridge token, swap, bridge and AMM wrapper onto a target network.
    Deploy(DeployArgs),
    /// Deploy the base-chain messenger wrapper for a target network.
    Wrapper(WrapperArgs),
    /// Show how a target network would be deployed, without touching any chain.
    Plan(PlanArgs),
    /// List the known bridge infrastructure endpoints.
    Endpoints(EndpointsArgs),
}

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Path to the deployment configuration file.
    #[arg(short, long, alias = "conf", env = "BRIDGEUP_CONFIG", default_value = "bridgeup.toml")]
    pub config: PathBuf,

    /// Override the RPC endpoint from the configuration file.
    #[arg(long, alias = "rpc")]
    pub rpc_url: Option<Url>,

    /// Override the records file from the configuration file.
    #[arg(short, long, env = "BRIDGEUP_OUTPUT")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct WrapperArgs {
    /// Path to the deployment configuration file.
    #[arg(short, long, alias = "conf", env = "BRIDGEUP_CONFIG", default_value = "bridgeup.toml")]
    pub config: PathBuf,

    /// Override the base chain RPC endpoint from the configuration file.
    #[arg(long, alias = "rpc")]
    pub rpc_url: Option<Url>,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// The base chain id.
    #[arg(long, alias = "l1", env = "BRIDGEUP_L1_CHAIN_ID", default_value = "1")]
    pub l1_chain_id: ChainId,

    /// The target chain id.
    #[arg(long, alias = "l2", env = "BRIDGEUP_L2_CHAIN_ID")]
    pub l2_chain_id: ChainId,

    /// Base-chain bridge address used in the resolved wrapper arguments.
    #[arg(long, default_value_t = Address::ZERO)]
    pub l1_bridge: Address,

    /// Target-chain bridge address used in the resolved wrapper arguments.
    #[arg(long, default_value_t = Address::ZERO)]
    pub l2_bridge: Address,

    /// Base-chain messenger address used in the resolved wrapper arguments.
    #[arg(long, default_value_t = Address::ZERO)]
    pub l1_messenger: Address,
}

#[derive(Debug, Args)]
pub struct EndpointsArgs {
    /// Only show endpoints for this base chain id.
    #[arg(long, alias = "l1", env = "BRIDGEUP_L1_CHAIN_ID")]
    pub l1_chain_id: Option<ChainId>,
}
