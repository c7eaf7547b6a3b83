//! Base-chain messenger wrapper deployment.
//!
//! The wrapper lives on the base chain and relays bridge messages into one
//! target network. Its constructor depends on the target's family; see
//! [`MessengerWrapperConfig::parameters`].

use alloy_core::primitives::Address;

use crate::{
    ChainClient, DeployError, NetworkFamily, WrapperDeploymentConfig,
    client::{Contract, DeployRequest},
    orchestrator::{Step, deploy_and_confirm},
    params::MessengerWrapperConfig,
};

/// Deploy the messenger wrapper for `config.l2_chain_id` from the client's first signer.
///
/// The wrapper is not wired to anything afterwards.
pub async fn deploy_messenger_wrapper<C: ChainClient>(
    client: &C,
    config: &WrapperDeploymentConfig,
) -> Result<Address, DeployError> {
    let step = Step::DeployMessengerWrapper;
    let family = NetworkFamily::of(config.l2_chain_id);
    let contract = Contract::messenger_wrapper(family).ok_or(DeployError::UnsupportedFamily {
        step,
        chain_id: config.l2_chain_id,
    })?;

    let signers = client.signers().await.map_err(DeployError::chain(step))?;
    let deployer = *signers.first().ok_or(DeployError::InsufficientSigners {
        step,
        needed: 1,
        available: 0,
    })?;

    let args = MessengerWrapperConfig {
        l1_bridge: config.l1_bridge,
        l2_bridge: config.l2_bridge,
        l1_messenger: config.l1_messenger,
    }
    .parameters(config.l2_chain_id);

    tracing::info!(
        contract = %contract,
        l2_chain_id = %config.l2_chain_id,
        args = args.len(),
        "Deploying messenger wrapper..."
    );

    deploy_and_confirm(client, step, DeployRequest::new(contract, deployer).args(args)).await
}
