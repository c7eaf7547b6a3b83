//! Sequencing of one target network's bridge deployment.
//!
//! A run moves through a fixed sequence of stages:
//!
//! ```text
//! Init -> WalletsResolved -> ContractsAttached -> MessengerResolved -> TokenDeployed
//!      -> AmmDeployed -> BridgeDeployed -> WrapperDeployed -> OwnershipTransferred -> Complete
//! ```
//!
//! Each stage is its own type and each transition consumes the previous one,
//! so a step cannot run before the steps it depends on. The first failing
//! step aborts the run with a [`DeployError`] naming that step. Nothing is
//! rolled back, and running again deploys a fresh set of contracts.

mod stages;

use alloy_core::primitives::Address;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::{
    ChainClient, ChainError, DeployError, L2DeploymentConfig,
    client::DeployRequest,
    recorder::{DeploymentRecord, DeploymentRecorder},
};

pub use stages::{
    AmmDeployed, BridgeDeployed, Complete, ContractsAttached, Deployment, DeploymentStage, Init,
    Messenger, MessengerProxy, MessengerResolved, OwnershipTransferred, SignerRoles,
    TokenDeployed, WalletsResolved, WrapperDeployed,
};

/// A step of a deployment run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Step {
    ResolveSigners,
    AttachContracts,
    DeployMessengerProxy,
    DeployBridgeToken,
    DeployAmm,
    DeployBridge,
    DeployAmmWrapper,
    TransferOwnership,
    WireMessengerProxy,
    RecordResult,
    DeployMessengerWrapper,
}

/// Addresses produced by a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub bridge_token: Address,
    pub bridge: Address,
    pub swap: Address,
    pub amm_wrapper: Address,
    /// The messenger the bridge talks to: the proxy when one was deployed.
    pub messenger: Address,
    pub messenger_proxy: Option<Address>,
}

/// Deploy a contract and wait for the address it was created at.
pub(crate) async fn deploy_and_confirm<C: ChainClient>(
    client: &C,
    step: Step,
    request: DeployRequest,
) -> Result<Address, DeployError> {
    let contract = request.contract;
    let tx_hash = client
        .deploy(request)
        .await
        .map_err(DeployError::chain(step))?;
    let receipt = client.wait(tx_hash).await.map_err(DeployError::chain(step))?;
    let address = receipt
        .contract_address
        .ok_or(ChainError::MissingContractAddress(receipt.tx_hash))
        .map_err(DeployError::chain(step))?;

    tracing::info!(step = %step, contract = %contract, address = %address, "Contract deployed");
    Ok(address)
}

/// Deploy and wire a bridge stack on the target network, then record the result.
pub async fn deploy_l2<C, R>(
    client: &C,
    recorder: &R,
    config: &L2DeploymentConfig,
) -> Result<DeploymentResult, DeployError>
where
    C: ChainClient,
    R: DeploymentRecorder,
{
    tracing::info!(
        l1_chain_id = %config.l1_chain_id,
        l2_chain_id = %config.l2_chain_id,
        "Deploying L2 bridge stack"
    );

    let complete = Deployment::new(client, config)
        .resolve_wallets()
        .await?
        .attach_contracts()
        .await?
        .resolve_messenger()
        .await?
        .deploy_bridge_token()
        .await?
        .deploy_amm()
        .await?
        .deploy_bridge()
        .await?
        .deploy_amm_wrapper()
        .await?
        .transfer_token_ownership()
        .await?
        .wire_messenger_proxy()
        .await?;

    let result = complete.into_result();

    DeploymentRecord::new(config, result.clone())
        .and_then(|record| recorder.record(&record))
        .map_err(|source| DeployError::Record {
            step: Step::RecordResult,
            source,
        })?;

    tracing::info!("L2 deployments complete");
    tracing::info!("L2 Bridge Token    : {}", result.bridge_token);
    tracing::info!("L2 Bridge          : {}", result.bridge);
    tracing::info!("L2 Swap            : {}", result.swap);
    tracing::info!("L2 AMM Wrapper     : {}", result.amm_wrapper);
    tracing::info!("L2 Messenger       : {}", result.messenger);
    if let Some(proxy) = result.messenger_proxy {
        tracing::info!("L2 Messenger Proxy : {}", proxy);
    }

    Ok(result)
}

/// Run independent deployments concurrently.
///
/// Runs share nothing but the recorder. Every run is driven to its end, so a
/// failing run never cuts another one short; results come back in input order.
pub async fn deploy_all<'a, C, R>(
    runs: impl IntoIterator<Item = (&'a C, &'a L2DeploymentConfig)>,
    recorder: &R,
) -> Vec<Result<DeploymentResult, DeployError>>
where
    C: ChainClient + 'a,
    R: DeploymentRecorder,
{
    join_all(
        runs.into_iter()
            .map(|(client, config)| deploy_l2(client, recorder, config)),
    )
    .await
}
