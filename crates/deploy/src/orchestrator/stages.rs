//! Deployment stages for the type-state pattern.
//!
//! Every stage carries what the later steps need and nothing more. A
//! transition consumes its stage and returns the next one, so the order of
//! [`super::deploy_l2`] is the only order the compiler accepts.

use alloy_core::primitives::{Address, B256};

use crate::{
    ChainClient, ChainId, DeployError, L2DeploymentConfig, NetworkFamily,
    chain::{ids, is_mainnet},
    client::{Contract, ContractCall, DeployRequest, TxReceipt, WriteCall},
    constants::{
        DEFAULT_SWAP_A, DEFAULT_SWAP_ADMIN_FEE, DEFAULT_SWAP_FEE, DEFAULT_SWAP_WITHDRAWAL_FEE,
        NATIVE_WRAPPED_SYMBOL,
    },
    gas::{GasPolicy, explicit_gas_limits},
    params::{DeploymentParameters, L2BridgeConfig},
    registry::{EndpointRole, lookup_bridge_endpoint},
};

use super::{DeploymentResult, Step, deploy_and_confirm};

/// Signers needed when roles are spread over distinct accounts.
const SPREAD_SIGNERS: usize = 5;

/// Accounts acting in each deployment role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignerRoles {
    pub owner: Address,
    pub bonder: Address,
    pub governance: Address,
}

impl SignerRoles {
    /// Assign roles from the client's signers.
    ///
    /// Runs against a mainnet base chain use the first account for every role.
    pub fn assign(l1_chain_id: ChainId, signers: &[Address]) -> Result<Self, DeployError> {
        let insufficient = |needed| DeployError::InsufficientSigners {
            step: Step::ResolveSigners,
            needed,
            available: signers.len(),
        };

        if is_mainnet(l1_chain_id) {
            let owner = *signers.first().ok_or_else(|| insufficient(1))?;
            return Ok(Self {
                owner,
                bonder: owner,
                governance: owner,
            });
        }

        if signers.len() < SPREAD_SIGNERS {
            return Err(insufficient(SPREAD_SIGNERS));
        }

        Ok(Self {
            owner: signers[0],
            bonder: signers[1],
            governance: signers[4],
        })
    }
}

/// A deployed messenger proxy, waiting to be wired to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessengerProxy {
    address: Address,
    /// Resolved before the proxy is deployed.
    fx_child: Address,
}

impl MessengerProxy {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn fx_child(&self) -> Address {
        self.fx_child
    }
}

/// The messenger the L2 bridge is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Messenger {
    /// The chain's native messenger.
    Native(Address),
    /// A proxy standing in front of the chain's tunnel.
    Proxied(MessengerProxy),
}

impl Messenger {
    pub fn proxy(&self) -> Option<MessengerProxy> {
        match self {
            Self::Native(_) => None,
            Self::Proxied(proxy) => Some(*proxy),
        }
    }
}

/// Nothing has happened yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Init;

#[derive(Debug, Clone, Copy)]
pub struct WalletsResolved {
    signers: SignerRoles,
}

#[derive(Debug, Clone, Copy)]
pub struct ContractsAttached {
    signers: SignerRoles,
}

#[derive(Debug, Clone, Copy)]
pub struct MessengerResolved {
    signers: SignerRoles,
    messenger: Messenger,
}

#[derive(Debug, Clone, Copy)]
pub struct TokenDeployed {
    signers: SignerRoles,
    messenger: Messenger,
    bridge_token: Address,
}

#[derive(Debug, Clone, Copy)]
pub struct AmmDeployed {
    signers: SignerRoles,
    messenger: Messenger,
    bridge_token: Address,
    swap: Address,
}

#[derive(Debug, Clone, Copy)]
pub struct BridgeDeployed {
    signers: SignerRoles,
    messenger: Messenger,
    bridge_token: Address,
    swap: Address,
    bridge: Address,
}

#[derive(Debug, Clone, Copy)]
pub struct WrapperDeployed {
    signers: SignerRoles,
    result: DeploymentResultParts,
}

#[derive(Debug, Clone, Copy)]
pub struct OwnershipTransferred {
    signers: SignerRoles,
    result: DeploymentResultParts,
}

/// Every contract is deployed and wired.
#[derive(Debug, Clone)]
pub struct Complete {
    result: DeploymentResult,
}

#[derive(Debug, Clone, Copy)]
struct DeploymentResultParts {
    messenger: Messenger,
    bridge_token: Address,
    swap: Address,
    bridge: Address,
    amm_wrapper: Address,
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Init {}
    impl Sealed for super::WalletsResolved {}
    impl Sealed for super::ContractsAttached {}
    impl Sealed for super::MessengerResolved {}
    impl Sealed for super::TokenDeployed {}
    impl Sealed for super::AmmDeployed {}
    impl Sealed for super::BridgeDeployed {}
    impl Sealed for super::WrapperDeployed {}
    impl Sealed for super::OwnershipTransferred {}
    impl Sealed for super::Complete {}
}

/// Marker trait for valid deployment stages.
pub trait DeploymentStage: sealed::Sealed + Send + Sync + 'static {}

impl DeploymentStage for Init {}
impl DeploymentStage for WalletsResolved {}
impl DeploymentStage for ContractsAttached {}
impl DeploymentStage for MessengerResolved {}
impl DeploymentStage for TokenDeployed {}
impl DeploymentStage for AmmDeployed {}
impl DeploymentStage for BridgeDeployed {}
impl DeploymentStage for WrapperDeployed {}
impl DeploymentStage for OwnershipTransferred {}
impl DeploymentStage for Complete {}

/// One deployment run against a target network, at stage `S`.
pub struct Deployment<'a, C, S: DeploymentStage> {
    client: &'a C,
    config: &'a L2DeploymentConfig,
    family: NetworkFamily,
    /// Whether [`GasPolicy::WhenRequired`] calls carry an explicit limit.
    explicit_gas: bool,
    stage: S,
}

impl<'a, C: ChainClient, S: DeploymentStage> Deployment<'a, C, S> {
    fn advance<N: DeploymentStage>(self, stage: N) -> Deployment<'a, C, N> {
        Deployment {
            client: self.client,
            config: self.config,
            family: self.family,
            explicit_gas: self.explicit_gas,
            stage,
        }
    }

    async fn deploy_contract(&self, step: Step, request: DeployRequest) -> Result<Address, DeployError> {
        deploy_and_confirm(self.client, step, request).await
    }

    /// Send a write call as `from` and wait for its confirmation.
    async fn transact(
        &self,
        step: Step,
        from: Address,
        to: Address,
        call: ContractCall,
    ) -> Result<TxReceipt, DeployError> {
        let function = call.signature();
        let overrides = GasPolicy::for_call(&call).overrides(self.explicit_gas);
        let tx_hash = self
            .client
            .send(WriteCall {
                from,
                to,
                call,
                overrides,
            })
            .await
            .map_err(DeployError::chain(step))?;
        let receipt = self.confirm(step, tx_hash).await?;

        tracing::debug!(step = %step, function, block = receipt.block_number, "Call confirmed");
        Ok(receipt)
    }

    async fn confirm(&self, step: Step, tx_hash: B256) -> Result<TxReceipt, DeployError> {
        self.client
            .wait(tx_hash)
            .await
            .map_err(DeployError::chain(step))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, Init> {
    pub fn new(client: &'a C, config: &'a L2DeploymentConfig) -> Self {
        Self {
            client,
            config,
            family: NetworkFamily::of(config.l2_chain_id),
            explicit_gas: explicit_gas_limits(config.l2_chain_id, config.explicit_gas_override),
            stage: Init,
        }
    }

    /// Step 1: assign owner, bonder and governance accounts.
    pub async fn resolve_wallets(self) -> Result<Deployment<'a, C, WalletsResolved>, DeployError> {
        let step = Step::ResolveSigners;
        let accounts = self
            .client
            .signers()
            .await
            .map_err(DeployError::chain(step))?;
        let signers = SignerRoles::assign(self.config.l1_chain_id, &accounts)?;

        tracing::info!(
            owner = %signers.owner,
            bonder = %signers.bonder,
            governance = %signers.governance,
            "Signers resolved"
        );

        Ok(self.advance(WalletsResolved { signers }))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, WalletsResolved> {
    /// Step 2: bind to the base-chain bridge and the canonical token.
    pub async fn attach_contracts(self) -> Result<Deployment<'a, C, ContractsAttached>, DeployError> {
        let step = Step::AttachContracts;

        for (contract, address) in [
            (Contract::L1Bridge, self.config.l1_bridge),
            (Contract::CanonicalToken, self.config.l2_canonical_token),
        ] {
            self.client
                .attach(contract, address)
                .await
                .map_err(|source| DeployError::AttachmentFailure {
                    step,
                    contract,
                    address,
                    source,
                })?;
            tracing::debug!(contract = %contract, address = %address, "Attached");
        }

        let signers = self.stage.signers;
        Ok(self.advance(ContractsAttached { signers }))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, ContractsAttached> {
    /// Step 3: deploy a messenger proxy for families that route through one.
    ///
    /// The proxy's tunnel endpoint is looked up first, so an unknown base
    /// chain stops the run before anything is deployed.
    pub async fn resolve_messenger(self) -> Result<Deployment<'a, C, MessengerResolved>, DeployError> {
        let step = Step::DeployMessengerProxy;
        let signers = self.stage.signers;

        let messenger = if self.family.uses_messenger_proxy() {
            let fx_child = lookup_bridge_endpoint(self.config.l1_chain_id, EndpointRole::FxChild)
                .map_err(|source| DeployError::UnrecognizedChainId { step, source })?;

            tracing::info!(
                family = %self.family,
                fx_child = %fx_child,
                "Deploying L2 messenger proxy..."
            );
            let address = self
                .deploy_contract(
                    step,
                    DeployRequest::new(Contract::PolygonMessengerProxy, signers.owner),
                )
                .await?;
            Messenger::Proxied(MessengerProxy { address, fx_child })
        } else {
            Messenger::Native(self.config.l2_messenger)
        };

        Ok(self.advance(MessengerResolved { signers, messenger }))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, MessengerResolved> {
    /// Step 4: deploy the bridge token.
    pub async fn deploy_bridge_token(self) -> Result<Deployment<'a, C, TokenDeployed>, DeployError> {
        let MessengerResolved { signers, messenger } = self.stage;
        let token = &self.config.bridge_token;

        tracing::info!(name = %token.name, symbol = %token.symbol, "Deploying L2 bridge token...");
        let bridge_token = self
            .deploy_contract(
                Step::DeployBridgeToken,
                DeployRequest::new(Contract::BridgeToken, signers.owner).args(
                    DeploymentParameters::new()
                        .with(token.name.clone())
                        .with(token.symbol.clone())
                        .with(u64::from(token.decimals)),
                ),
            )
            .await?;

        Ok(self.advance(TokenDeployed {
            signers,
            messenger,
            bridge_token,
        }))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, TokenDeployed> {
    /// Step 5: deploy the swap with its libraries and seed it with both tokens.
    pub async fn deploy_amm(self) -> Result<Deployment<'a, C, AmmDeployed>, DeployError> {
        let step = Step::DeployAmm;
        let TokenDeployed {
            signers,
            messenger,
            bridge_token,
        } = self.stage;
        let canonical = self.config.l2_canonical_token;

        let canonical_decimals = self
            .client
            .decimals(canonical, GasPolicy::WhenRequired.overrides(self.explicit_gas))
            .await
            .map_err(DeployError::chain(step))?;
        let bridge_token_decimals = self
            .client
            .decimals(bridge_token, GasPolicy::WhenRequired.overrides(self.explicit_gas))
            .await
            .map_err(DeployError::chain(step))?;

        tracing::info!("Deploying L2 swap...");
        let math_utils = self
            .deploy_contract(step, DeployRequest::new(Contract::MathUtils, signers.owner))
            .await?;
        let swap_utils = self
            .deploy_contract(
                step,
                DeployRequest::new(Contract::SwapUtils, signers.owner)
                    .library(Contract::MathUtils, math_utils),
            )
            .await?;
        let swap = self
            .deploy_contract(
                step,
                DeployRequest::new(Contract::Swap, signers.owner)
                    .library(Contract::SwapUtils, swap_utils),
            )
            .await?;

        let lp_token = &self.config.lp_token;
        self.transact(
            step,
            signers.owner,
            swap,
            ContractCall::InitializeSwap {
                pooled_tokens: [canonical, bridge_token],
                decimals: [canonical_decimals, bridge_token_decimals],
                lp_token_name: lp_token.name.clone(),
                lp_token_symbol: lp_token.symbol.clone(),
                a: DEFAULT_SWAP_A,
                fee: DEFAULT_SWAP_FEE,
                admin_fee: DEFAULT_SWAP_ADMIN_FEE,
                withdraw_fee: DEFAULT_SWAP_WITHDRAWAL_FEE,
            },
        )
        .await?;

        Ok(self.advance(AmmDeployed {
            signers,
            messenger,
            bridge_token,
            swap,
        }))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, AmmDeployed> {
    /// Step 6: deploy the family's L2 bridge.
    pub async fn deploy_bridge(self) -> Result<Deployment<'a, C, BridgeDeployed>, DeployError> {
        let step = Step::DeployBridge;
        let AmmDeployed {
            signers,
            messenger,
            bridge_token,
            swap,
        } = self.stage;

        let params = L2BridgeConfig {
            messenger: self.config.l2_messenger,
            messenger_proxy: messenger.proxy().map(|proxy| proxy.address()),
            governance: signers.governance,
            bridge_token,
            l1_bridge: self.config.l1_bridge,
            active_chain_ids: vec![ids::ETHEREUM_MAINNET],
            bonders: vec![signers.bonder],
            l1_chain_id: self.config.l1_chain_id,
        }
        .parameters(self.config.l2_chain_id)
        .map_err(DeployError::resolve(step))?;

        let contract = Contract::l2_bridge(self.family);
        tracing::info!(contract = %contract, "Deploying L2 bridge...");
        let bridge = self
            .deploy_contract(step, DeployRequest::new(contract, signers.owner).args(params))
            .await?;

        Ok(self.advance(BridgeDeployed {
            signers,
            messenger,
            bridge_token,
            swap,
            bridge,
        }))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, BridgeDeployed> {
    /// Step 7: deploy the AMM wrapper in front of the bridge and the swap.
    pub async fn deploy_amm_wrapper(self) -> Result<Deployment<'a, C, WrapperDeployed>, DeployError> {
        let step = Step::DeployAmmWrapper;
        let BridgeDeployed {
            signers,
            messenger,
            bridge_token,
            swap,
            bridge,
        } = self.stage;
        let canonical = self.config.l2_canonical_token;

        let symbol = self
            .client
            .symbol(canonical, GasPolicy::Always.overrides(self.explicit_gas))
            .await
            .map_err(DeployError::chain(step))?;
        let is_eth = symbol == NATIVE_WRAPPED_SYMBOL;

        tracing::info!(symbol = %symbol, is_eth, "Deploying L2 AMM wrapper...");
        let amm_wrapper = self
            .deploy_contract(
                step,
                DeployRequest::new(Contract::AmmWrapper, signers.owner).args(
                    DeploymentParameters::new()
                        .with(bridge)
                        .with(canonical)
                        .with(is_eth)
                        .with(bridge_token)
                        .with(swap),
                ),
            )
            .await?;

        Ok(self.advance(WrapperDeployed {
            signers,
            result: DeploymentResultParts {
                messenger,
                bridge_token,
                swap,
                bridge,
                amm_wrapper,
            },
        }))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, WrapperDeployed> {
    /// Step 8: hand the bridge token over to the bridge.
    pub async fn transfer_token_ownership(
        self,
    ) -> Result<Deployment<'a, C, OwnershipTransferred>, DeployError> {
        let WrapperDeployed { signers, result } = self.stage;

        tracing::info!(bridge = %result.bridge, "Transferring bridge token ownership...");
        self.transact(
            Step::TransferOwnership,
            signers.owner,
            result.bridge_token,
            ContractCall::TransferOwnership {
                new_owner: result.bridge,
            },
        )
        .await?;

        Ok(self.advance(OwnershipTransferred { signers, result }))
    }
}

impl<'a, C: ChainClient> Deployment<'a, C, OwnershipTransferred> {
    /// Step 9: point the messenger proxy at the bridge and the tunnel, if there is one.
    pub async fn wire_messenger_proxy(self) -> Result<Deployment<'a, C, Complete>, DeployError> {
        let OwnershipTransferred { signers, result } = self.stage;

        if let Some(proxy) = result.messenger.proxy() {
            self.wire(proxy, signers.owner, result.bridge).await?;
        }

        let complete = Complete {
            result: DeploymentResult {
                bridge_token: result.bridge_token,
                bridge: result.bridge,
                swap: result.swap,
                amm_wrapper: result.amm_wrapper,
                messenger: match result.messenger {
                    Messenger::Native(address) => address,
                    Messenger::Proxied(proxy) => proxy.address(),
                },
                messenger_proxy: result.messenger.proxy().map(|proxy| proxy.address()),
            },
        };
        Ok(self.advance(complete))
    }

    async fn wire(&self, proxy: MessengerProxy, owner: Address, bridge: Address) -> Result<(), DeployError> {
        let step = Step::WireMessengerProxy;

        tracing::info!(proxy = %proxy.address(), "Wiring L2 messenger proxy...");
        // Each call must be confirmed before the next one is sent.
        for call in [
            ContractCall::SetL2Bridge { bridge },
            ContractCall::SetFxRootTunnel {
                root_tunnel: self.config.l1_messenger_wrapper,
            },
            ContractCall::SetFxChild {
                fx_child: proxy.fx_child(),
            },
        ] {
            self.transact(step, owner, proxy.address(), call).await?;
        }

        Ok(())
    }
}

impl<C, S: DeploymentStage> std::fmt::Debug for Deployment<'_, C, S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployment")
            .field("l2_chain_id", &self.config.l2_chain_id)
            .field("family", &self.family)
            .field("explicit_gas", &self.explicit_gas)
            .field("stage", &self.stage)
            .finish()
    }
}

impl<C> Deployment<'_, C, Complete> {
    pub fn into_result(self) -> DeploymentResult {
        self.stage.result
    }
}
