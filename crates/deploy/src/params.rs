//! Constructor parameter resolution.
//!
//! Each network family deploys contracts with a different constructor
//! signature. The knowledge of which arguments a family needs, and in which
//! order, lives here and nowhere else: [`NetworkFamily::strategy`] maps a
//! family to the shapes of its messenger wrapper and bridge constructors, and
//! the resolvers below turn a shape into positional arguments.
//!
//! Argument order is ABI data. Never reorder an existing shape.

use std::fmt;

use alloy_core::primitives::{Address, U256};
use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

use crate::{
    ChainId, NetworkFamily, ResolveError,
    constants::{
        DEFAULT_L2_BRIDGE_GAS_LIMIT, DEFAULT_MESSENGER_WRAPPER_CALL_VALUE,
        DEFAULT_MESSENGER_WRAPPER_GAS_LIMIT, DEFAULT_MESSENGER_WRAPPER_GAS_PRICE,
        XDAI_MESSENGER_WRAPPER_GAS_LIMIT,
    },
    registry::{AmbSide, cross_chain_messenger_address},
};

/// One positional constructor argument.
#[derive(Debug, Clone, PartialEq, Eq, From, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstructorArg {
    Address(Address),
    AddressList(Vec<Address>),
    Amount(U256),
    AmountList(Vec<U256>),
    Count(u64),
    Flag(bool),
    Text(String),
}

impl ConstructorArg {
    /// Short name of the argument kind, for display.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::AddressList(_) => "address[]",
            Self::Amount(_) => "amount",
            Self::AmountList(_) => "amount[]",
            Self::Count(_) => "count",
            Self::Flag(_) => "flag",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for ConstructorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, "]")
        }

        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::AddressList(addresses) => list(f, addresses),
            Self::Amount(amount) => write!(f, "{amount}"),
            Self::AmountList(amounts) => list(f, amounts),
            Self::Count(count) => write!(f, "{count}"),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Ordered constructor arguments for one contract deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentParameters(Vec<ConstructorArg>);

impl DeploymentParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument, returning `self` for chaining.
    pub fn with(mut self, arg: impl Into<ConstructorArg>) -> Self {
        self.0.push(arg.into());
        self
    }

    pub fn into_inner(self) -> Vec<ConstructorArg> {
        self.0
    }
}

/// Shape of the base-chain messenger wrapper constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperShape {
    /// `(l1Bridge, l2Bridge, l1Messenger)`.
    Triple,
    /// Triple followed by gas limit, gas price and call value.
    ExplicitGas,
    /// Triple followed by a gas limit.
    GasLimit,
    /// Triple followed by gas limit, target chain id and the parent-side AMB.
    Amb,
    /// `(l1Bridge)` only. Tunnel endpoints are wired by explicit calls later.
    BridgeOnly,
}

/// Shape of the L2 bridge constructor suffix and messenger selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeShape {
    /// Core fields only.
    Core,
    /// Core fields followed by the default gas limit.
    GasLimit,
    /// Core fields followed by the base chain id, then the default gas limit.
    ChainIdThenGasLimit,
    /// Core fields only, with the messenger proxy standing in for the messenger.
    Proxied,
}

/// How a family's constructor arguments are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterStrategy {
    pub wrapper: WrapperShape,
    pub bridge: BridgeShape,
}

impl NetworkFamily {
    /// The parameter strategy for this family.
    pub const fn strategy(self) -> ParameterStrategy {
        let (wrapper, bridge) = match self {
            Self::Arbitrum => (WrapperShape::ExplicitGas, BridgeShape::Core),
            Self::Optimism => (WrapperShape::GasLimit, BridgeShape::GasLimit),
            Self::Xdai => (WrapperShape::Amb, BridgeShape::ChainIdThenGasLimit),
            Self::Polygon => (WrapperShape::BridgeOnly, BridgeShape::Proxied),
            Self::Ethereum | Self::Unclassified => (WrapperShape::Triple, BridgeShape::Core),
        };
        ParameterStrategy { wrapper, bridge }
    }
}

/// Inputs of a messenger wrapper deployment on the base chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessengerWrapperConfig {
    pub l1_bridge: Address,
    pub l2_bridge: Address,
    pub l1_messenger: Address,
}

impl MessengerWrapperConfig {
    /// Resolve the constructor arguments for the wrapper targeting `chain_id`.
    pub fn parameters(&self, chain_id: ChainId) -> DeploymentParameters {
        let triple = DeploymentParameters::new()
            .with(self.l1_bridge)
            .with(self.l2_bridge)
            .with(self.l1_messenger);

        match NetworkFamily::of(chain_id).strategy().wrapper {
            WrapperShape::Triple => triple,
            WrapperShape::ExplicitGas => triple
                .with(DEFAULT_MESSENGER_WRAPPER_GAS_LIMIT)
                .with(U256::from(DEFAULT_MESSENGER_WRAPPER_GAS_PRICE))
                .with(U256::from(DEFAULT_MESSENGER_WRAPPER_CALL_VALUE)),
            WrapperShape::GasLimit => triple.with(DEFAULT_MESSENGER_WRAPPER_GAS_LIMIT),
            WrapperShape::Amb => triple
                .with(XDAI_MESSENGER_WRAPPER_GAS_LIMIT)
                .with(chain_id.to_string())
                .with(cross_chain_messenger_address(AmbSide::L1)),
            WrapperShape::BridgeOnly => DeploymentParameters::new().with(self.l1_bridge),
        }
    }
}

/// Inputs of an L2 bridge deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2BridgeConfig {
    /// The chain's native messenger.
    pub messenger: Address,
    /// The messenger proxy, for families that route through one.
    pub messenger_proxy: Option<Address>,
    pub governance: Address,
    pub bridge_token: Address,
    pub l1_bridge: Address,
    pub active_chain_ids: Vec<ChainId>,
    pub bonders: Vec<Address>,
    pub l1_chain_id: ChainId,
}

impl L2BridgeConfig {
    /// Resolve the constructor arguments for the bridge deployed on `chain_id`.
    pub fn parameters(&self, chain_id: ChainId) -> Result<DeploymentParameters, ResolveError> {
        let shape = NetworkFamily::of(chain_id).strategy().bridge;

        let messenger = match shape {
            BridgeShape::Proxied => self
                .messenger_proxy
                .ok_or(ResolveError::MissingMessengerProxy(chain_id))?,
            _ => self.messenger,
        };

        let core = DeploymentParameters::new()
            .with(messenger)
            .with(self.governance)
            .with(self.bridge_token)
            .with(self.l1_bridge)
            .with(self.active_chain_ids.clone())
            .with(self.bonders.clone());

        Ok(match shape {
            BridgeShape::Core | BridgeShape::Proxied => core,
            BridgeShape::GasLimit => core.with(DEFAULT_L2_BRIDGE_GAS_LIMIT),
            BridgeShape::ChainIdThenGasLimit => core
                .with(self.l1_chain_id)
                .with(DEFAULT_L2_BRIDGE_GAS_LIMIT),
        })
    }
}

/// Constructor arguments of the messenger wrapper for `chain_id`.
pub fn resolve_messenger_wrapper_parameters(
    chain_id: ChainId,
    l1_bridge: Address,
    l2_bridge: Address,
    l1_messenger: Address,
) -> DeploymentParameters {
    MessengerWrapperConfig {
        l1_bridge,
        l2_bridge,
        l1_messenger,
    }
    .parameters(chain_id)
}

/// Constructor arguments of the L2 bridge for `chain_id`.
pub fn resolve_l2_bridge_parameters(
    chain_id: ChainId,
    config: &L2BridgeConfig,
) -> Result<DeploymentParameters, ResolveError> {
    config.parameters(chain_id)
}
