//! The chain client capability consumed by deployments.
//!
//! Deployments never talk to a node directly. Everything goes through
//! [`ChainClient`]: listing signers, attaching to existing contracts,
//! deploying, read calls, write calls and waiting for confirmations.

mod artifacts;
mod rpc;

use std::future::Future;

use alloy_core::{
    dyn_abi::DynSolValue,
    primitives::{Address, B256, U256, keccak256},
};
use serde::{Deserialize, Serialize};

use crate::{ChainError, DeploymentParameters, NetworkFamily, gas::GasOverrides};

pub use artifacts::{Artifact, ArtifactStore};
pub use rpc::{JsonRpcChainClient, ReceiptPolling};

/// A contract artifact the deployment works with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Contract {
    #[strum(to_string = "L1_Bridge")]
    L1Bridge,
    /// Any ERC20 exposing `decimals()` and `symbol()`.
    #[strum(to_string = "MockERC20")]
    CanonicalToken,
    #[strum(to_string = "HopBridgeToken")]
    BridgeToken,
    MathUtils,
    SwapUtils,
    Swap,
    #[strum(to_string = "L2_AmmWrapper")]
    AmmWrapper,
    #[strum(to_string = "L2_PolygonMessengerProxy")]
    PolygonMessengerProxy,
    #[strum(to_string = "L2_ArbitrumBridge")]
    ArbitrumBridge,
    #[strum(to_string = "L2_OptimismBridge")]
    OptimismBridge,
    #[strum(to_string = "L2_XDaiBridge")]
    XdaiBridge,
    #[strum(to_string = "L2_PolygonBridge")]
    PolygonBridge,
    #[strum(to_string = "L2_Bridge")]
    L2Bridge,
    ArbitrumMessengerWrapper,
    OptimismMessengerWrapper,
    #[strum(to_string = "XDaiMessengerWrapper")]
    XdaiMessengerWrapper,
    PolygonMessengerWrapper,
}

impl Contract {
    /// The L2 bridge deployed on chains of this family.
    pub fn l2_bridge(family: NetworkFamily) -> Self {
        match family {
            NetworkFamily::Arbitrum => Self::ArbitrumBridge,
            NetworkFamily::Optimism => Self::OptimismBridge,
            NetworkFamily::Xdai => Self::XdaiBridge,
            NetworkFamily::Polygon => Self::PolygonBridge,
            NetworkFamily::Ethereum | NetworkFamily::Unclassified => Self::L2Bridge,
        }
    }

    /// The base-chain messenger wrapper relaying to chains of this family.
    pub fn messenger_wrapper(family: NetworkFamily) -> Option<Self> {
        match family {
            NetworkFamily::Arbitrum => Some(Self::ArbitrumMessengerWrapper),
            NetworkFamily::Optimism => Some(Self::OptimismMessengerWrapper),
            NetworkFamily::Xdai => Some(Self::XdaiMessengerWrapper),
            NetworkFamily::Polygon => Some(Self::PolygonMessengerWrapper),
            NetworkFamily::Ethereum | NetworkFamily::Unclassified => None,
        }
    }
}

/// A state-changing contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    TransferOwnership {
        new_owner: Address,
    },
    InitializeSwap {
        pooled_tokens: [Address; 2],
        decimals: [u8; 2],
        lp_token_name: String,
        lp_token_symbol: String,
        a: u64,
        fee: u64,
        admin_fee: u64,
        withdraw_fee: u64,
    },
    SetL2Bridge {
        bridge: Address,
    },
    SetFxRootTunnel {
        root_tunnel: Address,
    },
    SetFxChild {
        fx_child: Address,
    },
}

impl ContractCall {
    /// Solidity signature of the called function.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::TransferOwnership { .. } => "transferOwnership(address)",
            Self::InitializeSwap { .. } => {
                "initialize(address[],uint8[],string,string,uint256,uint256,uint256,uint256)"
            }
            Self::SetL2Bridge { .. } => "setL2Bridge(address)",
            Self::SetFxRootTunnel { .. } => "setFxRootTunnel(address)",
            Self::SetFxChild { .. } => "setFxChild(address)",
        }
    }

    fn args(&self) -> Vec<DynSolValue> {
        match self {
            Self::TransferOwnership { new_owner: address }
            | Self::SetL2Bridge { bridge: address }
            | Self::SetFxRootTunnel {
                root_tunnel: address,
            }
            | Self::SetFxChild { fx_child: address } => vec![DynSolValue::Address(*address)],
            Self::InitializeSwap {
                pooled_tokens,
                decimals,
                lp_token_name,
                lp_token_symbol,
                a,
                fee,
                admin_fee,
                withdraw_fee,
            } => vec![
                DynSolValue::Array(pooled_tokens.iter().copied().map(DynSolValue::Address).collect()),
                DynSolValue::Array(
                    decimals
                        .iter()
                        .map(|d| DynSolValue::Uint(U256::from(*d), 8))
                        .collect(),
                ),
                DynSolValue::String(lp_token_name.clone()),
                DynSolValue::String(lp_token_symbol.clone()),
                DynSolValue::Uint(U256::from(*a), 256),
                DynSolValue::Uint(U256::from(*fee), 256),
                DynSolValue::Uint(U256::from(*admin_fee), 256),
                DynSolValue::Uint(U256::from(*withdraw_fee), 256),
            ],
        }
    }

    /// ABI-encoded calldata, selector included.
    pub fn calldata(&self) -> Vec<u8> {
        let mut data = selector(self.signature()).to_vec();
        data.extend(DynSolValue::Tuple(self.args()).abi_encode_params());
        data
    }
}

/// The 4-byte selector of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// A contract deployment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub contract: Contract,
    pub from: Address,
    /// Libraries to link into the bytecode, by library contract.
    pub libraries: Vec<(Contract, Address)>,
    pub args: DeploymentParameters,
}

impl DeployRequest {
    pub fn new(contract: Contract, from: Address) -> Self {
        Self {
            contract,
            from,
            libraries: Vec::new(),
            args: DeploymentParameters::default(),
        }
    }

    pub fn args(mut self, args: DeploymentParameters) -> Self {
        self.args = args;
        self
    }

    pub fn library(mut self, library: Contract, address: Address) -> Self {
        self.libraries.push((library, address));
        self
    }
}

/// A write call on a deployed contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCall {
    pub from: Address,
    pub to: Address,
    pub call: ContractCall,
    pub overrides: Option<GasOverrides>,
}

/// A confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: B256,
    /// Set for contract creations.
    pub contract_address: Option<Address>,
    pub block_number: u64,
}

/// Chain interaction capability.
///
/// A failed or reverted transaction surfaces as an error from [`Self::wait`].
/// Implementations decide their own transport, retry and timeout policy.
pub trait ChainClient: Send + Sync {
    /// Accounts available for signing, in a stable order.
    fn signers(&self) -> impl Future<Output = Result<Vec<Address>, ChainError>> + Send;

    /// Bind to an already deployed contract, failing if nothing usable is there.
    fn attach(
        &self,
        contract: Contract,
        address: Address,
    ) -> impl Future<Output = Result<(), ChainError>> + Send;

    /// Submit a deployment, returning the transaction hash.
    fn deploy(&self, request: DeployRequest)
    -> impl Future<Output = Result<B256, ChainError>> + Send;

    fn decimals(
        &self,
        token: Address,
        overrides: Option<GasOverrides>,
    ) -> impl Future<Output = Result<u8, ChainError>> + Send;

    fn symbol(
        &self,
        token: Address,
        overrides: Option<GasOverrides>,
    ) -> impl Future<Output = Result<String, ChainError>> + Send;

    /// Submit a write call, returning the transaction hash.
    fn send(&self, call: WriteCall) -> impl Future<Output = Result<B256, ChainError>> + Send;

    /// Wait until the transaction is confirmed.
    fn wait(&self, tx_hash: B256) -> impl Future<Output = Result<TxReceipt, ChainError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_core::primitives::address;

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(selector("decimals()")), "313ce567");
        assert_eq!(hex::encode(selector("symbol()")), "95d89b41");
        assert_eq!(hex::encode(selector("transferOwnership(address)")), "f2fde38b");
    }

    #[test]
    fn test_transfer_ownership_calldata() {
        let owner = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let data = ContractCall::TransferOwnership { new_owner: owner }.calldata();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(
            hex::encode(&data[4..]),
            "00000000000000000000000070997970c51812dc3a010c7d01b50e0d17dc79c8"
        );
    }

    #[test]
    fn test_initialize_calldata_head() {
        let call = ContractCall::InitializeSwap {
            pooled_tokens: [Address::repeat_byte(1), Address::repeat_byte(2)],
            decimals: [18, 6],
            lp_token_name: "LP".to_string(),
            lp_token_symbol: "LP".to_string(),
            a: 200,
            fee: 4_000_000,
            admin_fee: 0,
            withdraw_fee: 0,
        };
        let data = call.calldata();
        // Eight head words; the fifth is the amplification coefficient.
        assert!(data.len() > 4 + 8 * 32);
        let a_word = &data[4 + 4 * 32..4 + 5 * 32];
        assert_eq!(U256::from_be_slice(a_word), U256::from(200u64));
    }

    #[test]
    fn test_contract_names() {
        assert_eq!(Contract::XdaiBridge.to_string(), "L2_XDaiBridge");
        assert_eq!(Contract::Swap.to_string(), "Swap");
        assert_eq!(Contract::l2_bridge(NetworkFamily::Polygon), Contract::PolygonBridge);
        assert_eq!(Contract::messenger_wrapper(NetworkFamily::Ethereum), None);
    }
}
