//! Well-known infrastructure addresses required by some network families.
//!
//! These tables are keyed by the base chain id. Unknown ids are an error:
//! deploying against the wrong infrastructure address cannot be undone.

use alloy_core::primitives::{Address, address};

use crate::{
    ChainId, RegistryError,
    chain::BaseNetwork,
};

/// <https://etherscan.io/address/0x28e4F3a7f651294B9564800b2D01f35189A5bFbE>
pub const STATE_SENDER_MAINNET: Address = address!("28e4F3a7f651294B9564800b2D01f35189A5bFbE");
/// <https://goerli.etherscan.io/address/0xEAa852323826C71cd7920C3b4c007184234c3945>
pub const STATE_SENDER_GOERLI: Address = address!("EAa852323826C71cd7920C3b4c007184234c3945");

/// <https://etherscan.io/address/0x86E4Dc95c7FBdBf52e33D563BbDB00823894C287>
pub const CHECKPOINT_MANAGER_MAINNET: Address =
    address!("86E4Dc95c7FBdBf52e33D563BbDB00823894C287");
/// <https://goerli.etherscan.io/address/0x2890bA17EfE978480615e330ecB65333b880928e>
pub const CHECKPOINT_MANAGER_GOERLI: Address =
    address!("2890bA17EfE978480615e330ecB65333b880928e");

/// FxChild on Polygon PoS, paired with Ethereum mainnet.
pub const FX_CHILD_MAINNET: Address = address!("8397259c983751DAf40400790063935a11afa28a");
/// FxChild on Mumbai, paired with Goerli.
pub const FX_CHILD_GOERLI: Address = address!("Cf73231F28B7331BBe3124B907840A94851f9f11");

/// Arbitrary message bridge on the parent side of the xDai bridge.
pub const XDAI_AMB_L1: Address = address!("Fe446bEF1DbF7AFE24E81e05BC8B271C1BA9a560");
/// Arbitrary message bridge on the child side of the xDai bridge.
pub const XDAI_AMB_L2: Address = address!("Fe446bEF1DbF7AFE24E81e05BC8B271C1BA9a560");

/// Infrastructure contract a Polygon deployment needs to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum EndpointRole {
    StateSender,
    CheckpointManager,
    FxChild,
}

/// Which side of the xDai arbitrary message bridge to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum AmbSide {
    /// The parent (base chain) side.
    L1,
    /// The child (xDai) side.
    L2,
}

/// Look up a Polygon bridge endpoint for the given base chain.
///
/// Only Ethereum mainnet and Goerli are recognised.
pub fn lookup_bridge_endpoint(
    l1_chain_id: ChainId,
    role: EndpointRole,
) -> Result<Address, RegistryError> {
    let network = match BaseNetwork::of(l1_chain_id) {
        Some(network @ (BaseNetwork::Mainnet | BaseNetwork::Goerli)) => network,
        _ => return Err(RegistryError::UnrecognizedChainId(l1_chain_id)),
    };

    let address = match (role, network) {
        (EndpointRole::StateSender, BaseNetwork::Mainnet) => STATE_SENDER_MAINNET,
        (EndpointRole::StateSender, _) => STATE_SENDER_GOERLI,
        (EndpointRole::CheckpointManager, BaseNetwork::Mainnet) => CHECKPOINT_MANAGER_MAINNET,
        (EndpointRole::CheckpointManager, _) => CHECKPOINT_MANAGER_GOERLI,
        (EndpointRole::FxChild, BaseNetwork::Mainnet) => FX_CHILD_MAINNET,
        (EndpointRole::FxChild, _) => FX_CHILD_GOERLI,
    };

    Ok(address)
}

/// Address of the xDai cross-chain messenger (AMB) for one side of the bridge.
pub fn cross_chain_messenger_address(side: AmbSide) -> Address {
    match side {
        AmbSide::L1 => XDAI_AMB_L1,
        AmbSide::L2 => XDAI_AMB_L2,
    }
}
