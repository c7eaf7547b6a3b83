//! Chain identifiers and network family classification.
//!
//! Every target chain the bridge can be deployed to belongs to exactly one
//! [`NetworkFamily`]. Classification is a membership test against the small,
//! fixed sets of chain ids in [`ids`].

use alloy_core::primitives::U256;
use serde::{Deserialize, Serialize};

/// A chain identifier. Compared only by value.
pub type ChainId = U256;

/// Known chain ids, grouped by network.
pub mod ids {
    use super::ChainId;
    use alloy_core::primitives::U256;

    pub const ETHEREUM_MAINNET: ChainId = U256::from_limbs([1, 0, 0, 0]);
    pub const ETHEREUM_GOERLI: ChainId = U256::from_limbs([5, 0, 0, 0]);
    pub const ETHEREUM_KOVAN: ChainId = U256::from_limbs([42, 0, 0, 0]);

    pub const ARBITRUM_TESTNET_2: ChainId = U256::from_limbs([152709604825713, 0, 0, 0]);
    pub const ARBITRUM_TESTNET_3: ChainId = U256::from_limbs([79377087078960, 0, 0, 0]);
    pub const ARBITRUM_TESTNET_4: ChainId = U256::from_limbs([212984383488152, 0, 0, 0]);

    pub const OPTIMISM_TESTNET_1: ChainId = U256::from_limbs([69, 0, 0, 0]);
    pub const OPTIMISM_SYNTHETIX_DEMO: ChainId = U256::from_limbs([420, 0, 0, 0]);
    pub const OPTIMISM_HOP_TESTNET: ChainId = U256::from_limbs([28, 0, 0, 0]);

    pub const XDAI_SOKOL: ChainId = U256::from_limbs([77, 0, 0, 0]);
    pub const XDAI_MAINNET: ChainId = U256::from_limbs([100, 0, 0, 0]);

    pub const POLYGON_MUMBAI: ChainId = U256::from_limbs([80001, 0, 0, 0]);
    pub const POLYGON_MAINNET: ChainId = U256::from_limbs([137, 0, 0, 0]);
}

const ETHEREUM: &[ChainId] = &[ids::ETHEREUM_MAINNET, ids::ETHEREUM_GOERLI, ids::ETHEREUM_KOVAN];
const ARBITRUM: &[ChainId] = &[
    ids::ARBITRUM_TESTNET_2,
    ids::ARBITRUM_TESTNET_3,
    ids::ARBITRUM_TESTNET_4,
];
const OPTIMISM: &[ChainId] = &[
    ids::OPTIMISM_TESTNET_1,
    ids::OPTIMISM_SYNTHETIX_DEMO,
    ids::OPTIMISM_HOP_TESTNET,
];
const XDAI: &[ChainId] = &[ids::XDAI_SOKOL, ids::XDAI_MAINNET];
const POLYGON: &[ChainId] = &[ids::POLYGON_MUMBAI, ids::POLYGON_MAINNET];

/// The network family a chain belongs to.
///
/// Each family corresponds to a distinct set of on-chain constructor
/// signatures for the bridge and its base-chain messenger wrapper.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NetworkFamily {
    /// The base settlement chain.
    Ethereum,
    /// Arbitrum rollups. Messenger wrappers carry explicit gas overrides.
    Arbitrum,
    /// Optimism rollups.
    Optimism,
    /// xDai sidechains, bridged through the arbitrary message bridge (AMB).
    Xdai,
    /// Polygon sidechains. Inbound messages go through a messenger proxy.
    Polygon,
    /// Any chain id not in a known set.
    Unclassified,
}

impl NetworkFamily {
    /// Classify a chain id. Total and pure.
    pub fn of(chain_id: ChainId) -> Self {
        if ETHEREUM.contains(&chain_id) {
            Self::Ethereum
        } else if ARBITRUM.contains(&chain_id) {
            Self::Arbitrum
        } else if OPTIMISM.contains(&chain_id) {
            Self::Optimism
        } else if XDAI.contains(&chain_id) {
            Self::Xdai
        } else if POLYGON.contains(&chain_id) {
            Self::Polygon
        } else {
            Self::Unclassified
        }
    }

    /// Whether bridges of this family receive messages through a proxy contract.
    pub fn uses_messenger_proxy(&self) -> bool {
        matches!(self, Self::Polygon)
    }
}

/// Classify a chain id into its [`NetworkFamily`].
pub fn classify(chain_id: ChainId) -> NetworkFamily {
    NetworkFamily::of(chain_id)
}

/// Sub-classification of the base chain family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum BaseNetwork {
    Mainnet,
    Goerli,
    Kovan,
}

impl BaseNetwork {
    /// Returns `None` when the chain id is not a base chain.
    pub fn of(chain_id: ChainId) -> Option<Self> {
        if is_mainnet(chain_id) {
            Some(Self::Mainnet)
        } else if is_goerli(chain_id) {
            Some(Self::Goerli)
        } else if is_kovan(chain_id) {
            Some(Self::Kovan)
        } else {
            None
        }
    }

    pub fn chain_id(self) -> ChainId {
        match self {
            Self::Mainnet => ids::ETHEREUM_MAINNET,
            Self::Goerli => ids::ETHEREUM_GOERLI,
            Self::Kovan => ids::ETHEREUM_KOVAN,
        }
    }
}

pub fn is_mainnet(chain_id: ChainId) -> bool {
    chain_id == ids::ETHEREUM_MAINNET
}

pub fn is_goerli(chain_id: ChainId) -> bool {
    chain_id == ids::ETHEREUM_GOERLI
}

pub fn is_kovan(chain_id: ChainId) -> bool {
    chain_id == ids::ETHEREUM_KOVAN
}
