//! Explicit gas overrides for chains where estimation is unreliable.

use serde::{Deserialize, Serialize};

use crate::{ChainId, NetworkFamily, client::ContractCall, constants::DEFAULT_GAS_OVERRIDE_LIMIT};

/// Per-call transaction overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasOverrides {
    pub gas_limit: u64,
}

impl Default for GasOverrides {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_OVERRIDE_LIMIT,
        }
    }
}

/// Whether calls on this chain must carry an explicit gas limit.
pub fn needs_explicit_gas_override(chain_id: ChainId) -> bool {
    matches!(
        NetworkFamily::of(chain_id),
        NetworkFamily::Arbitrum | NetworkFamily::Optimism
    )
}

/// Whether a run's conditional calls carry an explicit gas limit.
///
/// `forced` takes precedence over the chain id predicate when set.
pub fn explicit_gas_limits(chain_id: ChainId, forced: Option<bool>) -> bool {
    forced.unwrap_or_else(|| needs_explicit_gas_override(chain_id))
}

/// How the gas limit of one call is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum GasPolicy {
    /// Left to the node's estimate. Contract creations always use this.
    Estimate,
    /// Explicit on chains that need it, estimated elsewhere.
    WhenRequired,
    /// Explicit on every chain.
    Always,
}

impl GasPolicy {
    /// Policy of a write call made during a run.
    pub fn for_call(call: &ContractCall) -> Self {
        match call {
            ContractCall::InitializeSwap { .. } | ContractCall::TransferOwnership { .. } => {
                Self::WhenRequired
            }
            ContractCall::SetL2Bridge { .. } => Self::Always,
            ContractCall::SetFxRootTunnel { .. } | ContractCall::SetFxChild { .. } => {
                Self::Estimate
            }
        }
    }

    /// The overrides to attach, given whether the run needs explicit limits.
    pub fn overrides(self, explicit: bool) -> Option<GasOverrides> {
        match self {
            Self::Estimate => None,
            Self::WhenRequired => explicit.then(GasOverrides::default),
            Self::Always => Some(GasOverrides::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ids;
    use alloy_core::primitives::Address;

    #[test]
    fn test_rollups_need_overrides() {
        assert!(needs_explicit_gas_override(ids::OPTIMISM_TESTNET_1));
        assert!(needs_explicit_gas_override(ids::ARBITRUM_TESTNET_4));
        assert!(!needs_explicit_gas_override(ids::POLYGON_MUMBAI));
        assert!(!needs_explicit_gas_override(ids::XDAI_SOKOL));
        assert!(!needs_explicit_gas_override(ids::ETHEREUM_MAINNET));
    }

    #[test]
    fn test_forced_explicit_limits() {
        assert!(!explicit_gas_limits(ids::POLYGON_MUMBAI, None));
        assert!(explicit_gas_limits(ids::POLYGON_MUMBAI, Some(true)));
        assert!(!explicit_gas_limits(ids::OPTIMISM_TESTNET_1, Some(false)));
        assert!(explicit_gas_limits(ids::OPTIMISM_TESTNET_1, None));
    }

    #[test]
    fn test_policy_overrides() {
        let limit = Some(GasOverrides { gas_limit: 5_000_000 });
        for explicit in [true, false] {
            assert_eq!(GasPolicy::Estimate.overrides(explicit), None);
            assert_eq!(GasPolicy::Always.overrides(explicit), limit);
        }
        assert_eq!(GasPolicy::WhenRequired.overrides(true), limit);
        assert_eq!(GasPolicy::WhenRequired.overrides(false), None);
    }

    #[test]
    fn test_call_policies() {
        let address = Address::repeat_byte(1);
        assert_eq!(
            GasPolicy::for_call(&ContractCall::TransferOwnership { new_owner: address }),
            GasPolicy::WhenRequired
        );
        assert_eq!(
            GasPolicy::for_call(&ContractCall::SetL2Bridge { bridge: address }),
            GasPolicy::Always
        );
        assert_eq!(
            GasPolicy::for_call(&ContractCall::SetFxRootTunnel { root_tunnel: address }),
            GasPolicy::Estimate
        );
        assert_eq!(
            GasPolicy::for_call(&ContractCall::SetFxChild { fx_child: address }),
            GasPolicy::Estimate
        );
    }
}
