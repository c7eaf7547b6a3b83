//! Protocol constants baked into deployed contracts.

/// Gas limit forwarded by Arbitrum and Optimism messenger wrappers.
pub const DEFAULT_MESSENGER_WRAPPER_GAS_LIMIT: u64 = 1_500_000;
/// Gas price used by the Arbitrum messenger wrapper.
pub const DEFAULT_MESSENGER_WRAPPER_GAS_PRICE: u64 = 0;
/// Call value used by the Arbitrum messenger wrapper.
pub const DEFAULT_MESSENGER_WRAPPER_CALL_VALUE: u64 = 0;
/// Gas limit forwarded by the xDai messenger wrapper to the AMB.
pub const XDAI_MESSENGER_WRAPPER_GAS_LIMIT: u64 = 1_000_000;

/// Default gas limit for messages sent from an L2 bridge.
pub const DEFAULT_L2_BRIDGE_GAS_LIMIT: u64 = 1_500_000;

/// Amplification coefficient of the stable swap pool.
pub const DEFAULT_SWAP_A: u64 = 200;
/// Swap fee, in units of 1e-10.
pub const DEFAULT_SWAP_FEE: u64 = 4_000_000;
pub const DEFAULT_SWAP_ADMIN_FEE: u64 = 0;
pub const DEFAULT_SWAP_WITHDRAWAL_FEE: u64 = 0;

/// Gas limit attached to calls on chains that cannot estimate gas reliably.
pub const DEFAULT_GAS_OVERRIDE_LIMIT: u64 = 5_000_000;

/// Symbol of the wrapped native asset. Matched exactly, case included.
pub const NATIVE_WRAPPED_SYMBOL: &str = "WETH";
