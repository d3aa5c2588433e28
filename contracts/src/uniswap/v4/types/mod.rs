//! Module with data types for Uniswap V4 Hooks.
pub use alloy_primitives::aliases::{I24, U160, U24};
use alloy_primitives::B256;

mod balance_delta;
mod liquidity;
mod pool_key;
mod swap_params;

pub use balance_delta::{BalanceDelta, Flow};
pub use liquidity::ModifyLiquidityParams;
pub use pool_key::PoolKey;
pub use swap_params::SwapParams;

/// Type representing Id of a Pool.
pub type PoolId = B256;

/// Type representing a currency of a pool.
pub type Currency = alloy_primitives::Address;
