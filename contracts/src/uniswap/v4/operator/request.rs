//! Requests relayed by the [`super::PoolOperator`] through a pool manager lock.
//!
//! A request is encoded as the calldata of the operator's self-call: the
//! selector of the handler followed by the ABI encoding of
//! `(key, params, user)`. It is built once when a user asks for a mutation
//! and decoded once by the unlock callback.
use alloc::vec::Vec;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolValue;

use crate::{
    uniswap::v4::{ModifyLiquidityParams, PoolKey, SwapParams},
    utils::function_selector,
};

/// Selector of [`super::PoolOperator::perform_exchange`].
pub const PERFORM_EXCHANGE_SELECTOR: [u8; 4] = function_selector(
    "performExchange((address,address,uint24,int24,address),(bool,int256,uint160),address)",
);

/// Selector of [`super::PoolOperator::perform_liquidity_change`].
pub const PERFORM_LIQUIDITY_CHANGE_SELECTOR: [u8; 4] = function_selector(
    "performLiquidityChange((address,address,uint24,int24,address),(int24,int24,int256,bytes32),address)",
);

/// Mutation to perform once the pool manager is unlocked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Swap with the given parameters.
    Exchange(SwapParams),
    /// Add or remove liquidity with the given parameters.
    LiquidityChange(ModifyLiquidityParams),
}

impl Action {
    /// Returns the selector of the handler performing this action.
    #[must_use]
    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Action::Exchange(_) => PERFORM_EXCHANGE_SELECTOR,
            Action::LiquidityChange(_) => PERFORM_LIQUIDITY_CHANGE_SELECTOR,
        }
    }

    /// Returns a short name of the action, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::Exchange(_) => "exchange",
            Action::LiquidityChange(_) => "liquidity_change",
        }
    }
}

/// A mutation of the pool identified by `key` on behalf of `user`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockRequest {
    /// The key for the pool.
    pub key: PoolKey,
    /// The mutation to perform.
    pub action: Action,
    /// The account that asked for the mutation.
    pub user: Address,
}

impl LockRequest {
    /// Creates a request to swap on behalf of `user`.
    #[must_use]
    pub fn exchange(key: PoolKey, params: SwapParams, user: Address) -> Self {
        Self { key, action: Action::Exchange(params), user }
    }

    /// Creates a request to add or remove liquidity on behalf of `user`.
    #[must_use]
    pub fn liquidity_change(
        key: PoolKey,
        params: ModifyLiquidityParams,
        user: Address,
    ) -> Self {
        Self { key, action: Action::LiquidityChange(params), user }
    }

    /// Encodes the request as handler calldata.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut data = Vec::from(self.action.selector());
        let key = self.key.clone();
        let args = match &self.action {
            Action::Exchange(params) => {
                (key, params.clone(), self.user).abi_encode_params()
            }
            Action::LiquidityChange(params) => {
                (key, params.clone(), self.user).abi_encode_params()
            }
        };
        data.extend_from_slice(&args);
        data.into()
    }

    /// Decodes handler calldata.
    ///
    /// Returns `None` if `data` does not select a known handler or its
    /// arguments do not decode.
    #[must_use]
    pub fn decode(data: &[u8]) -> Option<Self> {
        let selector: [u8; 4] = data.get(..4)?.try_into().ok()?;
        let args = &data[4..];

        match selector {
            PERFORM_EXCHANGE_SELECTOR => {
                let (key, params, user) =
                    <(PoolKey, SwapParams, Address)>::abi_decode_params(
                        args, false,
                    )
                    .ok()?;
                Some(Self::exchange(key, params, user))
            }
            PERFORM_LIQUIDITY_CHANGE_SELECTOR => {
                let (key, params, user) = <(
                    PoolKey,
                    ModifyLiquidityParams,
                    Address,
                )>::abi_decode_params(
                    args, false
                )
                .ok()?;
                Some(Self::liquidity_change(key, params, user))
            }
            _ => None,
        }
    }
}
