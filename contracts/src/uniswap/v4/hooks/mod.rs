//! Uniswap V4 Hooks Interface.
//!
//! A hook is invoked synchronously by the pool manager at the lifecycle points
//! it declared in its [`Permissions`]. The declaration is queried once, when a
//! pool is initialized with the hook, and mirrored in the least significant
//! bits of the address the hook is deployed to. For example, a hook deployed
//! to address:
//! 0x0000000000000000000000000000000000000A80
//! has the lowest bits '00 1010 1000 0000' which would cause
//! the 'before add liquidity', 'before remove liquidity' and 'before swap'
//! hooks to be used.
//!
//! Should only be callable by the v4 PoolManager.
use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes};
use alloy_sol_types::sol;
use stylus_sdk::abi::Bytes;
use stylus_sdk::stylus_proc::AbiType;

use crate::{
    uniswap::v4::{ModifyLiquidityParams, PoolKey, SwapParams},
    utils::function_selector,
};

pub mod access_control;

/// Selector of [`IHooks::get_hook_permissions`].
pub const GET_HOOK_PERMISSIONS_SELECTOR: [u8; 4] =
    function_selector("getHookPermissions()");

/// Selector of [`IHooks::before_add_liquidity`], returned by the hook to
/// accept the mutation.
pub const BEFORE_ADD_LIQUIDITY_SELECTOR: [u8; 4] = function_selector(
    "beforeAddLiquidity(address,(address,address,uint24,int24,address),(int24,int24,int256,bytes32),bytes)",
);

/// Selector of [`IHooks::before_remove_liquidity`], returned by the hook to
/// accept the mutation.
pub const BEFORE_REMOVE_LIQUIDITY_SELECTOR: [u8; 4] = function_selector(
    "beforeRemoveLiquidity(address,(address,address,uint24,int24,address),(int24,int24,int256,bytes32),bytes)",
);

/// Selector of [`IHooks::before_swap`], returned by the hook to accept the
/// mutation.
pub const BEFORE_SWAP_SELECTOR: [u8; 4] = function_selector(
    "beforeSwap(address,(address,address,uint24,int24,address),(bool,int256,uint160),bytes)",
);

sol! {
    /// Lifecycle points a hook participates in.
    ///
    /// Immutable once declared. The pool manager only invokes the hook at the
    /// points set to `true`.
    #[derive(Debug, Default, Copy, PartialEq, Eq, AbiType)]
    struct Permissions {
        /// Before a pool is initialized.
        bool beforeInitialize;
        /// After a pool is initialized.
        bool afterInitialize;
        /// Before liquidity is added.
        bool beforeAddLiquidity;
        /// After liquidity is added.
        bool afterAddLiquidity;
        /// Before liquidity is removed.
        bool beforeRemoveLiquidity;
        /// After liquidity is removed.
        bool afterRemoveLiquidity;
        /// Before a swap.
        bool beforeSwap;
        /// After a swap.
        bool afterSwap;
        /// Before a donation.
        bool beforeDonate;
        /// After a donation.
        bool afterDonate;
        /// The before swap hook returns a delta.
        bool beforeSwapReturnDelta;
        /// The after swap hook returns a delta.
        bool afterSwapReturnDelta;
        /// The after add liquidity hook returns a delta.
        bool afterAddLiquidityReturnDelta;
        /// The after remove liquidity hook returns a delta.
        bool afterRemoveLiquidityReturnDelta;
    }
}

impl Permissions {
    /// Participates in no lifecycle point.
    pub const NONE: Self = Self {
        beforeInitialize: false,
        afterInitialize: false,
        beforeAddLiquidity: false,
        afterAddLiquidity: false,
        beforeRemoveLiquidity: false,
        afterRemoveLiquidity: false,
        beforeSwap: false,
        afterSwap: false,
        beforeDonate: false,
        afterDonate: false,
        beforeSwapReturnDelta: false,
        afterSwapReturnDelta: false,
        afterAddLiquidityReturnDelta: false,
        afterRemoveLiquidityReturnDelta: false,
    };

    /// Mask of the address bits encoding hook permissions.
    pub const ALL_HOOK_MASK: u16 = (1 << 14) - 1;

    /// Returns the address bits encoding these permissions.
    #[must_use]
    pub const fn to_flags(&self) -> u16 {
        let flags = [
            self.beforeInitialize,
            self.afterInitialize,
            self.beforeAddLiquidity,
            self.afterAddLiquidity,
            self.beforeRemoveLiquidity,
            self.afterRemoveLiquidity,
            self.beforeSwap,
            self.afterSwap,
            self.beforeDonate,
            self.afterDonate,
            self.beforeSwapReturnDelta,
            self.afterSwapReturnDelta,
            self.afterAddLiquidityReturnDelta,
            self.afterRemoveLiquidityReturnDelta,
        ];

        let mut bits = 0;
        let mut i = 0;
        while i < flags.len() {
            if flags[i] {
                bits |= 1 << (flags.len() - 1 - i);
            }
            i += 1;
        }
        bits
    }

    /// Returns `true` if `hook` is deployed to an address whose permission
    /// bits match these permissions exactly.
    #[must_use]
    pub fn matches_address(&self, hook: Address) -> bool {
        let low = u16::from_be_bytes([hook[18], hook[19]]);
        low & Self::ALL_HOOK_MASK == self.to_flags()
    }
}

/// Uniswap V4 Hooks Interface.
///
/// Only the lifecycle points before a mutation are part of this interface;
/// a pool manager never invokes a point the hook did not declare.
pub trait IHooks {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the lifecycle points this hook participates in.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn get_hook_permissions(&self) -> Permissions;

    /// The hook called before liquidity is added.
    ///
    /// Returns [`BEFORE_ADD_LIQUIDITY_SELECTOR`] to accept the mutation.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `sender` - The initial msg::sender() for the add liquidity call.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for adding liquidity.
    /// * `hook_data` - Arbitrary data handed into the Pool Manager by the
    ///   liquidity provider to be passed on to the hook.
    ///
    /// # Errors
    ///
    /// May return an [`IHooks::Error`], which rejects the mutation.
    fn before_add_liquidity(
        &mut self,
        sender: Address,
        key: PoolKey,
        params: ModifyLiquidityParams,
        hook_data: Bytes,
    ) -> Result<FixedBytes<4>, Self::Error>;

    /// The hook called before liquidity is removed.
    ///
    /// Returns [`BEFORE_REMOVE_LIQUIDITY_SELECTOR`] to accept the mutation.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `sender` - The initial msg::sender() for the remove liquidity call.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for removing liquidity.
    /// * `hook_data` - Arbitrary data handed into the Pool Manager by the
    ///   liquidity provider to be passed on to the hook.
    ///
    /// # Errors
    ///
    /// May return an [`IHooks::Error`], which rejects the mutation.
    fn before_remove_liquidity(
        &mut self,
        sender: Address,
        key: PoolKey,
        params: ModifyLiquidityParams,
        hook_data: Bytes,
    ) -> Result<FixedBytes<4>, Self::Error>;

    /// The hook called before a swap.
    ///
    /// Returns [`BEFORE_SWAP_SELECTOR`] to accept the mutation.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `sender` - The initial msg::sender() for the swap call.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for the swap.
    /// * `hook_data` - Arbitrary data handed into the Pool Manager by the
    ///   swapper to be be passed on to the hook.
    ///
    /// # Errors
    ///
    /// May return an [`IHooks::Error`], which rejects the mutation.
    fn before_swap(
        &mut self,
        sender: Address,
        key: PoolKey,
        params: SwapParams,
        hook_data: Bytes,
    ) -> Result<FixedBytes<4>, Self::Error>;
}
