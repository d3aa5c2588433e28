//! Interface of the Uniswap V4 style pool manager, as seen by its callers.
//!
//! The pool manager owns every pool's reserves and applies mutations only
//! while unlocked: a caller asks for `unlock`, the manager calls back
//! [`IUnlockCallback::unlock_callback`] on it, and every mutation and transfer
//! performed from within that callback is accounted as a per-currency delta
//! of the caller. The manager closes the lock once the callback returns, and
//! keeps the resulting state only if the callback succeeded and every delta
//! was settled. Otherwise nothing performed while unlocked persists.
//!
//! A single lock can be open at a time; `unlock` fails while another one is
//! active.
use alloc::vec::Vec;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolValue;
use stylus_sdk::call::{self, call, MutatingCallContext};

use crate::{
    uniswap::v4::{
        BalanceDelta, Currency, ModifyLiquidityParams, PoolKey, SwapParams,
    },
    utils::function_selector,
};

/// Selector of `unlock(bytes)`.
pub const UNLOCK_SELECTOR: [u8; 4] = function_selector("unlock(bytes)");

/// Selector of `swap(PoolKey,SwapParams,bytes)`.
pub const SWAP_SELECTOR: [u8; 4] = function_selector(
    "swap((address,address,uint24,int24,address),(bool,int256,uint160),bytes)",
);

/// Selector of `modifyLiquidity(PoolKey,ModifyLiquidityParams,bytes)`.
pub const MODIFY_LIQUIDITY_SELECTOR: [u8; 4] = function_selector(
    "modifyLiquidity((address,address,uint24,int24,address),(int24,int24,int256,bytes32),bytes)",
);

/// Selector of `settleFrom(address,address,uint256)`.
pub const SETTLE_FROM_SELECTOR: [u8; 4] =
    function_selector("settleFrom(address,address,uint256)");

/// Selector of `take(address,address,uint256)`.
pub const TAKE_SELECTOR: [u8; 4] =
    function_selector("take(address,address,uint256)");

/// Selector of [`IUnlockCallback::unlock_callback`].
pub const UNLOCK_CALLBACK_SELECTOR: [u8; 4] =
    function_selector("unlockCallback(bytes)");

/// Interface of a contract that can unlock a pool manager.
pub trait IUnlockCallback {
    /// Called by the pool manager once it is unlocked for this contract.
    ///
    /// Returns data handed back to the caller of `unlock`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `data` - The data passed to `unlock`.
    ///
    /// # Errors
    ///
    /// Returns the raw revert data of the failure, which fails the whole
    /// unlocked sequence.
    fn unlock_callback(
        &mut self,
        data: stylus_sdk::abi::Bytes,
    ) -> Result<stylus_sdk::abi::Bytes, Vec<u8>>;
}

/// A pool manager deployed at a known address.
///
/// Every method fails with the [`call::Error`] of the underlying call, which
/// carries the manager's revert data untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IPoolManager {
    address: Address,
}

impl IPoolManager {
    /// Binds to the pool manager deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Returns the address of the pool manager.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Unlocks the pool manager for the calling contract, which is called
    /// back with `data` through [`IUnlockCallback::unlock_callback`].
    ///
    /// Returns the data returned by the callback.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the interface.
    /// * `context` - Context of the call, made by the locker.
    /// * `data` - Data handed to the callback untouched.
    ///
    /// # Errors
    ///
    /// Fails if another lock is active, if the callback fails (with the
    /// callback's revert data, untouched) or if a delta of the locker is
    /// left unsettled.
    pub fn unlock(
        &self,
        context: impl MutatingCallContext,
        data: Bytes,
    ) -> Result<Bytes, call::Error> {
        let result =
            self.send(context, UNLOCK_SELECTOR, &(data,).abi_encode_params())?;
        Bytes::abi_decode(&result, false)
            .map_err(call::Error::AbiDecodingFailed)
    }

    /// Swaps against the pool identified by `key`.
    ///
    /// Returns the delta of the caller caused by the swap.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the interface.
    /// * `context` - Context of the call, made by the locker.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for the swap.
    /// * `hook_data` - Data passed on to the hook untouched.
    ///
    /// # Errors
    ///
    /// Fails if the manager is locked, the pool is not initialized or the
    /// hook rejects the swap (with the hook's revert data, untouched).
    pub fn swap(
        &self,
        context: impl MutatingCallContext,
        key: &PoolKey,
        params: &SwapParams,
        hook_data: Bytes,
    ) -> Result<BalanceDelta, call::Error> {
        let args = (key.clone(), params.clone(), hook_data).abi_encode_params();
        let result = self.send(context, SWAP_SELECTOR, &args)?;
        BalanceDelta::abi_decode(&result, false)
            .map_err(call::Error::AbiDecodingFailed)
    }

    /// Adds or removes liquidity of a position in the pool identified by
    /// `key`, depending on the sign of `params.liquidityDelta`.
    ///
    /// Returns the delta of the caller caused by the modification.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the interface.
    /// * `context` - Context of the call, made by the locker.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for modifying the liquidity.
    /// * `hook_data` - Data passed on to the hook untouched.
    ///
    /// # Errors
    ///
    /// Fails if the manager is locked, the pool is not initialized or the
    /// hook rejects the modification (with the hook's revert data,
    /// untouched).
    pub fn modify_liquidity(
        &self,
        context: impl MutatingCallContext,
        key: &PoolKey,
        params: &ModifyLiquidityParams,
        hook_data: Bytes,
    ) -> Result<BalanceDelta, call::Error> {
        let args = (key.clone(), params.clone(), hook_data).abi_encode_params();
        let result = self.send(context, MODIFY_LIQUIDITY_SELECTOR, &args)?;
        BalanceDelta::abi_decode(&result, false)
            .map_err(call::Error::AbiDecodingFailed)
    }

    /// Collects `amount` of `currency` from `payer` into the pool, crediting
    /// the delta of the caller.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the interface.
    /// * `context` - Context of the call, made by the locker.
    /// * `currency` - The currency to collect.
    /// * `payer` - The account paying.
    /// * `amount` - The amount to collect.
    ///
    /// # Errors
    ///
    /// Fails if the manager is locked or `payer` cannot pay `amount`.
    pub fn settle_from(
        &self,
        context: impl MutatingCallContext,
        currency: Currency,
        payer: Address,
        amount: U256,
    ) -> Result<(), call::Error> {
        let args = (currency, payer, amount).abi_encode_params();
        self.send(context, SETTLE_FROM_SELECTOR, &args)?;
        Ok(())
    }

    /// Releases `amount` of `currency` from the pool to `to`, debiting the
    /// delta of the caller.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the interface.
    /// * `context` - Context of the call, made by the locker.
    /// * `currency` - The currency to release.
    /// * `to` - The account receiving.
    /// * `amount` - The amount to release.
    ///
    /// # Errors
    ///
    /// Fails if the manager is locked or the pool cannot release `amount`.
    pub fn take(
        &self,
        context: impl MutatingCallContext,
        currency: Currency,
        to: Address,
        amount: U256,
    ) -> Result<(), call::Error> {
        let args = (currency, to, amount).abi_encode_params();
        self.send(context, TAKE_SELECTOR, &args)?;
        Ok(())
    }

    fn send(
        &self,
        context: impl MutatingCallContext,
        selector: [u8; 4],
        args: &[u8],
    ) -> Result<Vec<u8>, call::Error> {
        let mut calldata = Vec::from(selector);
        calldata.extend_from_slice(args);
        call(context, self.address, &calldata)
    }
}
