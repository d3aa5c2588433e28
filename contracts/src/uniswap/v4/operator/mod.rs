//! Operator relaying credential-gated mutations to a pool manager.
//!
//! Pools guarded by an [`crate::uniswap::v4::AccessControlHook`] only accept
//! mutations requested by a single operator. Users ask the [`PoolOperator`]
//! for a swap or a liquidity change; the operator unlocks the pool manager
//! with a [`LockRequest`] carrying the user, and once called back dispatches
//! the request to one of its handlers. The handler performs the mutation
//! with the user encoded in the hook data, so the hook checks the user's
//! credential rather than the operator's, and then settles the resulting
//! deltas against the user's assets.
//!
//! Handlers can only be reached through the unlock callback: their public
//! entry points reject every caller but the operator itself, and the
//! callback rejects every caller but the pool manager.
use alloc::vec::Vec;

use alloy_primitives::Address;
use alloy_sol_types::SolValue;
pub use sol::*;
use stylus_sdk::{
    abi::Bytes,
    call::{self, Call, MethodError},
    contract, msg,
    prelude::*,
    storage::StorageAddress,
};
use tracing::{debug, warn};

use crate::{
    uniswap::v4::{
        BalanceDelta, IPoolManager, IUnlockCallback, ModifyLiquidityParams,
        PoolKey, SwapParams,
    },
    utils::{hook_data::encode_account, revert_data},
};

pub mod request;
pub mod settlement;

pub use request::{Action, LockRequest};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The unlock callback was invoked by an account other than the pool
        /// manager.
        ///
        /// * `caller` - Account that invoked the callback.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error UnauthorizedCaller(address caller);
        /// A handler was invoked by an account other than the operator itself.
        ///
        /// * `caller` - Account that invoked the handler.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error UnauthorizedHandlerCaller(address caller);
        /// The handler failed without a reason.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error LockFailure();
        /// The pool manager returned something other than a balance delta.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error InvalidUnlockResult();
    }
}

/// An error that occurred in the implementation of a [`PoolOperator`].
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The unlock callback was invoked by an account other than the pool
    /// manager.
    UnauthorizedCaller(UnauthorizedCaller),
    /// A handler was invoked by an account other than the operator itself.
    UnauthorizedHandlerCaller(UnauthorizedHandlerCaller),
    /// The handler failed without a reason.
    LockFailure(LockFailure),
    /// The pool manager returned something other than a balance delta.
    InvalidUnlockResult(InvalidUnlockResult),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

/// State of a [`PoolOperator`] contract.
#[storage]
pub struct PoolOperator {
    /// The only pool manager allowed to call back the operator.
    pool_manager: StorageAddress,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for PoolOperator {}

#[public]
#[implements(IUnlockCallback)]
impl PoolOperator {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `pool_manager` - The only pool manager allowed to call back the
    ///   operator.
    #[constructor]
    pub fn constructor(&mut self, pool_manager: Address) {
        self.pool_manager.set(pool_manager);
    }

    /// Returns the only pool manager allowed to call back the operator.
    #[must_use]
    pub fn pool_manager(&self) -> Address {
        self.pool_manager.get()
    }

    /// Swaps on behalf of the caller.
    ///
    /// Returns the delta of the swap, settled against the caller's assets.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for the swap.
    ///
    /// # Errors
    ///
    /// Returns the revert data of the failure that aborted the request, as
    /// raised where it happened, e.g. the hook's `MissingExchangeCredential`.
    /// A failure without a reason is reported as [`Error::LockFailure`].
    pub fn request_exchange(
        &mut self,
        key: PoolKey,
        params: SwapParams,
    ) -> Result<BalanceDelta, Vec<u8>> {
        self.relay(&LockRequest::exchange(key, params, msg::sender()))
    }

    /// Adds or removes liquidity on behalf of the caller, depending on the
    /// sign of `params.liquidityDelta`.
    ///
    /// Returns the delta of the modification, settled against the caller's
    /// assets.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for modifying the liquidity.
    ///
    /// # Errors
    ///
    /// Returns the revert data of the failure that aborted the request, as
    /// raised where it happened, e.g. the hook's `MissingLiquidityCredential`.
    /// A failure without a reason is reported as [`Error::LockFailure`].
    pub fn request_liquidity_change(
        &mut self,
        key: PoolKey,
        params: ModifyLiquidityParams,
    ) -> Result<BalanceDelta, Vec<u8>> {
        let request = LockRequest::liquidity_change(key, params, msg::sender());
        self.relay(&request)
    }

    /// Swaps on behalf of `user` and settles the resulting delta against
    /// `user`'s assets.
    ///
    /// Returns the delta reported by the pool manager, unmodified.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for the swap.
    /// * `user` - The account the swap is performed for.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedHandlerCaller`] - If the caller is not the
    ///   operator itself.
    /// * Any revert data of the pool manager or the hook, untouched.
    pub fn perform_exchange(
        &mut self,
        key: PoolKey,
        params: SwapParams,
        user: Address,
    ) -> Result<BalanceDelta, Vec<u8>> {
        self.only_self()?;
        self._perform_exchange(&key, &params, user)
    }

    /// Adds or removes liquidity on behalf of `user` and settles the
    /// resulting delta against `user`'s assets.
    ///
    /// Returns the delta reported by the pool manager, unmodified.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `key` - The key for the pool.
    /// * `params` - The parameters for modifying the liquidity.
    /// * `user` - The account the modification is performed for.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedHandlerCaller`] - If the caller is not the
    ///   operator itself.
    /// * Any revert data of the pool manager or the hook, untouched.
    pub fn perform_liquidity_change(
        &mut self,
        key: PoolKey,
        params: ModifyLiquidityParams,
        user: Address,
    ) -> Result<BalanceDelta, Vec<u8>> {
        self.only_self()?;
        self._perform_liquidity_change(&key, &params, user)
    }
}

impl PoolOperator {
    /// Unlocks the pool manager with `request` and decodes the resulting
    /// delta.
    fn relay(
        &mut self,
        request: &LockRequest,
    ) -> Result<BalanceDelta, Vec<u8>> {
        debug!(
            user = %request.user,
            action = request.action.name(),
            "relaying request"
        );

        let manager = IPoolManager::new(self.pool_manager.get());
        let result = manager
            .unlock(Call::new_in(self), request.encode())
            .map_err(|e| match e {
                call::Error::Revert(reason) => reason,
                call::Error::AbiDecodingFailed(_) => {
                    Error::InvalidUnlockResult(InvalidUnlockResult {}).into()
                }
            })?;

        let delta = BalanceDelta::abi_decode(&result, false)
            .map_err(|_| Error::InvalidUnlockResult(InvalidUnlockResult {}))?;
        Ok(delta)
    }

    /// Runs the handler selected by `request`.
    fn dispatch(
        &mut self,
        request: LockRequest,
    ) -> Result<BalanceDelta, Vec<u8>> {
        let LockRequest { key, action, user } = request;
        match action {
            Action::Exchange(params) => {
                self._perform_exchange(&key, &params, user)
            }
            Action::LiquidityChange(params) => {
                self._perform_liquidity_change(&key, &params, user)
            }
        }
    }

    fn _perform_exchange(
        &mut self,
        key: &PoolKey,
        params: &SwapParams,
        user: Address,
    ) -> Result<BalanceDelta, Vec<u8>> {
        let manager = IPoolManager::new(self.pool_manager.get());
        let delta = manager
            .swap(Call::new_in(self), key, params, encode_account(user))
            .map_err(revert_data)?;
        settlement::settle(self, &manager, key, user, delta)
            .map_err(revert_data)?;

        Ok(delta)
    }

    fn _perform_liquidity_change(
        &mut self,
        key: &PoolKey,
        params: &ModifyLiquidityParams,
        user: Address,
    ) -> Result<BalanceDelta, Vec<u8>> {
        let manager = IPoolManager::new(self.pool_manager.get());
        let delta = manager
            .modify_liquidity(
                Call::new_in(self),
                key,
                params,
                encode_account(user),
            )
            .map_err(revert_data)?;
        settlement::settle(self, &manager, key, user, delta)
            .map_err(revert_data)?;

        Ok(delta)
    }

    /// Checks that a handler is invoked by the operator itself.
    fn only_self(&self) -> Result<(), Error> {
        let caller = msg::sender();
        if caller != contract::address() {
            warn!(%caller, "handler invoked from outside");
            return Err(Error::UnauthorizedHandlerCaller(
                UnauthorizedHandlerCaller { caller },
            ));
        }
        Ok(())
    }
}

#[public]
impl IUnlockCallback for PoolOperator {
    fn unlock_callback(&mut self, data: Bytes) -> Result<Bytes, Vec<u8>> {
        let caller = msg::sender();
        if caller != self.pool_manager.get() {
            warn!(%caller, "unlock callback from unknown caller");
            return Err(Error::UnauthorizedCaller(UnauthorizedCaller {
                caller,
            })
            .into());
        }

        // Calldata selecting no handler fails like an unknown selector does:
        // without a reason.
        let outcome = match LockRequest::decode(&data) {
            Some(request) => self.dispatch(request),
            None => Err(Vec::new()),
        };

        match outcome {
            Ok(delta) => Ok(delta.abi_encode().into()),
            Err(reason) if reason.is_empty() => {
                warn!("handler failed without a reason");
                Err(Error::LockFailure(LockFailure {}).into())
            }
            Err(reason) => Err(reason),
        }
    }
}
