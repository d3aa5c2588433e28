//! Hook gating pool mutations on role credentials.
//!
//! Every swap and liquidity modification of a pool using this hook must be
//! relayed by the single [`AccessControlHook::allowed_pool_operator`]. The pool
//! manager reports that operator as `sender`, so the account the mutation is
//! performed for is read from the hook data, where the operator encoded it
//! with [`crate::utils::hook_data::encode_account`]. The mutation is allowed
//! only if that account holds the credential of the required [`Role`] in the
//! configured registry.
//!
//! The hook keeps no state besides its configuration: each invocation is an
//! independent allow or deny decision.
use alloy_primitives::{Address, FixedBytes};
pub use sol::*;
use stylus_sdk::{
    abi::Bytes,
    call::{Call, MethodError},
    msg,
    prelude::*,
    storage::StorageAddress,
};
use tracing::{debug, warn};

use super::{
    IHooks, Permissions, BEFORE_ADD_LIQUIDITY_SELECTOR,
    BEFORE_REMOVE_LIQUIDITY_SELECTOR, BEFORE_SWAP_SELECTOR,
};
use crate::{
    access::{ICredentialRegistry, Role},
    uniswap::v4::{ModifyLiquidityParams, PoolKey, SwapParams},
    utils::hook_data::decode_account,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The hook was invoked by an account other than the pool manager.
        ///
        /// * `caller` - Account that invoked the hook.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error NotPoolManager(address caller);
        /// The mutation was requested by an account other than the allowed
        /// pool operator.
        ///
        /// * `operator` - Account that requested the mutation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error UnauthorizedOperator(address operator);
        /// The hook data does not carry exactly one account.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MalformedIdentity();
        /// The credential registry could not answer a balance query.
        ///
        /// * `registry` - Address of the registry.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error InvalidCredentialRegistry(address registry);
        /// The account lacks the credential to add or remove liquidity.
        ///
        /// * `account` - Account the mutation was requested for.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MissingLiquidityCredential(address account);
        /// The account lacks the credential to swap.
        ///
        /// * `account` - Account the mutation was requested for.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error MissingExchangeCredential(address account);
    }
}

/// An error that occurred in the implementation of an [`AccessControlHook`].
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The hook was invoked by an account other than the pool manager.
    NotPoolManager(NotPoolManager),
    /// The mutation was requested by an account other than the allowed pool
    /// operator.
    UnauthorizedOperator(UnauthorizedOperator),
    /// The hook data does not carry exactly one account.
    MalformedIdentity(MalformedIdentity),
    /// The credential registry could not answer a balance query.
    InvalidCredentialRegistry(InvalidCredentialRegistry),
    /// The account lacks the credential to add or remove liquidity.
    MissingLiquidityCredential(MissingLiquidityCredential),
    /// The account lacks the credential to swap.
    MissingExchangeCredential(MissingExchangeCredential),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

impl Error {
    fn missing_credential(role: Role, account: Address) -> Self {
        match role {
            Role::Liquidity => {
                Error::MissingLiquidityCredential(MissingLiquidityCredential {
                    account,
                })
            }
            Role::Exchange => {
                Error::MissingExchangeCredential(MissingExchangeCredential {
                    account,
                })
            }
        }
    }
}

/// State of an [`AccessControlHook`] contract.
#[storage]
pub struct AccessControlHook {
    /// The pool manager allowed to invoke the hook.
    pool_manager: StorageAddress,
    /// The only operator allowed to request mutations.
    allowed_pool_operator: StorageAddress,
    /// Registry holding the role credentials.
    registry: StorageAddress,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for AccessControlHook {}

#[public]
#[implements(IHooks<Error = Error>)]
impl AccessControlHook {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `pool_manager` - The pool manager allowed to invoke the hook.
    /// * `allowed_pool_operator` - The only operator allowed to request
    ///   mutations.
    /// * `registry` - Registry holding the role credentials.
    #[constructor]
    pub fn constructor(
        &mut self,
        pool_manager: Address,
        allowed_pool_operator: Address,
        registry: Address,
    ) {
        self.pool_manager.set(pool_manager);
        self.allowed_pool_operator.set(allowed_pool_operator);
        self.registry.set(registry);
    }

    /// Returns the pool manager allowed to invoke the hook.
    #[must_use]
    pub fn pool_manager(&self) -> Address {
        self.pool_manager.get()
    }

    /// Returns the only operator allowed to request mutations.
    #[must_use]
    pub fn allowed_pool_operator(&self) -> Address {
        self.allowed_pool_operator.get()
    }

    /// Returns the registry holding the role credentials.
    #[must_use]
    pub fn registry(&self) -> Address {
        self.registry.get()
    }
}

impl AccessControlHook {
    /// Lifecycle points the hook participates in.
    pub const PERMISSIONS: Permissions = Permissions {
        beforeAddLiquidity: true,
        beforeRemoveLiquidity: true,
        beforeSwap: true,
        ..Permissions::NONE
    };

    /// Checks that a mutation requested by `sender` on behalf of the account
    /// in `hook_data` is allowed for `role`.
    ///
    /// # Errors
    ///
    /// * [`Error::NotPoolManager`] - If the caller is not the pool manager.
    /// * [`Error::UnauthorizedOperator`] - If `sender` is not the allowed pool
    ///   operator.
    /// * [`Error::MalformedIdentity`] - If `hook_data` does not carry exactly
    ///   one account.
    /// * [`Error::InvalidCredentialRegistry`] - If the registry fails to
    ///   answer.
    /// * [`Error::MissingLiquidityCredential`] - If `role` is
    ///   [`Role::Liquidity`] and the account lacks its credential.
    /// * [`Error::MissingExchangeCredential`] - If `role` is
    ///   [`Role::Exchange`] and the account lacks its credential.
    fn check_credential(
        &mut self,
        sender: Address,
        hook_data: &[u8],
        role: Role,
    ) -> Result<(), Error> {
        let caller = msg::sender();
        if caller != self.pool_manager.get() {
            warn!(%caller, "hook invoked outside the pool manager");
            return Err(Error::NotPoolManager(NotPoolManager { caller }));
        }

        if sender != self.allowed_pool_operator.get() {
            warn!(operator = %sender, "mutation requested by unknown operator");
            return Err(Error::UnauthorizedOperator(UnauthorizedOperator {
                operator: sender,
            }));
        }

        let account = decode_account(hook_data)
            .ok_or(Error::MalformedIdentity(MalformedIdentity {}))?;

        let registry = self.registry.get();
        let holds = ICredentialRegistry::new(registry)
            .holds(Call::new_in(self), account, role)
            .map_err(|_| {
                Error::InvalidCredentialRegistry(InvalidCredentialRegistry {
                    registry,
                })
            })?;

        if !holds {
            warn!(%account, ?role, "credential missing");
            return Err(Error::missing_credential(role, account));
        }

        debug!(%account, ?role, "credential checked");
        Ok(())
    }
}

#[public]
impl IHooks for AccessControlHook {
    type Error = Error;

    fn get_hook_permissions(&self) -> Permissions {
        Self::PERMISSIONS
    }

    fn before_add_liquidity(
        &mut self,
        sender: Address,
        _key: PoolKey,
        _params: ModifyLiquidityParams,
        hook_data: Bytes,
    ) -> Result<FixedBytes<4>, Self::Error> {
        self.check_credential(sender, &hook_data, Role::Liquidity)?;
        Ok(BEFORE_ADD_LIQUIDITY_SELECTOR.into())
    }

    fn before_remove_liquidity(
        &mut self,
        sender: Address,
        _key: PoolKey,
        _params: ModifyLiquidityParams,
        hook_data: Bytes,
    ) -> Result<FixedBytes<4>, Self::Error> {
        self.check_credential(sender, &hook_data, Role::Liquidity)?;
        Ok(BEFORE_REMOVE_LIQUIDITY_SELECTOR.into())
    }

    fn before_swap(
        &mut self,
        sender: Address,
        _key: PoolKey,
        _params: SwapParams,
        hook_data: Bytes,
    ) -> Result<FixedBytes<4>, Self::Error> {
        self.check_credential(sender, &hook_data, Role::Exchange)?;
        Ok(BEFORE_SWAP_SELECTOR.into())
    }
}
