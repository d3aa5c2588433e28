//! Unit-testing utilities: a pool manager and credential registries deployed
//! as `motsu` contracts, plus pool fixtures.
use alloy_primitives::{address, Address, FixedBytes, B256, I256, U256};
use alloy_sol_macro::sol;
use alloy_sol_types::{SolError, SolValue};
use stylus_sdk::{
    abi::Bytes,
    call::{call, Call},
    contract, msg,
    prelude::*,
    storage::{
        StorageBool, StorageBytes, StorageI256, StorageMap, StorageU256,
    },
};

use crate::{
    uniswap::v4::{
        hooks::{
            BEFORE_ADD_LIQUIDITY_SELECTOR, BEFORE_REMOVE_LIQUIDITY_SELECTOR,
            BEFORE_SWAP_SELECTOR, GET_HOOK_PERMISSIONS_SELECTOR,
        },
        pool_manager::UNLOCK_CALLBACK_SELECTOR,
        BalanceDelta, Currency, ModifyLiquidityParams, Permissions, PoolKey,
        SwapParams, I24, U160, U24,
    },
    utils::{hook_data::encode_account, revert_data},
};

pub(crate) const CURRENCY0: Currency =
    address!("0x00000000000000000000000000000000000000C0");
pub(crate) const CURRENCY1: Currency =
    address!("0x00000000000000000000000000000000000000C1");

pub(crate) fn pool_key(hooks: Address) -> PoolKey {
    PoolKey {
        currency0: CURRENCY0,
        currency1: CURRENCY1,
        fee: U24::from(3000),
        tickSpacing: I24::ONE,
        hooks,
    }
}

pub(crate) fn swap_params(zero_for_one: bool, amount_in: u64) -> SwapParams {
    SwapParams {
        zeroForOne: zero_for_one,
        amountSpecified: -I256::from_raw(U256::from(amount_in)),
        sqrtPriceLimitX96: U160::ZERO,
    }
}

pub(crate) fn add_liquidity_params(liquidity: u64) -> ModifyLiquidityParams {
    ModifyLiquidityParams {
        tickLower: I24::MINUS_ONE,
        tickUpper: I24::ONE,
        liquidityDelta: I256::from_raw(U256::from(liquidity)),
        salt: B256::ZERO,
    }
}

pub(crate) fn remove_liquidity_params(liquidity: u64) -> ModifyLiquidityParams {
    ModifyLiquidityParams {
        liquidityDelta: -I256::from_raw(U256::from(liquidity)),
        ..add_liquidity_params(0)
    }
}

/// Hook data carrying `account`.
pub(crate) fn identity(account: Address) -> Bytes {
    encode_account(account).to_vec().into()
}

/// ERC-1155 style credential registry with freely mintable balances.
#[storage]
pub(crate) struct CredentialRegistryMock {
    balances: StorageMap<Address, StorageMap<U256, StorageU256>>,
}

unsafe impl TopLevelStorage for CredentialRegistryMock {}

#[public]
impl CredentialRegistryMock {
    fn balance_of(&self, account: Address, id: U256) -> U256 {
        self.balances.get(account).get(id)
    }
}

impl CredentialRegistryMock {
    pub(crate) fn mint(&mut self, account: Address, id: U256, amount: U256) {
        let balance = self.balances.get(account).get(id);
        self.balances.setter(account).setter(id).set(balance + amount);
    }
}

/// Credential registry failing every balance query.
#[storage]
pub(crate) struct RevertingRegistry;

unsafe impl TopLevelStorage for RevertingRegistry {}

impl RevertingRegistry {
    pub(crate) const REASON: &'static [u8] = b"registry unavailable";
}

#[public]
impl RevertingRegistry {
    fn balance_of(
        &self,
        _account: Address,
        _id: U256,
    ) -> Result<U256, Vec<u8>> {
        Err(Self::REASON.to_vec())
    }
}

sol! {
    #[derive(Debug)]
    error ManagerLocked();
    #[derive(Debug)]
    error AlreadyUnlocked();
    #[derive(Debug)]
    error CurrencyNotSettled();
    #[derive(Debug)]
    error PoolNotInitialized();
    #[derive(Debug)]
    error PoolAlreadyInitialized();
    #[derive(Debug)]
    error HookAddressNotValid(address hooks);
    #[derive(Debug)]
    error InvalidHookResponse();
    #[derive(Debug)]
    error InvalidCallbackResult();
    #[derive(Debug)]
    error InsufficientBalance(address account, uint256 balance, uint256 needed);
    #[derive(Debug)]
    error DeltaOverflow();
}

/// Lifecycle points of an initialized pool's hook.
#[storage]
pub(crate) struct PoolState {
    initialized: StorageBool,
    before_add_liquidity: StorageBool,
    before_remove_liquidity: StorageBool,
    before_swap: StorageBool,
}

/// Pool manager with flash accounting and no pricing: every mutation of a
/// pool yields the delta quoted with [`PoolManagerMock::set_quote`].
///
/// Balances of the counterparties are kept per currency by the manager
/// itself, standing in for the currencies' own ledgers.
#[storage]
pub(crate) struct PoolManagerMock {
    unlocked: StorageBool,
    halted: StorageBool,
    quote: StorageBytes,
    pools: StorageMap<B256, PoolState>,
    balances: StorageMap<Currency, StorageMap<Address, StorageU256>>,
    reserves: StorageMap<Currency, StorageU256>,
    deltas: StorageMap<Address, StorageMap<Currency, StorageI256>>,
    nonzero_deltas: StorageU256,
}

unsafe impl TopLevelStorage for PoolManagerMock {}

#[public]
impl PoolManagerMock {
    pub fn initialize(&mut self, key: PoolKey) -> Result<(), Vec<u8>> {
        let id = key.to_id();
        if self.pools.get(id).initialized.get() {
            return Err(PoolAlreadyInitialized {}.abi_encode());
        }

        let permissions = if key.hooks.is_zero() {
            Permissions::NONE
        } else {
            let output = call(
                Call::new_in(self),
                key.hooks,
                &GET_HOOK_PERMISSIONS_SELECTOR,
            )
            .map_err(revert_data)?;
            Permissions::abi_decode(&output, false).map_err(|_| {
                HookAddressNotValid { hooks: key.hooks }.abi_encode()
            })?
        };

        let mut pool = self.pools.setter(id);
        pool.initialized.set(true);
        pool.before_add_liquidity.set(permissions.beforeAddLiquidity);
        pool.before_remove_liquidity.set(permissions.beforeRemoveLiquidity);
        pool.before_swap.set(permissions.beforeSwap);
        Ok(())
    }

    pub fn unlock(&mut self, data: Bytes) -> Result<Bytes, Vec<u8>> {
        if self.unlocked.get() {
            return Err(AlreadyUnlocked {}.abi_encode());
        }

        self.unlocked.set(true);
        let mut calldata = Vec::from(UNLOCK_CALLBACK_SELECTOR);
        calldata.extend(
            (alloy_primitives::Bytes::from(data.to_vec()),).abi_encode_params(),
        );
        let result = call(Call::new_in(self), msg::sender(), &calldata);
        self.unlocked.set(false);

        let output = result.map_err(revert_data)?;
        if !self.nonzero_deltas.get().is_zero() {
            return Err(CurrencyNotSettled {}.abi_encode());
        }

        let result = alloy_primitives::Bytes::abi_decode(&output, false)
            .map_err(|_| InvalidCallbackResult {}.abi_encode())?;
        Ok(result.to_vec().into())
    }

    fn swap(
        &mut self,
        key: PoolKey,
        params: SwapParams,
        hook_data: Bytes,
    ) -> Result<BalanceDelta, Vec<u8>> {
        self.ensure_mutable(&key)?;
        let locker = msg::sender();

        if self.pools.get(key.to_id()).before_swap.get() {
            let args = (
                locker,
                key.clone(),
                params,
                alloy_primitives::Bytes::from(hook_data.to_vec()),
            )
                .abi_encode_params();
            self.call_hook(key.hooks, BEFORE_SWAP_SELECTOR, &args)?;
        }

        let delta = self.quote();
        self.account_pool_delta(locker, &key, delta)?;
        Ok(delta)
    }

    fn modify_liquidity(
        &mut self,
        key: PoolKey,
        params: ModifyLiquidityParams,
        hook_data: Bytes,
    ) -> Result<BalanceDelta, Vec<u8>> {
        self.ensure_mutable(&key)?;
        let locker = msg::sender();

        let pool = self.pools.get(key.to_id());
        let selector = if params.is_increase() {
            pool.before_add_liquidity
                .get()
                .then_some(BEFORE_ADD_LIQUIDITY_SELECTOR)
        } else {
            pool.before_remove_liquidity
                .get()
                .then_some(BEFORE_REMOVE_LIQUIDITY_SELECTOR)
        };

        if let Some(selector) = selector {
            let args = (
                locker,
                key.clone(),
                params,
                alloy_primitives::Bytes::from(hook_data.to_vec()),
            )
                .abi_encode_params();
            self.call_hook(key.hooks, selector, &args)?;
        }

        let delta = self.quote();
        self.account_pool_delta(locker, &key, delta)?;
        Ok(delta)
    }

    fn settle_from(
        &mut self,
        currency: Currency,
        payer: Address,
        amount: U256,
    ) -> Result<(), Vec<u8>> {
        self.ensure_unlocked()?;

        let balance = self.balances.get(currency).get(payer);
        let remaining = balance.checked_sub(amount).ok_or_else(|| {
            InsufficientBalance { account: payer, balance, needed: amount }
                .abi_encode()
        })?;
        self.balances.setter(currency).setter(payer).set(remaining);
        let reserves = self.reserves.get(currency);
        self.reserves.setter(currency).set(reserves + amount);

        self.account_delta(msg::sender(), currency, signed(amount)?)
    }

    fn take(
        &mut self,
        currency: Currency,
        to: Address,
        amount: U256,
    ) -> Result<(), Vec<u8>> {
        self.ensure_unlocked()?;

        let reserves = self.reserves.get(currency);
        let remaining = reserves.checked_sub(amount).ok_or_else(|| {
            InsufficientBalance {
                account: contract::address(),
                balance: reserves,
                needed: amount,
            }
            .abi_encode()
        })?;
        self.reserves.setter(currency).set(remaining);
        let balance = self.balances.get(currency).get(to);
        self.balances.setter(currency).setter(to).set(balance + amount);

        self.account_delta(msg::sender(), currency, -signed(amount)?)
    }
}

impl PoolManagerMock {
    pub(crate) fn set_quote(&mut self, delta: BalanceDelta) {
        self.quote.set_bytes(delta.abi_encode());
    }

    /// Makes every following mutation fail without a reason.
    pub(crate) fn halt(&mut self) {
        self.halted.set(true);
    }

    /// Opens the lock without calling anybody back.
    pub(crate) fn force_unlock(&mut self) {
        self.unlocked.set(true);
    }

    pub(crate) fn mint(
        &mut self,
        currency: Currency,
        to: Address,
        amount: u128,
    ) {
        let balance = self.balances.get(currency).get(to);
        self.balances
            .setter(currency)
            .setter(to)
            .set(balance + U256::from(amount));
    }

    pub(crate) fn seed_reserves(&mut self, currency: Currency, amount: u128) {
        let reserves = self.reserves.get(currency);
        self.reserves.setter(currency).set(reserves + U256::from(amount));
    }

    pub(crate) fn balance_of(
        &self,
        currency: Currency,
        account: Address,
    ) -> U256 {
        self.balances.get(currency).get(account)
    }

    pub(crate) fn reserves(&self, currency: Currency) -> U256 {
        self.reserves.get(currency)
    }

    pub(crate) fn delta_of(&self, locker: Address, currency: Currency) -> I256 {
        self.deltas.get(locker).get(currency)
    }

    fn quote(&self) -> BalanceDelta {
        BalanceDelta::abi_decode(&self.quote.get_bytes(), false)
            .unwrap_or(BalanceDelta::ZERO)
    }

    fn ensure_unlocked(&self) -> Result<(), Vec<u8>> {
        if self.unlocked.get() {
            Ok(())
        } else {
            Err(ManagerLocked {}.abi_encode())
        }
    }

    fn ensure_mutable(&self, key: &PoolKey) -> Result<(), Vec<u8>> {
        self.ensure_unlocked()?;
        if self.halted.get() {
            return Err(Vec::new());
        }
        if !self.pools.get(key.to_id()).initialized.get() {
            return Err(PoolNotInitialized {}.abi_encode());
        }
        Ok(())
    }

    fn call_hook(
        &mut self,
        hook: Address,
        selector: [u8; 4],
        args: &[u8],
    ) -> Result<(), Vec<u8>> {
        let mut calldata = Vec::from(selector);
        calldata.extend_from_slice(args);
        let output =
            call(Call::new_in(self), hook, &calldata).map_err(revert_data)?;

        match FixedBytes::<4>::abi_decode(&output, false) {
            Ok(response) if response == FixedBytes::from(selector) => Ok(()),
            _ => Err(InvalidHookResponse {}.abi_encode()),
        }
    }

    fn account_delta(
        &mut self,
        locker: Address,
        currency: Currency,
        amount: I256,
    ) -> Result<(), Vec<u8>> {
        let previous = self.deltas.get(locker).get(currency);
        let next = previous
            .checked_add(amount)
            .ok_or_else(|| DeltaOverflow {}.abi_encode())?;
        self.deltas.setter(locker).setter(currency).set(next);

        let open = self.nonzero_deltas.get();
        match (previous.is_zero(), next.is_zero()) {
            (true, false) => self.nonzero_deltas.set(open + U256::from(1)),
            (false, true) => self.nonzero_deltas.set(open - U256::from(1)),
            _ => {}
        }
        Ok(())
    }

    fn account_pool_delta(
        &mut self,
        locker: Address,
        key: &PoolKey,
        delta: BalanceDelta,
    ) -> Result<(), Vec<u8>> {
        self.account_delta(locker, key.currency0, signed(delta.amount0)?)?;
        self.account_delta(locker, key.currency1, signed(delta.amount1)?)
    }
}

fn signed<T>(amount: T) -> Result<I256, Vec<u8>>
where
    I256: TryFrom<T>,
{
    I256::try_from(amount).map_err(|_| DeltaOverflow {}.abi_encode())
}

#[cfg(test)]
mod tests {
    use motsu::prelude::*;

    use super::*;
    use crate::uniswap::v4::AccessControlHook;

    #[motsu::test]
    fn reverts_when_mutating_locked_manager(
        manager: Contract<PoolManagerMock>,
        alice: Address,
    ) {
        let key = pool_key(Address::ZERO);
        manager.sender(alice).initialize(key.clone()).motsu_unwrap();

        let err = manager
            .sender(alice)
            .swap(key, swap_params(true, 1), identity(alice))
            .motsu_expect_err("should reject mutation outside a lock");
        assert_eq!(err, ManagerLocked {}.abi_encode());
    }

    #[motsu::test]
    fn reverts_when_pool_is_not_initialized(
        manager: Contract<PoolManagerMock>,
        alice: Address,
    ) {
        manager.sender(alice).force_unlock();

        let err = manager
            .sender(alice)
            .modify_liquidity(
                pool_key(Address::ZERO),
                add_liquidity_params(1),
                identity(alice),
            )
            .motsu_expect_err("should reject unknown pool");
        assert_eq!(err, PoolNotInitialized {}.abi_encode());
    }

    #[motsu::test]
    fn reads_hook_permissions_on_initialize(
        manager: Contract<PoolManagerMock>,
        hook: Contract<AccessControlHook>,
        alice: Address,
    ) {
        let key = pool_key(hook.address());
        manager.sender(alice).initialize(key.clone()).motsu_unwrap();

        let flags = {
            let contract = manager.sender(alice);
            let pool = contract.pools.get(key.to_id());
            [
                pool.initialized.get(),
                pool.before_add_liquidity.get(),
                pool.before_remove_liquidity.get(),
                pool.before_swap.get(),
            ]
        };
        assert_eq!(flags, [true; 4]);

        let err = manager
            .sender(alice)
            .initialize(key)
            .motsu_expect_err("should reject initializing twice");
        assert_eq!(err, PoolAlreadyInitialized {}.abi_encode());
    }

    #[motsu::test]
    fn accounts_settlement_as_delta(
        manager: Contract<PoolManagerMock>,
        alice: Address,
    ) {
        manager.sender(alice).force_unlock();
        manager.sender(alice).mint(CURRENCY0, alice, 10);

        manager
            .sender(alice)
            .settle_from(CURRENCY0, alice, U256::from(4))
            .motsu_unwrap();
        manager
            .sender(alice)
            .take(CURRENCY0, alice, U256::from(1))
            .motsu_unwrap();

        let delta = manager.sender(alice).delta_of(alice, CURRENCY0);
        let balance = manager.sender(alice).balance_of(CURRENCY0, alice);
        let reserves = manager.sender(alice).reserves(CURRENCY0);

        assert_eq!(delta, I256::try_from(3_i64).unwrap());
        assert_eq!(balance, U256::from(7));
        assert_eq!(reserves, U256::from(3));
    }
}
