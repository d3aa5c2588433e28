//! Settlement of the deltas a mutation leaves with the pool manager.
//!
//! Every currency is settled independently: a negative delta is collected
//! from the account into the pool, a positive one is released from the pool
//! to the account, and a zero delta moves nothing. Both legs run inside the
//! same lock, so a failing leg fails the whole request.
use alloy_primitives::{Address, U256};
use stylus_sdk::{
    call::{self, Call},
    prelude::TopLevelStorage,
};

use crate::uniswap::v4::{BalanceDelta, Currency, Flow, IPoolManager, PoolKey};

/// Clears `delta`, left by the calling contract on the pool identified by
/// `key`, against the assets of `account`.
///
/// The calling contract never holds the assets: they move directly between
/// `account` and the pool.
///
/// # Arguments
///
/// * `storage` - Write access to the calling contract's state.
/// * `manager` - The unlocked pool manager.
/// * `key` - The key for the pool.
/// * `account` - The account paying or receiving.
/// * `delta` - The delta to clear.
///
/// # Errors
///
/// Returns the [`call::Error`] of the first transfer that fails.
pub fn settle(
    storage: &mut impl TopLevelStorage,
    manager: &IPoolManager,
    key: &PoolKey,
    account: Address,
    delta: BalanceDelta,
) -> Result<(), call::Error> {
    let (flow0, flow1) = delta.flows();
    settle_currency(storage, manager, key.currency0, account, flow0)?;
    settle_currency(storage, manager, key.currency1, account, flow1)
}

fn settle_currency(
    storage: &mut impl TopLevelStorage,
    manager: &IPoolManager,
    currency: Currency,
    account: Address,
    flow: Flow,
) -> Result<(), call::Error> {
    match flow {
        Flow::PayIn(amount) => manager.settle_from(
            Call::new_in(storage),
            currency,
            account,
            U256::from(amount),
        ),
        Flow::PayOut(amount) => manager.take(
            Call::new_in(storage),
            currency,
            account,
            U256::from(amount),
        ),
        Flow::Zero => Ok(()),
    }
}
