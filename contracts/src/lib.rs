/*!
# Credential-gated pools

Contracts restricting who may trade on, or provide liquidity to, Uniswap V4
style pools, based on role credentials held in an ERC-1155 style registry.

Every mutation of a gated pool goes through a [`uniswap::v4::PoolOperator`]:
users request a swap or a liquidity change from the operator, which unlocks
the pool manager and performs the mutation with the user's identity attached
as hook data. The pool's [`uniswap::v4::AccessControlHook`] accepts mutations
relayed by that operator only, and only for users holding the matching
credential ([`access::EXCHANGE_ROLE`] for swaps, [`access::LIQUIDITY_ROLE`]
for liquidity changes). The operator then settles the resulting deltas
directly against the user's assets.

Both are Stylus contracts: callers are identified with `msg::sender()`, and
revert data raised anywhere along a request, e.g. by the hook, reaches the
user unchanged.

## Usage

Deploy the operator with the pool manager's address, the hook with the
addresses of the pool manager, the operator and the registry, and initialize
pools with the hook. Users then call the operator:

```ignore
use credential_gated_pool::uniswap::v4::{PoolOperator, SwapParams};

// `user` holds the exchange credential.
let delta = operator.sender(user).request_exchange(key, params)?;
```
*/

#![allow(clippy::pub_underscore_fields, clippy::module_name_repetitions)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod access;
pub mod uniswap;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
