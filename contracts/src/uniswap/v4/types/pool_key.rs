use alloy_primitives::keccak256;
use alloy_sol_types::{sol, SolValue};
use stylus_sdk::abi::{AbiType, ConstString};

use super::PoolId;

sol! {
    /// Returns the key for identifying a pool.
    #[derive(Debug, PartialEq, Eq, Hash)]
    struct PoolKey {
        /// The lower currency of the pool, sorted numerically.
        address currency0;
        /// The higher currency of the pool, sorted numerically.
        address currency1;
        /// The pool LP fee, capped at 1_000_000.
        /// If the highest bit is 1, the pool has a dynamic fee and
        /// must be exactly equal to 0x800000.
        uint24 fee;
        /// Ticks that involve positions must be a multiple of tick spacing.
        int24 tickSpacing;
        /// The hooks of the pool.
        address hooks;
    }
}

// Canonical tuple type, so `#[public]` selectors match the Solidity ABI.
impl AbiType for PoolKey {
    type SolType = Self;

    const ABI: ConstString =
        ConstString::new("(address,address,uint24,int24,address)");
}

impl PoolKey {
    /// Returns the [`PoolId`] of the pool identified by this key.
    #[must_use]
    pub fn to_id(&self) -> PoolId {
        keccak256(self.abi_encode())
    }
}

impl From<PoolKey> for PoolId {
    fn from(value: PoolKey) -> Self {
        value.to_id()
    }
}
