use alloy_sol_types::sol;
use stylus_sdk::abi::{AbiType, ConstString};

sol! {
    /// Struct representing modify liquidity operation parameters.
    #[derive(Debug, PartialEq, Eq)]
    struct ModifyLiquidityParams {
        /// The lower tick of the position.
        int24 tickLower;
        /// The upper tick of the position.
        int24 tickUpper;
        /// How to modify the liquidity.
        int256 liquidityDelta;
        /// A value to set if you want unique liquidity positions
        /// at the same range.
        bytes32 salt;
    }
}

// Canonical tuple type, so `#[public]` selectors match the Solidity ABI.
impl AbiType for ModifyLiquidityParams {
    type SolType = Self;

    const ABI: ConstString = ConstString::new("(int24,int24,int256,bytes32)");
}

impl ModifyLiquidityParams {
    /// Returns `true` if the modification adds liquidity to the position.
    ///
    /// A zero `liquidityDelta` is not an increase: the pool manager routes it
    /// through the `beforeRemoveLiquidity` hook, e.g. to collect fees.
    #[must_use]
    pub fn is_increase(&self) -> bool {
        self.liquidityDelta.is_positive()
    }
}
