use alloy_sol_types::sol;
use stylus_sdk::abi::{AbiType, ConstString};

sol! {
    /// Struct representing swap parameters.
    #[derive(Debug, PartialEq, Eq)]
    struct SwapParams {
        /// Whether to swap token0 for token1 or vice versa.
        bool zeroForOne;
        /// The desired input amount if negative (exactIn),
        /// or the desired output amount if positive (exactOut).
        int256 amountSpecified;
        /// The sqrt price at which, if reached, the swap will stop executing.
        uint160 sqrtPriceLimitX96;
    }
}

// Canonical tuple type, so `#[public]` selectors match the Solidity ABI.
impl AbiType for SwapParams {
    type SolType = Self;

    const ABI: ConstString = ConstString::new("(bool,int256,uint160)");
}
