//! Contracts built around the Uniswap pool managers.
pub mod v4;
