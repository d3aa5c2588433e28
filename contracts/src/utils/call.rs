//! Helpers for calls between contracts.
//!
//! Calls into other contracts are made with [`stylus_sdk::call::call`] and
//! fail with a [`call::Error`]. A contract relaying such a call reports the
//! callee's revert data to its own caller untouched, so the reason stays
//! recoverable at any layer.
use alloc::vec::Vec;

use stylus_sdk::call;

/// Computes the 4-byte selector of the Solidity function `signature`, e.g.
/// `"transfer(address,uint256)"`, at compile time.
#[must_use]
pub const fn function_selector(signature: &str) -> [u8; 4] {
    let hash =
        keccak_const::Keccak256::new().update(signature.as_bytes()).finalize();
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Returns the revert data to report for a failed call.
///
/// A callee that reverted has its reason propagated as is. Output that could
/// not be decoded is reported as a failure without a reason.
#[must_use]
pub fn revert_data(err: call::Error) -> Vec<u8> {
    match err {
        call::Error::Revert(reason) => reason,
        call::Error::AbiDecodingFailed(_) => Vec::new(),
    }
}
