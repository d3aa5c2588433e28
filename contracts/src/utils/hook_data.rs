//! Encoding of the requesting account into hook data.
//!
//! A pool manager only ever reports its immediate caller to a hook. When
//! requests are relayed, the account that originated the request travels
//! alongside the mutation as `hookData`: the ABI encoding of a single
//! `address`. It is encoded once by the relay and decoded once by the hook.
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolValue;

/// Length of hook data carrying one account.
pub const ENCODED_ACCOUNT_LEN: usize = 32;

/// Left padding of an address within its ABI word.
const ACCOUNT_PADDING_LEN: usize = 12;

/// Encodes `account` as hook data.
#[must_use]
pub fn encode_account(account: Address) -> Bytes {
    account.abi_encode().into()
}

/// Decodes the account carried by `hook_data`.
///
/// Returns `None` unless `hook_data` is exactly one ABI-encoded address, i.e.
/// one 32-byte word with the upper 12 bytes cleared.
#[must_use]
pub fn decode_account(hook_data: &[u8]) -> Option<Address> {
    if hook_data.len() != ENCODED_ACCOUNT_LEN
        || hook_data[..ACCOUNT_PADDING_LEN].iter().any(|byte| *byte != 0)
    {
        return None;
    }

    Address::abi_decode(hook_data, false).ok()
}
