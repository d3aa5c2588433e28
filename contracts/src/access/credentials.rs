//! Role credentials checked against an external registry.
//!
//! A credential is a token held in an ERC-1155 style registry: an account
//! holds a role while its balance of the role's token id is non-zero.
//! Credentials are never minted, transferred or burned from this crate, the
//! registry is only ever queried.
use alloy_primitives::{Address, U256};
pub use callable::*;
use stylus_sdk::call::{self, StaticCallContext};

/// Token id of the credential allowing to add and remove liquidity.
pub const LIQUIDITY_ROLE: U256 = U256::from_limbs([1, 0, 0, 0]);

/// Token id of the credential allowing to swap.
pub const EXCHANGE_ROLE: U256 = U256::from_limbs([2, 0, 0, 0]);

/// Roles gating pool mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Required to add or remove liquidity.
    Liquidity,
    /// Required to swap.
    Exchange,
}

impl Role {
    /// Returns the registry token id of this role.
    #[must_use]
    pub const fn id(self) -> U256 {
        match self {
            Role::Liquidity => LIQUIDITY_ROLE,
            Role::Exchange => EXCHANGE_ROLE,
        }
    }
}

mod callable {
    #![allow(missing_docs)]
    #![cfg_attr(coverage_nightly, coverage(off))]

    use alloc::vec;

    use stylus_sdk::prelude::sol_interface;

    sol_interface! {
        /// Read access to an ERC-1155 style credential registry.
        interface ICredentialRegistry {
            function balanceOf(address account, uint256 id) external view returns (uint256);
        }
    }
}

impl ICredentialRegistry {
    /// Returns `true` if `account` holds the credential of `role`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the interface.
    /// * `context` - Context of the call.
    /// * `account` - Account to check.
    /// * `role` - Role whose credential is required.
    ///
    /// # Errors
    ///
    /// Returns the [`call::Error`] of the balance query if the registry
    /// cannot answer it.
    pub fn holds(
        &self,
        context: impl StaticCallContext,
        account: Address,
        role: Role,
    ) -> Result<bool, call::Error> {
        let balance = self.balance_of(context, account, role.id())?;
        Ok(!balance.is_zero())
    }
}
