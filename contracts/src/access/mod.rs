//! Contracts implementing access control mechanisms.
pub mod credentials;

pub use credentials::{
    ICredentialRegistry, Role, EXCHANGE_ROLE, LIQUIDITY_ROLE,
};
