//! Contracts implementing Uniswap V4 mechanisms.
pub mod hooks;
pub mod operator;
pub mod pool_manager;
pub mod types;

pub use hooks::{access_control::AccessControlHook, IHooks, Permissions};
pub use operator::PoolOperator;
pub use pool_manager::{IPoolManager, IUnlockCallback};
pub use types::*;
