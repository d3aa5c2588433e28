//! Common utilities shared by the pool operator and its hooks.
pub mod call;
pub mod hook_data;

pub use call::{function_selector, revert_data};
