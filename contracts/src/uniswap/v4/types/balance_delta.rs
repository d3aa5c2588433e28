use core::cmp::Ordering;

use alloy_sol_types::sol;
use stylus_sdk::stylus_proc::AbiType;

sol! {
    /// Net claim of the pool manager against a counterparty after a
    /// mutation, per currency.
    ///
    /// A positive amount is owed by the pool to the counterparty, a negative
    /// amount is owed by the counterparty to the pool.
    #[derive(Debug, Default, Copy, PartialEq, Eq, AbiType)]
    struct BalanceDelta {
        /// Delta of `currency0`.
        int128 amount0;
        /// Delta of `currency1`.
        int128 amount1;
    }
}

impl BalanceDelta {
    /// Delta that requires no settlement.
    pub const ZERO: Self = Self { amount0: 0, amount1: 0 };

    /// Creates a delta from per-currency amounts.
    #[must_use]
    pub const fn new(amount0: i128, amount1: i128) -> Self {
        Self { amount0, amount1 }
    }

    /// Returns `true` if neither currency has to move.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount0 == 0 && self.amount1 == 0
    }

    /// Returns the flows clearing `currency0` and `currency1`.
    #[must_use]
    pub fn flows(&self) -> (Flow, Flow) {
        (Flow::from(self.amount0), Flow::from(self.amount1))
    }
}

/// Movement of a single currency that clears its delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// The counterparty pays this amount into the pool.
    PayIn(u128),
    /// The pool pays this amount out to the counterparty.
    PayOut(u128),
    /// Nothing moves.
    Zero,
}

impl From<i128> for Flow {
    fn from(delta: i128) -> Self {
        match delta.cmp(&0) {
            Ordering::Less => Flow::PayIn(delta.unsigned_abs()),
            Ordering::Greater => Flow::PayOut(delta.unsigned_abs()),
            Ordering::Equal => Flow::Zero,
        }
    }
}
