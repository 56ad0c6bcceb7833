use crate::model::{Balance, MONEY_SCALE, Money};
use rust_decimal::Decimal;

/// Accepted drift from exact zero caused by rounding each share to cents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tolerance(Money);

impl Tolerance {
    pub const DEFAULT: Self = Self(Money::from_decimal(Decimal::from_parts(
        5,
        0,
        0,
        false,
        MONEY_SCALE,
    )));

    /// Negative bounds are folded to their magnitude.
    pub fn new(bound: Money) -> Self {
        Self(bound.abs())
    }

    pub fn bound(self) -> Money {
        self.0
    }

    pub fn contains(self, amount: Money) -> bool {
        amount.abs() <= self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sum of all balances. Exact zero only when no share needed rounding.
///
/// `None` when the running sum leaves the range of `Decimal`.
pub fn zero_sum_drift(balances: &[Balance]) -> Option<Money> {
    balances
        .iter()
        .try_fold(Money::ZERO, |sum, balance| sum.checked_add(balance.balance))
}
