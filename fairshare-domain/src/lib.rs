#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::{BalanceError, InvalidExpenseReason, ReferenceRole};
pub use model::{
    Balance, Expense, MONEY_SCALE, Money, Person, PersonId, SettlementResult, Transfer,
};
pub use services::{BalanceAggregator, SettlementPlanner, Tolerance, zero_sum_drift};

/// Aggregates balances with the default [`BalanceAggregator`].
pub fn compute_balances(
    expenses: &[Expense],
    people: &[Person],
) -> Result<Vec<Balance>, BalanceError> {
    BalanceAggregator.compute_balances(expenses, people)
}

/// Plans the settlement with the default [`SettlementPlanner`].
pub fn compute_settlement(balances: &[Balance]) -> Vec<SettlementResult> {
    SettlementPlanner.compute_settlement(balances)
}
