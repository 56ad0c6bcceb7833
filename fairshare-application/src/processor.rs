use crate::{
    error::ProcessError,
    invariants::check_zero_sum,
    model::{Ledger, SettlementReport},
};
use fairshare_domain::{
    Balance, BalanceAggregator, BalanceError, Expense, Person, SettlementPlanner, SettlementResult,
    Tolerance,
};

/// Runs the aggregator and then the planner over one ledger.
pub struct LedgerProcessor {
    aggregator: BalanceAggregator,
    planner: SettlementPlanner,
    tolerance: Tolerance,
    check_invariants: bool,
}

impl LedgerProcessor {
    pub fn new() -> Self {
        Self {
            aggregator: BalanceAggregator,
            planner: SettlementPlanner,
            tolerance: Tolerance::default(),
            check_invariants: false,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// When enabled, `process` rejects balances whose sum drifts beyond the tolerance.
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    pub fn compute_balances(
        &self,
        expenses: &[Expense],
        people: &[Person],
    ) -> Result<Vec<Balance>, BalanceError> {
        self.aggregator.compute_balances(expenses, people)
    }

    pub fn compute_settlement(&self, balances: &[Balance]) -> Vec<SettlementResult> {
        self.planner.compute_settlement(balances)
    }

    pub fn process(&self, ledger: &Ledger) -> Result<SettlementReport, ProcessError> {
        let balances = self.compute_balances(&ledger.expenses, &ledger.people)?;
        if self.check_invariants {
            check_zero_sum(&balances, self.tolerance)?;
        }
        let settlement = self.compute_settlement(&balances);

        let report = SettlementReport {
            balances,
            settlement,
        };
        tracing::info!(
            person_count = ledger.people.len(),
            expense_count = ledger.expenses.len(),
            transfer_count = report.transfer_count(),
            "Ledger settled"
        );
        Ok(report)
    }
}

impl Default for LedgerProcessor {
    fn default() -> Self {
        Self::new()
    }
}
