use fairshare_domain::{Balance, Expense, Person, SettlementResult};
use serde::{Deserialize, Serialize};

/// The records an external collaborator hands in: who shares costs, and what was spent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub people: Vec<Person>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new(people: Vec<Person>, expenses: Vec<Expense>) -> Self {
        Self { people, expenses }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub balances: Vec<Balance>,
    pub settlement: Vec<SettlementResult>,
}

impl SettlementReport {
    pub fn transfer_count(&self) -> usize {
        self.settlement
            .iter()
            .map(|result| result.outgoing.len())
            .sum()
    }
}
