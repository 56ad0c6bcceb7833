use crate::{
    error::{BalanceError, InvalidExpenseReason, ReferenceRole},
    model::{Balance, Expense, Money, Person, PersonId},
    services::tolerance::{Tolerance, zero_sum_drift},
};
use fxhash::{FxHashMap, FxHashSet};

#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    paid: Money,
    owed: Money,
}

/// Computes each person's net balance from the shared expenses.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// One balance per person, in the order of `people`.
    ///
    /// The payer is credited the full cost. Each participant is debited the
    /// share rounded to cents, and shares are rounded before they are summed,
    /// so the balances only sum to zero within a small rounding drift.
    ///
    /// Every expense is validated before anything is accumulated.
    pub fn compute_balances(
        &self,
        expenses: &[Expense],
        people: &[Person],
    ) -> Result<Vec<Balance>, BalanceError> {
        let known = Self::known_ids(people)?;
        let shares = expenses
            .iter()
            .map(|expense| Self::validate(expense, &known))
            .collect::<Result<Vec<_>, _>>()?;

        let overflow = |expense: &Expense| BalanceError::InvalidExpense {
            expense: expense.name.clone(),
            reason: InvalidExpenseReason::AmountOverflow,
        };
        let mut total = Money::ZERO;
        let mut tallies: FxHashMap<PersonId, Tally> = FxHashMap::default();
        for (expense, share) in expenses.iter().zip(shares) {
            total = total
                .checked_add(expense.cost)
                .ok_or_else(|| overflow(expense))?;
            let payer = tallies.entry(expense.payer_id).or_default();
            payer.paid = payer
                .paid
                .checked_add(expense.cost)
                .ok_or_else(|| overflow(expense))?;
            for id in &expense.participant_ids {
                let tally = tallies.entry(*id).or_default();
                tally.owed = tally
                    .owed
                    .checked_add(share)
                    .ok_or_else(|| overflow(expense))?;
            }
        }

        let balances: Vec<Balance> = people
            .iter()
            .map(|person| {
                let tally = tallies.get(&person.id).copied().unwrap_or_default();
                // Both totals are non-negative and in range, so the difference is too.
                Balance {
                    id: person.id,
                    name: person.name.clone(),
                    balance: (tally.paid - tally.owed).round2(),
                }
            })
            .collect();

        match zero_sum_drift(&balances) {
            Some(drift) if Tolerance::DEFAULT.contains(drift) => {
                tracing::debug!(
                    person_count = people.len(),
                    expense_count = expenses.len(),
                    drift = %drift,
                    "Balances computed"
                );
            }
            Some(drift) => {
                tracing::warn!(
                    person_count = people.len(),
                    expense_count = expenses.len(),
                    drift = %drift,
                    tolerance = %Tolerance::DEFAULT.bound(),
                    "Rounding drift of computed balances exceeds the default tolerance"
                );
            }
            None => {
                tracing::warn!(
                    person_count = people.len(),
                    expense_count = expenses.len(),
                    "Sum of computed balances is out of range"
                );
            }
        }

        Ok(balances)
    }

    fn known_ids(people: &[Person]) -> Result<FxHashSet<PersonId>, BalanceError> {
        let mut known = FxHashSet::default();
        for person in people {
            if !known.insert(person.id) {
                return Err(BalanceError::DuplicatePerson(person.id));
            }
        }
        Ok(known)
    }

    /// Checks one expense and returns its rounded per-participant share.
    fn validate(expense: &Expense, known: &FxHashSet<PersonId>) -> Result<Money, BalanceError> {
        let invalid = |reason| BalanceError::InvalidExpense {
            expense: expense.name.clone(),
            reason,
        };
        let unknown = |id, role| BalanceError::UnknownPersonReference {
            expense: expense.name.clone(),
            id,
            role,
        };

        let share = expense
            .share()
            .ok_or_else(|| invalid(InvalidExpenseReason::NoParticipants))?;
        if !expense.cost.is_positive() {
            return Err(invalid(InvalidExpenseReason::NonPositiveCost(expense.cost)));
        }

        let mut seen = FxHashSet::default();
        for id in &expense.participant_ids {
            if !seen.insert(*id) {
                return Err(invalid(InvalidExpenseReason::DuplicateParticipant(*id)));
            }
        }

        if !known.contains(&expense.payer_id) {
            return Err(unknown(expense.payer_id, ReferenceRole::Payer));
        }
        if let Some(id) = expense.participant_ids.iter().find(|id| !known.contains(*id)) {
            return Err(unknown(*id, ReferenceRole::Participant));
        }

        Ok(share)
    }
}
