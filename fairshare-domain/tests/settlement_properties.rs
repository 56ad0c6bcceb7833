use fairshare_domain::{
    Expense, Money, Person, PersonId, compute_balances, compute_settlement, zero_sum_drift,
};
use proptest::prelude::*;

/// Per-share rounding moves each participant by at most half a cent, and the
/// final per-person rounding adds at most half a cent more.
fn drift_bound(expenses: &[Expense], people: &[Person]) -> Money {
    let slots: usize = expenses
        .iter()
        .map(|expense| expense.participant_ids.len())
        .sum();
    let half_cents = i64::try_from(slots + people.len()).unwrap_or(i64::MAX);
    Money::new(half_cents * 5, 3)
}

fn build_input(
    member_count: usize,
    costs: &[i64],
    payer_indexes: &[usize],
    participant_masks: &[u16],
) -> (Vec<Person>, Vec<Expense>) {
    let people: Vec<Person> = (1..=member_count as u64)
        .map(|id| Person::new(id, format!("User {id}")))
        .collect();

    let expenses = costs
        .iter()
        .enumerate()
        .map(|(idx, &cents)| {
            let payer = payer_indexes.get(idx).copied().unwrap_or(0) % member_count;
            let mask = participant_masks.get(idx).copied().unwrap_or(1);
            let mut participants: Vec<u64> = (0..member_count)
                .filter(|bit| mask & (1 << bit) != 0)
                .map(|bit| bit as u64 + 1)
                .collect();
            if participants.is_empty() {
                participants.push(payer as u64 + 1);
            }
            Expense::new(
                format!("Expense {idx}"),
                participants,
                payer as u64 + 1,
                Money::from_cents(cents),
            )
        })
        .collect();

    (people, expenses)
}

proptest! {
    #[test]
    fn balances_sum_to_zero_within_rounding_drift(
        member_count in 1usize..=8,
        costs in prop::collection::vec(1i64..=500_000, 0..=24),
        payer_indexes in prop::collection::vec(0usize..=7, 24),
        participant_masks in prop::collection::vec(0u16..=255, 24),
    ) {
        let (people, expenses) =
            build_input(member_count, &costs, &payer_indexes, &participant_masks);

        let balances = compute_balances(&expenses, &people).expect("generated input is valid");

        prop_assert_eq!(balances.len(), people.len());
        let drift = zero_sum_drift(&balances).expect("generated amounts stay in range");
        prop_assert!(drift.abs() <= drift_bound(&expenses, &people));
    }

    #[test]
    fn settlement_mirrors_every_transfer(
        member_count in 1usize..=8,
        costs in prop::collection::vec(1i64..=500_000, 0..=24),
        payer_indexes in prop::collection::vec(0usize..=7, 24),
        participant_masks in prop::collection::vec(0u16..=255, 24),
    ) {
        let (people, expenses) =
            build_input(member_count, &costs, &payer_indexes, &participant_masks);
        let balances = compute_balances(&expenses, &people).expect("generated input is valid");

        let settlement = compute_settlement(&balances);

        prop_assert_eq!(settlement.len(), balances.len());
        for result in &settlement {
            for transfer in &result.incoming {
                prop_assert!(transfer.amount.is_positive());
                let debtor = settlement
                    .iter()
                    .find(|other| other.id == transfer.id)
                    .expect("counterparty present");
                let mirrored = debtor
                    .outgoing
                    .iter()
                    .filter(|leg| leg.id == result.id && leg.amount == transfer.amount)
                    .count();
                let own = result
                    .incoming
                    .iter()
                    .filter(|leg| leg.id == transfer.id && leg.amount == transfer.amount)
                    .count();
                prop_assert_eq!(mirrored, own);
            }
            for transfer in &result.outgoing {
                let creditor = settlement
                    .iter()
                    .find(|other| other.id == transfer.id)
                    .expect("counterparty present");
                prop_assert!(creditor
                    .incoming
                    .iter()
                    .any(|leg| leg.id == result.id && leg.amount == transfer.amount));
            }
        }
    }

    #[test]
    fn settlement_leaves_only_rounding_residuals(
        member_count in 1usize..=8,
        costs in prop::collection::vec(1i64..=500_000, 0..=24),
        payer_indexes in prop::collection::vec(0usize..=7, 24),
        participant_masks in prop::collection::vec(0u16..=255, 24),
    ) {
        let (people, expenses) =
            build_input(member_count, &costs, &payer_indexes, &participant_masks);
        let balances = compute_balances(&expenses, &people).expect("generated input is valid");
        let bound = drift_bound(&expenses, &people);

        let settlement = compute_settlement(&balances);

        let before = zero_sum_drift(&balances);
        let after: Money = settlement.iter().map(|result| result.balance).sum();
        prop_assert_eq!(before, Some(after));
        for (result, balance) in settlement.iter().zip(&balances) {
            prop_assert_eq!(result.id, balance.id);
            prop_assert!(result.balance.abs() <= bound);
            prop_assert_eq!(
                result.balance,
                balance.balance + result.outgoing_total() - result.incoming_total()
            );
        }
    }

    #[test]
    fn settlement_balances_move_toward_zero(
        balances in prop::collection::vec(-100_000i64..=100_000, 0..=12),
    ) {
        let input: Vec<fairshare_domain::Balance> = balances
            .iter()
            .enumerate()
            .map(|(idx, &cents)| fairshare_domain::Balance {
                id: PersonId(idx as u64 + 1),
                name: format!("User {}", idx + 1),
                balance: Money::from_cents(cents),
            })
            .collect();
        let snapshot = input.clone();

        let settlement = compute_settlement(&input);

        prop_assert_eq!(&input, &snapshot);
        let positives_left = settlement.iter().any(|result| result.balance.is_positive());
        let negatives_left = settlement.iter().any(|result| result.balance.is_negative());
        prop_assert!(!(positives_left && negatives_left));
        for (result, original) in settlement.iter().zip(&input) {
            prop_assert!(result.balance.abs() <= original.balance.abs());
            prop_assert!(result.balance.signum() * original.balance.signum() >= 0);
        }
    }
}
