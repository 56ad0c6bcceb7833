use crate::error::{CheckStage, InvariantViolationError};
use fairshare_domain::{Balance, Money, SettlementResult, Tolerance, zero_sum_drift};

/// Fails when aggregated balances drift from zero by more than `tolerance`.
pub fn check_zero_sum(
    balances: &[Balance],
    tolerance: Tolerance,
) -> Result<(), InvariantViolationError> {
    let Some(sum) = zero_sum_drift(balances) else {
        tracing::warn!(stage = ?CheckStage::Aggregation, "Zero-sum check overflowed");
        return Err(InvariantViolationError::SumOutOfRange {
            stage: CheckStage::Aggregation,
        });
    };
    if tolerance.contains(sum) {
        return Ok(());
    }
    tracing::warn!(
        stage = ?CheckStage::Aggregation,
        sum = %sum,
        tolerance = %tolerance.bound(),
        "Zero-sum check failed"
    );
    Err(InvariantViolationError::ZeroSum {
        stage: CheckStage::Aggregation,
        sum,
        tolerance: tolerance.bound(),
    })
}

/// Fails when settlement leaves any person, or the group, beyond `tolerance`.
pub fn check_settled(
    results: &[SettlementResult],
    tolerance: Tolerance,
) -> Result<(), InvariantViolationError> {
    if let Some(result) = results
        .iter()
        .find(|result| !tolerance.contains(result.balance))
    {
        return Err(InvariantViolationError::Unsettled {
            id: result.id,
            balance: result.balance,
            tolerance: tolerance.bound(),
        });
    }

    let sum = results
        .iter()
        .try_fold(Money::ZERO, |sum, result| sum.checked_add(result.balance))
        .ok_or(InvariantViolationError::SumOutOfRange {
            stage: CheckStage::Settlement,
        })?;
    if !tolerance.contains(sum) {
        return Err(InvariantViolationError::ZeroSum {
            stage: CheckStage::Settlement,
            sum,
            tolerance: tolerance.bound(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairshare_domain::PersonId;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn balances(cents: &[i64]) -> Vec<Balance> {
        cents
            .iter()
            .enumerate()
            .map(|(idx, &amount)| Balance {
                id: PersonId(idx as u64 + 1),
                name: format!("User {}", idx + 1),
                balance: Money::from_cents(amount),
            })
            .collect()
    }

    fn results(cents: &[i64]) -> Vec<SettlementResult> {
        balances(cents)
            .into_iter()
            .map(|balance| SettlementResult {
                id: balance.id,
                name: balance.name,
                balance: balance.balance,
                incoming: Vec::new(),
                outgoing: Vec::new(),
            })
            .collect()
    }

    #[rstest]
    #[case::exact(&[10_000, -10_000])]
    #[case::small_drift(&[10_001, -10_000, 2])]
    #[case::empty(&[])]
    fn accepts_drift_within_tolerance(#[case] cents: &[i64]) {
        assert_eq!(check_zero_sum(&balances(cents), Tolerance::default()), Ok(()));
    }

    #[test]
    fn rejects_drift_beyond_tolerance() {
        let result = check_zero_sum(&balances(&[10_000, -9_990]), Tolerance::default());

        assert_eq!(
            result,
            Err(InvariantViolationError::ZeroSum {
                stage: CheckStage::Aggregation,
                sum: Money::from_cents(10),
                tolerance: Money::from_cents(5),
            })
        );
    }

    #[test]
    fn out_of_range_sum_is_reported() {
        let large = Money::from_decimal(Decimal::from_i128_with_scale(7 * 10_i128.pow(28), 0));
        let mut input = balances(&[0, 0, 0]);
        input[0].balance = large;
        input[1].balance = large;
        input[2].balance = -large;

        assert_eq!(
            check_zero_sum(&input, Tolerance::default()),
            Err(InvariantViolationError::SumOutOfRange {
                stage: CheckStage::Aggregation,
            })
        );
    }

    #[test]
    fn settled_results_pass() {
        assert_eq!(check_settled(&results(&[0, 1, 0]), Tolerance::default()), Ok(()));
    }

    #[test]
    fn unsettled_person_is_reported() {
        let result = check_settled(&results(&[0, -700, 0]), Tolerance::default());

        assert_eq!(
            result,
            Err(InvariantViolationError::Unsettled {
                id: PersonId(2),
                balance: Money::from_cents(-700),
                tolerance: Money::from_cents(5),
            })
        );
    }

    #[test]
    fn accumulated_residuals_are_reported() {
        let result = check_settled(&results(&[4, 4, 4]), Tolerance::default());

        assert!(matches!(
            result,
            Err(InvariantViolationError::ZeroSum {
                stage: CheckStage::Settlement,
                ..
            })
        ));
    }
}
