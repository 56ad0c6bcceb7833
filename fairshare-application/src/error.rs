use fairshare_domain::{BalanceError, Money, PersonId};
use thiserror::Error;

/// Which stage of the pipeline a zero-sum check ran after.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStage {
    Aggregation,
    Settlement,
}

/// Diagnostic raised when rounding drift exceeds the accepted tolerance.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolationError {
    #[error("balances sum to {sum} after {stage:?}, beyond tolerance {tolerance}")]
    ZeroSum {
        stage: CheckStage,
        sum: Money,
        tolerance: Money,
    },
    #[error("balances after {stage:?} sum beyond the representable range")]
    SumOutOfRange { stage: CheckStage },
    #[error("person {id} keeps {balance} after settlement, beyond tolerance {tolerance}")]
    Unsettled {
        id: PersonId,
        balance: Money,
        tolerance: Money,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Balance(#[from] BalanceError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolationError),
}
