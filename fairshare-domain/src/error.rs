use crate::model::{Money, PersonId};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidExpenseReason {
    NoParticipants,
    NonPositiveCost(Money),
    DuplicateParticipant(PersonId),
    /// Accumulated totals no longer fit in a `Decimal`.
    AmountOverflow,
}

impl fmt::Display for InvalidExpenseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoParticipants => write!(f, "no participants"),
            Self::NonPositiveCost(cost) => write!(f, "cost must be positive (found {cost})"),
            Self::DuplicateParticipant(id) => write!(f, "participant {id} is listed twice"),
            Self::AmountOverflow => write!(f, "amounts exceed the representable range"),
        }
    }
}

/// Which field of an expense carried an unknown person id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceRole {
    Payer,
    Participant,
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payer => write!(f, "payer"),
            Self::Participant => write!(f, "participant"),
        }
    }
}

/// Failures detected while aggregating balances. No partial output accompanies them.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("invalid expense '{expense}': {reason}")]
    InvalidExpense {
        expense: String,
        reason: InvalidExpenseReason,
    },
    #[error("expense '{expense}' references unknown {role} id {id}")]
    UnknownPersonReference {
        expense: String,
        id: PersonId,
        role: ReferenceRole,
    },
    #[error("person id {0} is declared more than once")]
    DuplicatePerson(PersonId),
}

impl BalanceError {
    pub fn is_invalid_expense(&self) -> bool {
        matches!(self, Self::InvalidExpense { .. })
    }

    pub fn is_unknown_reference(&self) -> bool {
        matches!(self, Self::UnknownPersonReference { .. })
    }

    /// The offending person id, when the failure is tied to one.
    pub fn person_id(&self) -> Option<PersonId> {
        match self {
            Self::InvalidExpense {
                reason: InvalidExpenseReason::DuplicateParticipant(id),
                ..
            }
            | Self::UnknownPersonReference { id, .. }
            | Self::DuplicatePerson(id) => Some(*id),
            Self::InvalidExpense { .. } => None,
        }
    }
}
