use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Number of fractional digits every balance and share is rounded to.
pub const MONEY_SCALE: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_cents(cents: i64) -> Self {
        Self::new(cents, MONEY_SCALE)
    }

    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// `None` when the sum leaves the range of `Decimal`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn signum(self) -> i64 {
        if self.0.is_zero() {
            0
        } else if self.0.is_sign_negative() {
            -1
        } else {
            1
        }
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.signum() > 0
    }

    pub fn is_negative(self) -> bool {
        self.signum() < 0
    }

    /// Rounds to cents, half away from zero (0.005 -> 0.01, -0.005 -> -0.01).
    pub fn round2(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Divides evenly into `parts` shares and rounds the share to cents.
    ///
    /// Returns `None` when `parts` is zero.
    pub fn split_share(self, parts: usize) -> Option<Self> {
        let divisor = Decimal::from(u64::try_from(parts).ok()?);
        let share = self.0.checked_div(divisor)?;
        Some(Self(share).round2())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

impl Person {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: PersonId(id),
            name: name.into(),
        }
    }
}

/// A shared cost fronted by `payer_id` and split evenly among `participant_ids`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub participant_ids: Vec<PersonId>,
    pub payer_id: PersonId,
    pub cost: Money,
}

impl Expense {
    pub fn new<I>(name: impl Into<String>, participant_ids: I, payer_id: u64, cost: Money) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self {
            name: name.into(),
            participant_ids: participant_ids.into_iter().map(PersonId).collect(),
            payer_id: PersonId(payer_id),
            cost,
        }
    }

    /// The rounded share owed by each participant, or `None` without participants.
    pub fn share(&self) -> Option<Money> {
        self.cost.split_share(self.participant_ids.len())
    }
}

/// Net position of a person: positive is owed money, negative owes money.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub id: PersonId,
    pub name: String,
    pub balance: Money,
}

/// One leg of a settlement. `id` is always the counterparty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: PersonId,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub id: PersonId,
    pub name: String,
    pub balance: Money,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incoming: Vec<Transfer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outgoing: Vec<Transfer>,
}

impl SettlementResult {
    pub fn incoming_total(&self) -> Money {
        self.incoming.iter().map(|transfer| transfer.amount).sum()
    }

    pub fn outgoing_total(&self) -> Money {
        self.outgoing.iter().map(|transfer| transfer.amount).sum()
    }
}
