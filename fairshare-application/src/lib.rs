#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod invariants;
pub mod model;
pub mod processor;

pub use error::{CheckStage, InvariantViolationError, ProcessError};
pub use invariants::{check_settled, check_zero_sum};
pub use model::{Ledger, SettlementReport};
pub use processor::LedgerProcessor;
