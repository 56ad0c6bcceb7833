pub mod balance_aggregator;
pub mod settlement_planner;
pub mod tolerance;

pub use balance_aggregator::BalanceAggregator;
pub use settlement_planner::SettlementPlanner;
pub use tolerance::{Tolerance, zero_sum_drift};
