pub mod accumulation;
pub mod deposit;

pub use accumulation::{monthly_accumulation, AccumulationIter, AccumulationPoint, MonthlyAccumulation};
pub use deposit::{calculate_savings, DepositCalculator, SavingsResult, SAVINGS_DP};
