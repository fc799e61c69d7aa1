pub mod prepayment;
pub mod refinance;
pub mod schedule;

pub use prepayment::{simulate_prepayment, PrepaymentResult};
pub use refinance::{break_even_month, simulate_refinance, RefinanceResult};
pub use schedule::{
    compute_loan, generate_schedule, level_payment, AmortizationRow, LoanResult, ScheduleCalculator,
};
