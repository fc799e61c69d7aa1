pub mod comparison;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod recommendation;
pub mod savings;
pub mod simulator;
pub mod store;
pub mod types;
pub mod validation;

// re-export key types
pub use comparison::{compare_prepayment_and_savings, ComparisonResult};
pub use config::{Bounds, SimulatorConfig, ValidationRules, SIMILARITY_THRESHOLD};
pub use decimal::{Money, Rate};
pub use errors::{InvalidReason, Result, SimulationError};
pub use loan::{
    break_even_month, compute_loan, generate_schedule, simulate_prepayment, simulate_refinance,
    AmortizationRow, LoanResult, PrepaymentResult, RefinanceResult, ScheduleCalculator,
};
pub use recommendation::{compare_recommendation, refinance_recommendation, RecommendationEngine};
pub use savings::{calculate_savings, monthly_accumulation, AccumulationPoint, MonthlyAccumulation, SavingsResult};
pub use simulator::{RefinanceOutcome, Simulator};
pub use store::{InputStore, KeyValueStore, MemoryStore, StoreError};
pub use types::{
    ActiveTab, ComparisonRecommendation, InterestType, RefinanceInput, RefinanceRecommendation,
    RepaymentMethod, SimulatorInput, TaxType,
};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
