use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, SimulationError};
use crate::loan::{simulate_prepayment, PrepaymentResult};
use crate::recommendation::RecommendationEngine;
use crate::savings::{calculate_savings, SavingsResult};
use crate::types::{ComparisonRecommendation, SimulatorInput};

/// prepaying a lump sum against depositing it for the remaining term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub prepayment: PrepaymentResult,
    pub savings: SavingsResult,
    /// prepayment net benefit minus savings net interest
    pub difference: Money,
    pub recommendation: ComparisonRecommendation,
}

/// Run both options on `extra_funds` over `remaining_months` and pick one.
///
/// Only numeric sanity is checked here; range rules are applied by
/// [`crate::simulator::Simulator`].
pub fn compare_prepayment_and_savings(
    input: &SimulatorInput,
    engine: &RecommendationEngine,
) -> Result<ComparisonResult> {
    let extra_funds = Money::from_decimal(input.extra_funds);

    let prepayment = simulate_prepayment(
        Money::from_decimal(input.loan_balance),
        Rate::from_percent(input.loan_rate),
        input.remaining_months,
        input.repayment_method,
        extra_funds,
        Rate::from_percent(input.prepayment_fee_rate),
    )?;

    let savings = calculate_savings(
        extra_funds,
        Rate::from_percent(input.savings_rate),
        input.remaining_months,
        input.tax_type,
        input.interest_type,
    )?;

    let difference = prepayment
        .net_benefit
        .checked_sub(savings.net_interest)
        .ok_or_else(|| SimulationError::too_large("extra_funds"))?;
    let recommendation = engine.compare(difference);

    debug!(
        prepayment_benefit = %prepayment.net_benefit,
        savings_interest = %savings.net_interest,
        %difference,
        ?recommendation,
        "prepayment compared with savings"
    );

    Ok(ComparisonResult {
        prepayment,
        savings,
        difference,
        recommendation,
    })
}
