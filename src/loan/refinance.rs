use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, SimulationError};
use crate::types::RefinanceInput;
use crate::validation::ensure_non_negative;

use super::schedule::{compute_loan, LoanResult};

/// current loan against a replacement loan for the same balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceResult {
    pub current_loan: LoanResult,
    pub new_loan: LoanResult,
    pub total_cost: Money,
    pub interest_saved: Money,
    /// new average monthly payment minus current; negative when payments drop
    pub monthly_payment_diff: Money,
    pub net_benefit: Money,
    /// months of payment reduction needed to recover `total_cost`; 0 when payments do not drop
    pub break_even_month: u32,
}

/// Simulate moving the current balance into a new loan.
///
/// Costs are the prepayment fee on the current balance plus the fixed stamp tax
/// and guarantee fee.
pub fn simulate_refinance(input: &RefinanceInput) -> Result<RefinanceResult> {
    ensure_non_negative("prepayment_fee_rate", input.prepayment_fee_rate)?;
    ensure_non_negative("stamp_tax", input.stamp_tax)?;
    ensure_non_negative("guarantee_fee", input.guarantee_fee)?;

    let balance = Money::from_decimal(input.current_balance);

    let current_loan = compute_loan(
        balance,
        Rate::from_percent(input.current_rate),
        input.current_months,
        input.current_method,
    )?;
    let new_loan = compute_loan(
        balance,
        Rate::from_percent(input.new_rate),
        input.new_months,
        input.new_method,
    )?;

    let prepayment_fee = balance
        .checked_apply_rate(Rate::from_percent(input.prepayment_fee_rate))
        .ok_or_else(|| SimulationError::too_large("prepayment_fee_rate"))?
        .round_to_unit();
    let total_cost = prepayment_fee
        .checked_add(Money::from_decimal(input.stamp_tax))
        .and_then(|cost| cost.checked_add(Money::from_decimal(input.guarantee_fee)))
        .ok_or_else(|| SimulationError::too_large("stamp_tax"))?
        .round_to_unit();

    let interest_saved = current_loan.total_interest - new_loan.total_interest;

    let current_avg = current_loan.average_monthly_payment(input.current_months);
    let new_avg = new_loan.average_monthly_payment(input.new_months);
    let monthly_payment_diff = (new_avg - current_avg).round_to_unit();

    let net_benefit = interest_saved
        .checked_sub(total_cost)
        .ok_or_else(|| SimulationError::too_large("stamp_tax"))?;
    let break_even_month = break_even_month(total_cost, monthly_payment_diff);

    debug!(
        %total_cost,
        %interest_saved,
        %monthly_payment_diff,
        %net_benefit,
        break_even_month,
        "refinance simulated"
    );

    Ok(RefinanceResult {
        current_loan,
        new_loan,
        total_cost,
        interest_saved,
        monthly_payment_diff,
        net_benefit,
        break_even_month,
    })
}

/// months for the payment reduction to cover a one-off cost
///
/// Zero unless the monthly payment decreases.
pub fn break_even_month(total_cost: Money, monthly_payment_diff: Money) -> u32 {
    if !monthly_payment_diff.is_negative() {
        return 0;
    }

    let months: Decimal = (total_cost.as_decimal() / monthly_payment_diff.abs().as_decimal()).ceil();
    months.to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InvalidReason;
    use crate::types::RepaymentMethod;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lower_rate_saves_interest() {
        let result = simulate_refinance(&RefinanceInput::default()).unwrap();

        assert!(result.new_loan.total_interest < result.current_loan.total_interest);
        assert!(result.interest_saved.is_positive());
        assert_eq!(
            result.interest_saved,
            result.current_loan.total_interest - result.new_loan.total_interest
        );
    }

    #[test]
    fn test_total_cost() {
        let result = simulate_refinance(&RefinanceInput::default()).unwrap();

        // 1.4% of 10,000,000 plus 150,000 stamp tax
        assert_eq!(result.total_cost, Money::from_major(290_000));
        assert_eq!(result.net_benefit, result.interest_saved - result.total_cost);
    }

    #[test]
    fn test_monthly_payment_diff_and_break_even() {
        let input = RefinanceInput::default();
        let result = simulate_refinance(&input).unwrap();

        let current_avg = result.current_loan.total_payment / Decimal::from(input.current_months);
        let new_avg = result.new_loan.total_payment / Decimal::from(input.new_months);
        assert_eq!(result.monthly_payment_diff, (new_avg - current_avg).round_to_unit());

        assert!(result.monthly_payment_diff.is_negative());
        let expected = (Decimal::from(290_000) / result.monthly_payment_diff.abs().as_decimal()).ceil();
        assert_eq!(Decimal::from(result.break_even_month), expected);
    }

    #[test]
    fn test_new_loan_takes_current_balance() {
        let input = RefinanceInput {
            new_months: 60,
            new_method: RepaymentMethod::EqualPrincipal,
            ..RefinanceInput::default()
        };
        let result = simulate_refinance(&input).unwrap();

        assert_eq!(result.new_loan.term_months(), 60);
        assert_eq!(result.new_loan.total_principal(), Money::from_decimal(input.current_balance));
        assert_eq!(result.current_loan.total_principal(), Money::from_decimal(input.current_balance));
    }

    #[test]
    fn test_no_break_even_when_payment_rises() {
        // shorter term at a lower rate: less interest but higher monthly payments
        let input = RefinanceInput {
            new_rate: dec!(3.0),
            new_months: 24,
            ..RefinanceInput::default()
        };
        let result = simulate_refinance(&input).unwrap();

        assert!(result.monthly_payment_diff.is_positive());
        assert!(result.net_benefit.is_positive());
        assert_eq!(result.break_even_month, 0);
    }

    #[test]
    fn test_break_even_month() {
        assert_eq!(break_even_month(Money::from_major(290_000), Money::from_major(-14_000)), 21);
        assert_eq!(break_even_month(Money::from_major(280_000), Money::from_major(-14_000)), 20);
        assert_eq!(break_even_month(Money::from_major(290_000), Money::ZERO), 0);
        assert_eq!(break_even_month(Money::from_major(290_000), Money::from_major(500)), 0);
        assert_eq!(break_even_month(Money::ZERO, Money::from_major(-500)), 0);
    }

    #[test]
    fn test_rejects_negative_costs() {
        let input = RefinanceInput { guarantee_fee: dec!(-10), ..RefinanceInput::default() };
        let err = simulate_refinance(&input).unwrap_err();
        assert_eq!(err.argument(), "guarantee_fee");

        let input = RefinanceInput { new_months: 0, ..RefinanceInput::default() };
        let err = simulate_refinance(&input).unwrap_err();
        assert_eq!(err.reason(), InvalidReason::PositiveIntegerRequired);
    }

    #[test]
    fn test_oversized_costs_are_rejected() {
        let input = RefinanceInput {
            stamp_tax: Decimal::MAX,
            guarantee_fee: Decimal::MAX,
            ..RefinanceInput::default()
        };
        let err = simulate_refinance(&input).unwrap_err();
        assert_eq!(err.reason(), InvalidReason::TooLarge);
    }

    #[test]
    fn test_idempotent() {
        let input = RefinanceInput::default();
        assert_eq!(simulate_refinance(&input).unwrap(), simulate_refinance(&input).unwrap());
    }
}
