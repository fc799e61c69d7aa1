use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, SimulationError};
use crate::types::RepaymentMethod;
use crate::validation::{ensure_amount, ensure_positive_months, ensure_rate};

use super::schedule::{compute_loan, LoanResult};

/// original loan against the same loan after a lump-sum prepayment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepaymentResult {
    pub original_loan: LoanResult,
    pub prepaid_loan: LoanResult,
    /// part of the lump sum actually applied, capped at the balance
    pub applied_prepayment: Money,
    pub prepayment_fee: Money,
    pub interest_saved: Money,
    pub net_benefit: Money,
}

impl PrepaymentResult {
    /// the lump sum extinguished the loan
    pub fn is_full_payoff(&self) -> bool {
        self.prepaid_loan.is_empty()
    }
}

/// Simulate applying `extra_funds` to the balance today.
///
/// The prepaid loan keeps the original rate, term and method; only the balance
/// changes. The fee is charged on the applied amount, not on `extra_funds`.
pub fn simulate_prepayment(
    loan_balance: Money,
    annual_rate: Rate,
    remaining_months: u32,
    method: RepaymentMethod,
    extra_funds: Money,
    prepayment_fee_rate: Rate,
) -> Result<PrepaymentResult> {
    ensure_amount("loan_balance", loan_balance)?;
    ensure_rate("annual_rate", annual_rate)?;
    ensure_positive_months("remaining_months", remaining_months)?;
    ensure_amount("extra_funds", extra_funds)?;
    ensure_rate("prepayment_fee_rate", prepayment_fee_rate)?;

    let applied_prepayment = extra_funds.min(loan_balance);
    let new_balance = loan_balance - applied_prepayment;
    let prepayment_fee = applied_prepayment
        .checked_apply_rate(prepayment_fee_rate)
        .ok_or_else(|| SimulationError::too_large("prepayment_fee_rate"))?
        .round_to_unit();

    let original_loan = compute_loan(loan_balance, annual_rate, remaining_months, method)?;

    let prepaid_loan = if new_balance.is_positive() {
        compute_loan(new_balance, annual_rate, remaining_months, method)?
    } else {
        LoanResult::empty()
    };

    let interest_saved = original_loan.total_interest - prepaid_loan.total_interest;
    let net_benefit = interest_saved
        .checked_sub(prepayment_fee)
        .ok_or_else(|| SimulationError::too_large("prepayment_fee_rate"))?;

    debug!(
        %applied_prepayment,
        %prepayment_fee,
        %interest_saved,
        %net_benefit,
        full_payoff = prepaid_loan.is_empty(),
        "prepayment simulated"
    );

    Ok(PrepaymentResult {
        original_loan,
        prepaid_loan,
        applied_prepayment,
        prepayment_fee,
        interest_saved,
        net_benefit,
    })
}
