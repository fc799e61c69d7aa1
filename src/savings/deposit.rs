use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{compound_factor, Money, Rate};
use crate::errors::{Result, SimulationError};
use crate::types::{InterestType, TaxType};
use crate::validation::{ensure_amount, ensure_positive_months, ensure_rate};

/// decimal places kept on savings figures
pub const SAVINGS_DP: u32 = 2;

/// lump-sum deposit outcome at maturity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResult {
    pub principal: Money,
    pub gross_interest: Money,
    pub tax: Money,
    pub net_interest: Money,
    pub total_amount: Money,
}

/// interest and tax for a fixed-term deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositCalculator {
    pub interest_type: InterestType,
    pub tax_type: TaxType,
}

impl DepositCalculator {
    pub fn new(interest_type: InterestType, tax_type: TaxType) -> Self {
        Self {
            interest_type,
            tax_type,
        }
    }

    /// pre-tax interest after `months`, unrounded
    ///
    /// Fails when the growth leaves the decimal range.
    pub fn gross_interest(&self, principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
        match self.interest_type {
            InterestType::Simple => {
                let years = Decimal::from(months) / Decimal::from(12);
                principal
                    .checked_apply_rate(annual_rate)
                    .and_then(|yearly| yearly.checked_mul(years))
                    .ok_or_else(|| SimulationError::too_large("principal"))
            }
            InterestType::MonthlyCompound => {
                let base = Decimal::ONE + annual_rate.monthly_rate().as_decimal();
                let factor =
                    compound_factor(base, months).ok_or_else(|| SimulationError::too_large("annual_rate"))?;
                let maturity = principal
                    .checked_mul(factor)
                    .ok_or_else(|| SimulationError::too_large("principal"))?;
                Ok(maturity - principal)
            }
        }
    }

    /// split gross interest into tax and net, unrounded
    pub fn apply_tax(&self, gross_interest: Money) -> (Money, Money) {
        let tax = gross_interest.apply_rate(self.tax_type.tax_rate());
        (tax, gross_interest - tax)
    }

    /// after-tax interest after `months`, rounded to [`SAVINGS_DP`]
    pub fn net_interest(&self, principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
        let gross = self.gross_interest(principal, annual_rate, months)?;
        let (_, net) = self.apply_tax(gross);
        Ok(net.round_dp(SAVINGS_DP))
    }

    pub fn calculate(&self, principal: Money, annual_rate: Rate, months: u32) -> Result<SavingsResult> {
        let gross = self.gross_interest(principal, annual_rate, months)?;
        let (tax, net) = self.apply_tax(gross);
        let total = principal
            .checked_add(net)
            .ok_or_else(|| SimulationError::too_large("principal"))?;

        Ok(SavingsResult {
            principal,
            gross_interest: gross.round_dp(SAVINGS_DP),
            tax: tax.round_dp(SAVINGS_DP),
            net_interest: net.round_dp(SAVINGS_DP),
            total_amount: total.round_dp(SAVINGS_DP),
        })
    }
}

pub(crate) fn validate_deposit(principal: Money, annual_rate: Rate, term_months: u32) -> Result<()> {
    ensure_amount("principal", principal)?;
    ensure_rate("annual_rate", annual_rate)?;
    ensure_positive_months("term_months", term_months)
}

/// deposit `principal` for `term_months` and report interest after tax
pub fn calculate_savings(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    tax_type: TaxType,
    interest_type: InterestType,
) -> Result<SavingsResult> {
    validate_deposit(principal, annual_rate, term_months)?;

    let result = DepositCalculator::new(interest_type, tax_type).calculate(principal, annual_rate, term_months)?;

    debug!(
        %interest_type,
        %tax_type,
        term_months,
        gross_interest = %result.gross_interest,
        net_interest = %result.net_interest,
        "savings calculated"
    );

    Ok(result)
}
