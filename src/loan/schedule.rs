use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{compound_factor, Money, Rate};
use crate::errors::{Result, SimulationError};
use crate::types::RepaymentMethod;
use crate::validation::{ensure_amount, ensure_positive_months, ensure_rate};

/// one month of an amortization schedule, in whole currency units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub month: u32,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
    pub cumulative_interest: Money,
}

/// schedule with its aggregate totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub schedule: Vec<AmortizationRow>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl LoanResult {
    /// the fully repaid loan: no rows, zero totals
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_schedule(schedule: Vec<AmortizationRow>) -> Self {
        let total_interest = schedule.iter().map(|r| r.interest_payment).sum();
        let total_payment = schedule.iter().map(|r| r.total_payment).sum();

        Self {
            schedule,
            total_interest,
            total_payment,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    pub fn term_months(&self) -> u32 {
        self.schedule.len() as u32
    }

    pub fn total_principal(&self) -> Money {
        self.schedule.iter().map(|r| r.principal_payment).sum()
    }

    /// get row for a 1-based month
    pub fn row(&self, month: u32) -> Option<&AmortizationRow> {
        month
            .checked_sub(1)
            .and_then(|i| self.schedule.get(i as usize))
    }

    /// total payment spread evenly over the given number of months, unrounded
    pub fn average_monthly_payment(&self, months: u32) -> Money {
        if months == 0 {
            return Money::ZERO;
        }
        self.total_payment / Decimal::from(months)
    }
}

/// schedule calculator for one repayment method
#[derive(Debug, Clone, Copy)]
pub struct ScheduleCalculator {
    method: RepaymentMethod,
}

impl ScheduleCalculator {
    pub fn new(method: RepaymentMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> RepaymentMethod {
        self.method
    }

    /// calculate full amortization schedule
    pub fn calculate_schedule(
        &self,
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
    ) -> Result<Vec<AmortizationRow>> {
        ensure_amount("principal", principal)?;
        ensure_rate("annual_rate", annual_rate)?;
        ensure_positive_months("term_months", term_months)?;

        let monthly_rate = annual_rate.monthly_rate().as_decimal();

        match self.method {
            RepaymentMethod::EqualPrincipalAndInterest => {
                self.calculate_equal_payments(principal, monthly_rate, term_months)
            }
            RepaymentMethod::EqualPrincipal => {
                self.calculate_equal_principal(principal, monthly_rate, term_months)
            }
            RepaymentMethod::BulletRepayment => {
                self.calculate_bullet(principal, monthly_rate, term_months)
            }
        }
    }

    /// constant total payment; interest on the outstanding balance
    fn calculate_equal_payments(
        &self,
        principal: Money,
        monthly_rate: Decimal,
        term_months: u32,
    ) -> Result<Vec<AmortizationRow>> {
        let payment = level_payment(principal, monthly_rate, term_months)?;
        let rounded_payment = payment.round_to_unit();
        let mut writer = RowWriter::new(principal, term_months);

        for month in 1..=term_months {
            let interest = writer.interest(monthly_rate)?;
            if month == term_months {
                writer.push_final(month, interest)?;
            } else {
                let principal_payment = rounded_payment - interest.round_to_unit();
                writer.push(month, payment - interest, principal_payment, interest)?;
            }
        }

        Ok(writer.finish())
    }

    /// constant principal portion; interest shrinks with the balance
    fn calculate_equal_principal(
        &self,
        principal: Money,
        monthly_rate: Decimal,
        term_months: u32,
    ) -> Result<Vec<AmortizationRow>> {
        let principal_portion = principal / Decimal::from(term_months);
        let principal_payment = principal_portion.round_to_unit();
        let mut writer = RowWriter::new(principal, term_months);

        for month in 1..=term_months {
            let interest = writer.interest(monthly_rate)?;
            if month == term_months {
                writer.push_final(month, interest)?;
            } else {
                writer.push(month, principal_portion, principal_payment, interest)?;
            }
        }

        Ok(writer.finish())
    }

    /// interest only with the whole principal in the final month
    fn calculate_bullet(
        &self,
        principal: Money,
        monthly_rate: Decimal,
        term_months: u32,
    ) -> Result<Vec<AmortizationRow>> {
        let mut writer = RowWriter::new(principal, term_months);

        for month in 1..=term_months {
            let interest = writer.interest(monthly_rate)?;
            if month == term_months {
                writer.push_final(month, interest)?;
            } else {
                writer.push(month, Money::ZERO, Money::ZERO, interest)?;
            }
        }

        Ok(writer.finish())
    }
}

/// Accumulates rows while tracking two balances.
///
/// Interest accrues on the exact outstanding principal. Each row reports a
/// whole-unit principal payment taken off the whole-unit balance, never more
/// than what is left, and the final row pays whatever remains so the reported
/// balance lands on exactly 0.
struct RowWriter {
    rows: Vec<AmortizationRow>,
    outstanding: Money,
    balance: Money,
    interest_exact: Money,
    paid: Money,
}

impl RowWriter {
    fn new(principal: Money, term_months: u32) -> Self {
        Self {
            rows: Vec::with_capacity(term_months as usize),
            outstanding: principal,
            balance: principal.round_to_unit(),
            interest_exact: Money::ZERO,
            paid: Money::ZERO,
        }
    }

    /// this month's interest on the exact outstanding principal, unrounded
    fn interest(&self, monthly_rate: Decimal) -> Result<Money> {
        self.outstanding
            .checked_mul(monthly_rate)
            .ok_or_else(|| SimulationError::too_large("annual_rate"))
    }

    /// record a month repaying `principal_portion` exactly and `principal_payment` as reported
    fn push(
        &mut self,
        month: u32,
        principal_portion: Money,
        principal_payment: Money,
        interest: Money,
    ) -> Result<()> {
        self.outstanding -= principal_portion;
        let principal_payment = principal_payment.min(self.balance).max(Money::ZERO);
        self.write(month, principal_payment, interest)
    }

    /// record the last month, which settles the remaining balance
    fn push_final(&mut self, month: u32, interest: Money) -> Result<()> {
        self.outstanding = Money::ZERO;
        self.write(month, self.balance, interest)
    }

    fn write(&mut self, month: u32, principal_payment: Money, interest: Money) -> Result<()> {
        let interest_payment = interest.round_to_unit();
        let total_payment = principal_payment
            .checked_add(interest_payment)
            .ok_or_else(|| SimulationError::too_large("principal"))?;

        self.balance -= principal_payment;
        self.interest_exact = self
            .interest_exact
            .checked_add(interest)
            .ok_or_else(|| SimulationError::too_large("annual_rate"))?;
        self.paid = self
            .paid
            .checked_add(total_payment)
            .ok_or_else(|| SimulationError::too_large("principal"))?;

        self.rows.push(AmortizationRow {
            month,
            principal_payment,
            interest_payment,
            total_payment,
            remaining_balance: self.balance,
            cumulative_interest: self.interest_exact.round_to_unit(),
        });

        Ok(())
    }

    fn finish(self) -> Vec<AmortizationRow> {
        self.rows
    }
}

/// Level monthly payment, unrounded.
///
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)`, or `P / n` without interest. Fails
/// when `(1 + r)^n` or the numerator leaves the decimal range.
pub fn level_payment(principal: Money, monthly_rate: Decimal, months: u32) -> Result<Money> {
    if months == 0 {
        return Ok(principal);
    }

    let compound = compound_factor(Decimal::ONE + monthly_rate, months)
        .ok_or_else(|| SimulationError::too_large("annual_rate"))?;
    let denominator = compound - Decimal::ONE;

    // rates too small to move the factor behave like no interest
    if monthly_rate.is_zero() || denominator.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let numerator = principal
        .as_decimal()
        .checked_mul(monthly_rate)
        .and_then(|d| d.checked_mul(compound))
        .ok_or_else(|| SimulationError::too_large("principal"))?;

    Ok(Money::from_decimal(numerator / denominator))
}

/// generate the month-by-month schedule
pub fn generate_schedule(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    method: RepaymentMethod,
) -> Result<Vec<AmortizationRow>> {
    ScheduleCalculator::new(method).calculate_schedule(principal, annual_rate, term_months)
}

/// generate the schedule and its totals
pub fn compute_loan(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    method: RepaymentMethod,
) -> Result<LoanResult> {
    let schedule = generate_schedule(principal, annual_rate, term_months, method)?;
    let loan = LoanResult::from_schedule(schedule);

    debug!(
        %method,
        %principal,
        %annual_rate,
        term_months,
        total_interest = %loan.total_interest,
        "loan schedule generated"
    );

    Ok(loan)
}
