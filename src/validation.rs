//! input validation
//!
//! Two layers: numeric sanity checks every calculator runs on entry, and the
//! rules-table checks the [`Simulator`](crate::simulator::Simulator) runs on
//! whole input records before any calculator is invoked.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::config::ValidationRules;
use crate::decimal::{Money, Rate};
use crate::errors::{InvalidReason, Result, SimulationError};
use crate::types::{RefinanceInput, SimulatorInput};

pub fn ensure_non_negative(name: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(SimulationError::invalid(name, InvalidReason::NonNegativeFiniteRequired));
    }
    Ok(())
}

pub fn ensure_amount(name: &'static str, amount: Money) -> Result<()> {
    ensure_non_negative(name, amount.as_decimal())
}

pub fn ensure_rate(name: &'static str, rate: Rate) -> Result<()> {
    ensure_non_negative(name, rate.as_decimal())
}

pub fn ensure_positive_months(name: &'static str, months: u32) -> Result<()> {
    if months == 0 {
        return Err(SimulationError::invalid(name, InvalidReason::PositiveIntegerRequired));
    }
    Ok(())
}

/// convert a raw floating amount, rejecting NaN, infinities and negatives
pub fn amount_from_f64(name: &'static str, value: f64) -> Result<Decimal> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::invalid(name, InvalidReason::NonNegativeFiniteRequired));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| SimulationError::invalid(name, InvalidReason::NonNegativeFiniteRequired))
}

/// convert a raw floating term; it must be a whole number of months above zero
pub fn months_from_f64(name: &'static str, value: f64) -> Result<u32> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > u32::MAX as f64 {
        return Err(SimulationError::invalid(name, InvalidReason::PositiveIntegerRequired));
    }
    Ok(value as u32)
}

/// check a prepayment-versus-savings record against the rules table
pub fn validate_simulator_input(input: &SimulatorInput, rules: &ValidationRules) -> Result<()> {
    rules.loan_balance.check("loan_balance", input.loan_balance)?;
    rules.rate.check("loan_rate", input.loan_rate)?;
    check_months(rules, "remaining_months", input.remaining_months)?;
    rules.prepayment_fee_rate.check("prepayment_fee_rate", input.prepayment_fee_rate)?;
    rules.loan_balance.check("extra_funds", input.extra_funds)?;
    rules.savings_rate.check("savings_rate", input.savings_rate)?;
    Ok(())
}

/// check a refinance record against the rules table
pub fn validate_refinance_input(input: &RefinanceInput, rules: &ValidationRules) -> Result<()> {
    rules.loan_balance.check("current_balance", input.current_balance)?;
    rules.rate.check("current_rate", input.current_rate)?;
    check_months(rules, "current_months", input.current_months)?;
    rules.rate.check("new_rate", input.new_rate)?;
    check_months(rules, "new_months", input.new_months)?;
    rules.prepayment_fee_rate.check("prepayment_fee_rate", input.prepayment_fee_rate)?;
    rules.cost.check("stamp_tax", input.stamp_tax)?;
    rules.cost.check("guarantee_fee", input.guarantee_fee)?;
    Ok(())
}

fn check_months(rules: &ValidationRules, name: &'static str, months: u32) -> Result<()> {
    ensure_positive_months(name, months)?;
    rules.months.check(name, Decimal::from(months))
}
