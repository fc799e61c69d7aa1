use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::ops::Range;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{InterestType, TaxType};

use super::deposit::{validate_deposit, DepositCalculator};

/// after-tax interest earned by the end of `month`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulationPoint {
    pub month: u32,
    pub cumulative_net_interest: Money,
}

/// Month-by-month growth of a deposit.
///
/// Every point is evaluated from the closed formula at its own month, so any
/// point can be read on its own and iteration can be restarted freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyAccumulation {
    calculator: DepositCalculator,
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
}

impl MonthlyAccumulation {
    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// point for a 1-based month within the term
    pub fn at(&self, month: u32) -> Option<AccumulationPoint> {
        if month == 0 || month > self.term_months {
            return None;
        }

        let cumulative_net_interest = self
            .calculator
            .net_interest(self.principal, self.annual_rate, month)
            .ok()?;

        Some(AccumulationPoint {
            month,
            cumulative_net_interest,
        })
    }

    /// fresh iterator over months 1..=term
    pub fn iter(&self) -> AccumulationIter {
        AccumulationIter {
            source: *self,
            months: 1..self.term_months + 1,
        }
    }

    pub fn last(&self) -> Option<AccumulationPoint> {
        self.at(self.term_months)
    }
}

impl IntoIterator for &MonthlyAccumulation {
    type Item = AccumulationPoint;
    type IntoIter = AccumulationIter;

    fn into_iter(self) -> AccumulationIter {
        self.iter()
    }
}

/// lazy iterator produced by [`MonthlyAccumulation::iter`]
#[derive(Debug, Clone)]
pub struct AccumulationIter {
    source: MonthlyAccumulation,
    months: Range<u32>,
}

impl Iterator for AccumulationIter {
    type Item = AccumulationPoint;

    fn next(&mut self) -> Option<AccumulationPoint> {
        self.months.next().and_then(|m| self.source.at(m))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.months.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<AccumulationPoint> {
        self.months.nth(n).and_then(|m| self.source.at(m))
    }
}

impl DoubleEndedIterator for AccumulationIter {
    fn next_back(&mut self) -> Option<AccumulationPoint> {
        self.months.next_back().and_then(|m| self.source.at(m))
    }
}

impl ExactSizeIterator for AccumulationIter {}

impl FusedIterator for AccumulationIter {}

/// cumulative after-tax interest for each month of the term
pub fn monthly_accumulation(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    tax_type: TaxType,
    interest_type: InterestType,
) -> Result<MonthlyAccumulation> {
    validate_deposit(principal, annual_rate, term_months)?;

    let calculator = DepositCalculator::new(interest_type, tax_type);
    // growth only increases with the month, so the whole term fits if the last month does
    calculator.net_interest(principal, annual_rate, term_months)?;

    Ok(MonthlyAccumulation {
        calculator,
        principal,
        annual_rate,
        term_months,
    })
}
