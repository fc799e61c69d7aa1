use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::Rate;

/// repayment method for amortizing loans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepaymentMethod {
    /// constant total payment every month
    EqualPrincipalAndInterest,
    /// constant principal portion, interest on the remaining balance
    EqualPrincipal,
    /// interest only, principal at maturity
    BulletRepayment,
}

impl RepaymentMethod {
    pub const ALL: [RepaymentMethod; 3] = [
        RepaymentMethod::EqualPrincipalAndInterest,
        RepaymentMethod::EqualPrincipal,
        RepaymentMethod::BulletRepayment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPrincipalAndInterest => "equalPrincipalAndInterest",
            RepaymentMethod::EqualPrincipal => "equalPrincipal",
            RepaymentMethod::BulletRepayment => "bulletRepayment",
        }
    }
}

/// taxation regime applied to deposit interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaxType {
    /// 15.4% withholding (14% income tax + 1.4% local)
    Normal,
    TaxFree,
    /// preferential 9.5%
    TaxReduced,
}

impl TaxType {
    pub const ALL: [TaxType; 3] = [TaxType::Normal, TaxType::TaxFree, TaxType::TaxReduced];

    pub fn tax_rate(&self) -> Rate {
        match self {
            TaxType::Normal => Rate::from_decimal(dec!(0.154)),
            TaxType::TaxFree => Rate::ZERO,
            TaxType::TaxReduced => Rate::from_decimal(dec!(0.095)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxType::Normal => "normal",
            TaxType::TaxFree => "taxFree",
            TaxType::TaxReduced => "taxReduced",
        }
    }
}

/// how deposit interest accrues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum InterestType {
    Simple,
    #[default]
    #[serde(alias = "compounding")]
    MonthlyCompound,
}

impl InterestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestType::Simple => "simple",
            InterestType::MonthlyCompound => "monthlyCompound",
        }
    }
}

macro_rules! wire_name_impls {
    ($ty:ty, $name:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant { kind: $name, value: s.to_string() })
            }
        }
    };
}

wire_name_impls!(
    RepaymentMethod,
    "repayment method",
    [
        RepaymentMethod::EqualPrincipalAndInterest,
        RepaymentMethod::EqualPrincipal,
        RepaymentMethod::BulletRepayment,
    ]
);
wire_name_impls!(TaxType, "tax type", [TaxType::Normal, TaxType::TaxFree, TaxType::TaxReduced]);
wire_name_impls!(InterestType, "interest type", [InterestType::Simple, InterestType::MonthlyCompound]);

/// unrecognised wire name for an enumerated input
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// verdict for prepaying versus depositing the same lump sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonRecommendation {
    Prepayment,
    Savings,
    Similar,
}

/// verdict for refinancing versus keeping the current loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefinanceRecommendation {
    Refinance,
    Keep,
    Similar,
}

/// which simulator the caller last had open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ActiveTab {
    #[default]
    Prepayment,
    Refinance,
}

/// prepayment-versus-savings input record
///
/// Rates are percentages (4.5 means 4.5%). Field names follow the persisted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorInput {
    pub loan_balance: Decimal,
    pub loan_rate: Decimal,
    pub remaining_months: u32,
    pub repayment_method: RepaymentMethod,
    pub prepayment_fee_rate: Decimal,
    pub extra_funds: Decimal,
    pub savings_rate: Decimal,
    pub tax_type: TaxType,
    #[serde(default)]
    pub interest_type: InterestType,
}

impl Default for SimulatorInput {
    fn default() -> Self {
        Self {
            loan_balance: Decimal::from(10_000_000),
            loan_rate: dec!(4.5),
            remaining_months: 36,
            repayment_method: RepaymentMethod::EqualPrincipalAndInterest,
            prepayment_fee_rate: dec!(1.4),
            extra_funds: Decimal::from(10_000_000),
            savings_rate: dec!(3.5),
            tax_type: TaxType::Normal,
            interest_type: InterestType::MonthlyCompound,
        }
    }
}

/// refinance input record
///
/// The new loan has no principal of its own: it always takes over `current_balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceInput {
    pub current_balance: Decimal,
    pub current_rate: Decimal,
    pub current_months: u32,
    pub current_method: RepaymentMethod,
    pub new_rate: Decimal,
    pub new_months: u32,
    pub new_method: RepaymentMethod,
    pub prepayment_fee_rate: Decimal,
    pub stamp_tax: Decimal,
    pub guarantee_fee: Decimal,
}

impl Default for RefinanceInput {
    fn default() -> Self {
        Self {
            current_balance: Decimal::from(10_000_000),
            current_rate: dec!(4.5),
            current_months: 36,
            current_method: RepaymentMethod::EqualPrincipalAndInterest,
            new_rate: dec!(3.5),
            new_months: 36,
            new_method: RepaymentMethod::EqualPrincipalAndInterest,
            prepayment_fee_rate: dec!(1.4),
            stamp_tax: Decimal::from(150_000),
            guarantee_fee: Decimal::ZERO,
        }
    }
}
