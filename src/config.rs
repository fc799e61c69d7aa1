use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{InvalidReason, Result, SimulationError};

/// default band within which two alternatives count as equal
pub const SIMILARITY_THRESHOLD: i64 = 10_000;

/// inclusive numeric bounds; `max` of `None` is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

impl Bounds {
    pub const fn at_least(min: Decimal) -> Self {
        Self { min, max: None }
    }

    pub const fn between(min: Decimal, max: Decimal) -> Self {
        Self { min, max: Some(max) }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }

    /// check a value, naming the field in the error
    pub fn check(&self, name: &'static str, value: Decimal) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(SimulationError::invalid(
                name,
                InvalidReason::OutOfRange { min: self.min, max: self.max },
            ))
        }
    }
}

/// the shared rules table for every numeric input
///
/// Rates are percentages; months are whole months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    pub loan_balance: Bounds,
    pub rate: Bounds,
    pub savings_rate: Bounds,
    pub months: Bounds,
    pub prepayment_fee_rate: Bounds,
    pub cost: Bounds,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            loan_balance: Bounds::at_least(Decimal::ZERO),
            rate: Bounds::between(Decimal::ZERO, dec!(30)),
            savings_rate: Bounds::between(Decimal::ZERO, dec!(15)),
            months: Bounds::between(Decimal::ONE, dec!(480)),
            prepayment_fee_rate: Bounds::between(Decimal::ZERO, dec!(5)),
            cost: Bounds::at_least(Decimal::ZERO),
        }
    }
}

impl ValidationRules {
    fn all(&self) -> [(&'static str, &Bounds); 6] {
        [
            ("loan_balance", &self.loan_balance),
            ("rate", &self.rate),
            ("savings_rate", &self.savings_rate),
            ("months", &self.months),
            ("prepayment_fee_rate", &self.prepayment_fee_rate),
            ("cost", &self.cost),
        ]
    }
}

/// simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulatorConfig {
    pub similarity_threshold: Money,
    pub validation: ValidationRules,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: Money::from_major(SIMILARITY_THRESHOLD),
            validation: ValidationRules::default(),
        }
    }
}

impl SimulatorConfig {
    /// parse from JSON; missing sections take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// reject negative thresholds and inverted or negative bounds
    pub fn validate(&self) -> Result<()> {
        if self.similarity_threshold.is_negative() {
            return Err(SimulationError::invalid(
                "similarity_threshold",
                InvalidReason::NonNegativeFiniteRequired,
            ));
        }

        for (name, bounds) in self.validation.all() {
            if bounds.min < Decimal::ZERO {
                return Err(SimulationError::invalid(name, InvalidReason::NonNegativeFiniteRequired));
            }
            if let Some(max) = bounds.max {
                if max < bounds.min {
                    return Err(SimulationError::invalid(
                        name,
                        InvalidReason::OutOfRange { min: bounds.min, max: bounds.max },
                    ));
                }
            }
        }

        if self.validation.months.min < Decimal::ONE || !self.validation.months.min.fract().is_zero() {
            return Err(SimulationError::invalid("months", InvalidReason::PositiveIntegerRequired));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_table() {
        let rules = ValidationRules::default();
        assert!(rules.rate.contains(dec!(30)));
        assert!(!rules.rate.contains(dec!(30.01)));
        assert!(rules.savings_rate.contains(dec!(15)));
        assert!(!rules.months.contains(Decimal::ZERO));
        assert!(rules.months.contains(dec!(480)));
        assert!(!rules.months.contains(dec!(481)));
        assert!(rules.cost.contains(Decimal::from(1_000_000_000)));
        assert!(!rules.prepayment_fee_rate.contains(dec!(5.1)));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.similarity_threshold, Money::from_major(10_000));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimulatorConfig::from_json(r#"{ "similarityThreshold": "5000" }"#).unwrap();
        assert_eq!(config.similarity_threshold, Money::from_major(5_000));
        assert_eq!(config.validation, ValidationRules::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulatorConfig::default();
        let parsed = SimulatorConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = SimulatorConfig::default();
        config.validation.rate = Bounds::between(dec!(10), dec!(5));
        let err = config.validate().unwrap_err();
        assert_eq!(err.argument(), "rate");

        let mut config = SimulatorConfig::default();
        config.validation.months = Bounds::between(Decimal::ZERO, dec!(480));
        assert_eq!(
            config.validate().unwrap_err().reason(),
            InvalidReason::PositiveIntegerRequired
        );
    }

    #[test]
    fn test_bounds_check_reports_range() {
        let err = Bounds::between(Decimal::ZERO, dec!(30)).check("loan_rate", dec!(31)).unwrap_err();
        assert_eq!(
            err.reason(),
            InvalidReason::OutOfRange { min: Decimal::ZERO, max: Some(dec!(30)) }
        );
    }
}
