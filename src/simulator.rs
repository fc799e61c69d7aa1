use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::comparison::{compare_prepayment_and_savings, ComparisonResult};
use crate::config::SimulatorConfig;
use crate::errors::Result;
use crate::loan::{simulate_refinance, RefinanceResult};
use crate::recommendation::RecommendationEngine;
use crate::types::{RefinanceInput, RefinanceRecommendation, SimulatorInput};
use crate::validation::{validate_refinance_input, validate_simulator_input};

/// refinance result with its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceOutcome {
    pub result: RefinanceResult,
    pub recommendation: RefinanceRecommendation,
}

/// Entry point for both decisions.
///
/// Inputs are checked against the configured rules table before any
/// calculation runs, then judged with the configured similarity threshold.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    engine: RecommendationEngine,
}

impl Simulator {
    /// build from a config, rejecting one that fails [`SimulatorConfig::validate`]
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let engine = RecommendationEngine::new(config.similarity_threshold);
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// prepay `extra_funds` or deposit it for `remaining_months`
    pub fn compare(&self, input: &SimulatorInput) -> Result<ComparisonResult> {
        validate_simulator_input(input, &self.config.validation)?;
        compare_prepayment_and_savings(input, &self.engine)
    }

    /// move the current balance into the new loan or keep it
    pub fn refinance(&self, input: &RefinanceInput) -> Result<RefinanceOutcome> {
        validate_refinance_input(input, &self.config.validation)?;

        let result = simulate_refinance(input)?;
        let recommendation = self.engine.refinance(result.net_benefit);

        debug!(net_benefit = %result.net_benefit, ?recommendation, "refinance judged");

        Ok(RefinanceOutcome { result, recommendation })
    }
}
