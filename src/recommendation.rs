use crate::config::SIMILARITY_THRESHOLD;
use crate::decimal::Money;
use crate::types::{ComparisonRecommendation, RefinanceRecommendation};

/// maps a signed difference between two options to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationEngine {
    threshold: Money,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Money::from_major(SIMILARITY_THRESHOLD))
    }
}

impl RecommendationEngine {
    /// differences with magnitude up to `threshold` (inclusive) are similar
    pub fn new(threshold: Money) -> Self {
        Self { threshold: threshold.abs() }
    }

    pub fn threshold(&self) -> Money {
        self.threshold
    }

    fn is_similar(&self, amount: Money) -> bool {
        amount.abs() <= self.threshold
    }

    /// positive favours prepaying, negative favours saving
    pub fn compare(&self, difference: Money) -> ComparisonRecommendation {
        if self.is_similar(difference) {
            ComparisonRecommendation::Similar
        } else if difference.is_positive() {
            ComparisonRecommendation::Prepayment
        } else {
            ComparisonRecommendation::Savings
        }
    }

    pub fn refinance(&self, net_benefit: Money) -> RefinanceRecommendation {
        if self.is_similar(net_benefit) {
            RefinanceRecommendation::Similar
        } else if net_benefit.is_positive() {
            RefinanceRecommendation::Refinance
        } else {
            RefinanceRecommendation::Keep
        }
    }
}

/// [`RecommendationEngine::compare`] with the default threshold
pub fn compare_recommendation(difference: Money) -> ComparisonRecommendation {
    RecommendationEngine::default().compare(difference)
}

/// [`RecommendationEngine::refinance`] with the default threshold
pub fn refinance_recommendation(net_benefit: Money) -> RefinanceRecommendation {
    RecommendationEngine::default().refinance(net_benefit)
}
