use helpers::general::{argsort, SortOrder};
use rand::Rng;

/// One named stage of a risk pipeline.
/// * `label` - Human readable cause, used in narrative explanations
/// * `multiplier` - Factor applied to the running probability
/// * `contribution` - Marginal probability added by this stage (negative if it reduced the risk)
#[derive(Debug, Clone, PartialEq)]
pub struct RiskFactor {
    pub label: &'static str,
    pub multiplier: f64,
    pub contribution: f64,
}

/// RiskPipeline composes a probability from a base value and an ordered list of multiplicative
/// stages. The stage order is fixed by the caller, which makes the attribution of every stage's
/// marginal contribution well defined.
#[derive(Debug, Clone)]
pub struct RiskPipeline {
    base: f64,
    probability: f64,
    factors: Vec<RiskFactor>,
}

impl RiskPipeline {
    pub fn new(base: f64) -> RiskPipeline {
        let base = base.max(0.0);
        RiskPipeline {
            base,
            probability: base,
            factors: Vec::new(),
        }
    }

    /// apply multiplies the running probability by the given multiplier and records the marginal
    /// contribution of the stage.
    pub fn apply(&mut self, label: &'static str, multiplier: f64) -> &mut RiskPipeline {
        let multiplier = multiplier.max(0.0);
        let contribution = self.probability * (multiplier - 1.0);
        self.factors.push(RiskFactor {
            label,
            multiplier,
            contribution,
        });
        self.probability *= multiplier;
        self
    }

    /// apply_if applies the stage only if the condition holds.
    pub fn apply_if(
        &mut self,
        condition: bool,
        label: &'static str,
        multiplier: f64,
    ) -> &mut RiskPipeline {
        if condition {
            self.apply(label, multiplier);
        }
        self
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    /// Final probability, limited to [0, 1].
    pub fn probability(&self) -> f64 {
        self.probability.clamp(0.0, 1.0)
    }

    pub fn factors(&self) -> &[RiskFactor] {
        &self.factors
    }

    /// Multiplier of the stage with the given label, if it was applied.
    pub fn multiplier(&self, label: &str) -> Option<f64> {
        self.factors
            .iter()
            .find(|factor| factor.label == label)
            .map(|factor| factor.multiplier)
    }

    /// breakdown returns the stages that increased the probability, ranked by their contribution
    /// (largest first). Stages with equal contributions keep their pipeline order.
    pub fn breakdown(&self) -> Vec<(&'static str, f64)> {
        let positive: Vec<&RiskFactor> = self
            .factors
            .iter()
            .filter(|factor| factor.contribution > 0.0)
            .collect();
        let contributions: Vec<f64> = positive.iter().map(|factor| factor.contribution).collect();

        argsort(&contributions, SortOrder::Descending)
            .into_iter()
            .map(|idx| (positive[idx].label, positive[idx].contribution))
            .collect()
    }

    /// roll draws once against the final probability. The result is final for this race.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen::<f64>() < self.probability()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_marginal_contributions() {
        let mut pipeline = RiskPipeline::new(0.1);
        pipeline
            .apply("a", 2.0)
            .apply("b", 0.5)
            .apply_if(false, "c", 10.0)
            .apply("d", 1.5);

        assert_relative_eq!(pipeline.probability(), 0.15, epsilon = 1e-12);
        let factors = pipeline.factors();
        assert_eq!(factors.len(), 3);
        assert_relative_eq!(factors[0].contribution, 0.1, epsilon = 1e-12);
        assert_relative_eq!(factors[1].contribution, -0.1, epsilon = 1e-12);
        assert_relative_eq!(factors[2].contribution, 0.05, epsilon = 1e-12);
        assert_eq!(pipeline.multiplier("c"), None);
        assert_relative_eq!(pipeline.base(), 0.1);
    }

    #[test]
    fn test_breakdown_ranks_positive_factors_only() {
        let mut pipeline = RiskPipeline::new(0.1);
        pipeline.apply("small", 1.1).apply("neutral", 1.0).apply("big", 3.0);

        let labels: Vec<&str> = pipeline.breakdown().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["big", "small"]);
    }

    #[test]
    fn test_probability_is_clamped() {
        let mut pipeline = RiskPipeline::new(0.8);
        pipeline.apply("huge", 5.0);
        assert_eq!(pipeline.probability(), 1.0);
    }
}
