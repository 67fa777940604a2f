//! Rule engine for multi-criteria order ranking.
//!
//! Composes ranking rules in sequential (primary → tie-breakers) or
//! weighted mode. The final tie-break is always the ascending order index,
//! so identical input always produces an identical ranking.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, OrderProfile, RankingRule, RuleScore};

/// How multiple rules are combined.
#[derive(Debug, Clone, Default)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use the next rule only on ties.
    #[default]
    Sequential,
    /// Compare the weighted sum of all rule scores.
    Weighted,
}

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn RankingRule>,
    weight: f64,
}

/// A composable rule engine for order ranking.
///
/// An engine with no rules ranks by order index alone.
///
/// # Example
/// ```
/// use u_wave::ranking::{rules, OrderProfile, RankingEngine};
///
/// let profiles = vec![
///     OrderProfile { order: 0, units: 4, required_aisles: 4 },
///     OrderProfile { order: 1, units: 6, required_aisles: 2 },
/// ];
/// let ranked = RankingEngine::default().rank(&profiles);
/// assert_eq!(ranked[0].order, 1);
/// ```
#[derive(Clone)]
pub struct RankingEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    epsilon: f64,
}

impl RankingEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            epsilon: 1e-9,
        }
    }

    /// Adds a primary rule (weight 1.0).
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 1.0,
        });
        self
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: RankingRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Adds a tie-breaking rule (weight 0.0, only consulted in Sequential mode).
    pub fn with_tie_breaker<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 0.0,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the tie tolerance.
    ///
    /// In sequential mode scores are snapped to multiples of `epsilon`
    /// before comparing, so scores in the same bucket tie. `0.0` compares
    /// raw scores.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.abs();
        self
    }

    /// Returns the profiles sorted by rank (first = tried first).
    pub fn rank(&self, profiles: &[OrderProfile]) -> Vec<OrderProfile> {
        let mut ranked = profiles.to_vec();
        match &self.mode {
            EvaluationMode::Sequential => {
                ranked.sort_by(|a, b| self.compare_sequential(a, b));
            }
            EvaluationMode::Weighted => {
                ranked.sort_by(|a, b| {
                    self.weighted_score(a)
                        .total_cmp(&self.weighted_score(b))
                        .then(a.order.cmp(&b.order))
                });
            }
        }
        ranked
    }

    /// Scores from each rule for one profile, weight applied.
    pub fn evaluate(&self, profile: &OrderProfile) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(profile) * wr.weight)
            .collect()
    }

    fn compare_sequential(&self, a: &OrderProfile, b: &OrderProfile) -> Ordering {
        for wr in &self.rules {
            let key_a = self.quantize(wr.rule.evaluate(a));
            let key_b = self.quantize(wr.rule.evaluate(b));

            match key_a.total_cmp(&key_b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        a.order.cmp(&b.order)
    }

    /// Bucket index of `score`; keeps the comparison a total order.
    fn quantize(&self, score: RuleScore) -> f64 {
        if self.epsilon > 0.0 {
            (score / self.epsilon).round()
        } else {
            score
        }
    }

    fn weighted_score(&self, profile: &OrderProfile) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(profile) * wr.weight)
            .sum()
    }
}

impl Default for RankingEngine {
    /// Density ranking.
    fn default() -> Self {
        Self::new().with_rule(rules::Density)
    }
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .finish()
    }
}
