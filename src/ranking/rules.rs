//! Built-in ranking rules.
//!
//! - **Density**: units per required aisle, highest first.
//! - **LargestFirst**: most units first.
//! - **FewestAisles**: fewest required aisles first.
//!
//! All rules return lower scores for orders that should be tried earlier.

use super::{OrderProfile, RankingRule, RuleScore};

/// Highest units-per-required-aisle first.
///
/// Favors orders that unlock the most units per aisle opened.
#[derive(Debug, Clone, Copy)]
pub struct Density;

impl RankingRule for Density {
    fn name(&self) -> &'static str {
        "DENSITY"
    }

    fn evaluate(&self, profile: &OrderProfile) -> RuleScore {
        -profile.density()
    }

    fn description(&self) -> &'static str {
        "Units per required aisle"
    }
}

/// Largest order (by units) first.
#[derive(Debug, Clone, Copy)]
pub struct LargestFirst;

impl RankingRule for LargestFirst {
    fn name(&self) -> &'static str {
        "LARGEST"
    }

    fn evaluate(&self, profile: &OrderProfile) -> RuleScore {
        -(profile.units as f64)
    }

    fn description(&self) -> &'static str {
        "Largest order first"
    }
}

/// Fewest required aisles first.
#[derive(Debug, Clone, Copy)]
pub struct FewestAisles;

impl RankingRule for FewestAisles {
    fn name(&self) -> &'static str {
        "FEWEST_AISLES"
    }

    fn evaluate(&self, profile: &OrderProfile) -> RuleScore {
        profile.required_aisles as f64
    }

    fn description(&self) -> &'static str {
        "Fewest required aisles first"
    }
}
