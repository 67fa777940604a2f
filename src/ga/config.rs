//! Genetic-algorithm configuration.
//!
//! [`GaConfig`] is the serializable form of a wave GA run. It validates
//! eagerly and converts into the runner parameters of
//! [`u_metaheur::ga::GaConfig`] with [`GaConfig::runner_config`].

use serde::{Deserialize, Serialize};
use u_metaheur::ga::{GaConfig as RunnerConfig, Selection};

use super::operators::{CrossoverType, MutationType};
use crate::error::ConfigError;
use crate::monitor::TimeBudget;

/// Parameters of one genetic run.
///
/// Missing fields fall back to the defaults when deserialized.
///
/// # Example
/// ```
/// use u_wave::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_max_generations(25)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generations to breed.
    pub max_generations: usize,
    /// Probability that a child is bred by crossover rather than cloned.
    pub crossover_rate: f64,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Individuals sampled per tournament.
    pub tournament_size: usize,
    /// Best individuals copied unchanged into the next generation.
    pub elite_count: usize,
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Crossover operator.
    pub crossover_type: CrossoverType,
    /// Mutation operator.
    pub mutation_type: MutationType,
    /// Generations without improvement before stopping. `0` disables it.
    pub stagnation_limit: usize,
    /// Evaluate offspring in parallel.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            tournament_size: 3,
            elite_count: 1,
            seed: None,
            crossover_type: CrossoverType::default(),
            mutation_type: MutationType::default(),
            stagnation_limit: 0,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover_type(mut self, crossover_type: CrossoverType) -> Self {
        self.crossover_type = crossover_type;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation_type(mut self, mutation_type: MutationType) -> Self {
        self.mutation_type = mutation_type;
        self
    }

    /// Sets the stagnation limit (`0` disables it).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables parallel offspring evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the parameters describe a runnable configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                population_size: self.population_size,
            });
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        check_probability("mutation_rate", self.mutation_rate)?;
        if self.elite_count >= self.population_size {
            return Err(ConfigError::TooManyElites {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        Ok(())
    }

    /// Runner parameters for a run that must finish within `budget`.
    ///
    /// Elitism is expressed as the ratio that keeps exactly `elite_count`
    /// individuals. The runner mutates every child; the per-gene rate is
    /// applied by the problem's operators. Call [`validate`](Self::validate)
    /// first: the runner panics on invalid parameters.
    pub fn runner_config(&self, budget: &TimeBudget) -> RunnerConfig {
        let elite_ratio = (self.elite_count as f64 + 0.5) / self.population_size.max(1) as f64;
        let mut config = RunnerConfig::default()
            .with_population_size(self.population_size)
            .with_max_generations(self.max_generations)
            .with_selection(Selection::Tournament(self.tournament_size))
            .with_elite_ratio(elite_ratio)
            .with_crossover_rate(self.crossover_rate)
            .with_mutation_rate(1.0)
            .with_stagnation_limit(self.stagnation_limit)
            .with_convergence_threshold(0.0)
            .with_parallel(self.parallel);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(remaining) = budget.remaining() {
            let ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX);
            config = config.with_time_limit_ms(ms.max(1));
        }
        config
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::{Duration, Instant};

    #[test]
    fn test_defaults() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.tournament_size, 3);
        assert_eq!(config.elite_count, 1);
        assert_eq!(config.crossover_type, CrossoverType::Uniform);
        assert_eq!(config.mutation_type, MutationType::BitFlip);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case::empty_population(
        GaConfig::default().with_population_size(0),
        ConfigError::PopulationTooSmall { population_size: 0 }
    )]
    #[case::single_individual(
        GaConfig::default().with_population_size(1),
        ConfigError::PopulationTooSmall { population_size: 1 }
    )]
    #[case::no_generations(GaConfig::default().with_max_generations(0), ConfigError::NoGenerations)]
    #[case::empty_tournament(GaConfig::default().with_tournament_size(0), ConfigError::EmptyTournament)]
    #[case::crossover_above_one(
        GaConfig::default().with_crossover_rate(1.2),
        ConfigError::ProbabilityOutOfRange { name: "crossover_rate", value: 1.2 }
    )]
    #[case::negative_mutation(
        GaConfig::default().with_mutation_rate(-0.1),
        ConfigError::ProbabilityOutOfRange { name: "mutation_rate", value: -0.1 }
    )]
    #[case::elites_fill_population(
        GaConfig::default().with_population_size(4).with_elite_count(4),
        ConfigError::TooManyElites { elite_count: 4, population_size: 4 }
    )]
    fn test_validate_rejects(#[case] config: GaConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[rstest]
    #[case(2, 0)]
    #[case(2, 1)]
    #[case(49, 1)]
    #[case(100, 1)]
    #[case(100, 10)]
    #[case(1000, 999)]
    fn test_runner_keeps_elite_count(#[case] population_size: usize, #[case] elite_count: usize) {
        let config = GaConfig::default()
            .with_population_size(population_size)
            .with_elite_count(elite_count);
        let runner = config.runner_config(&TimeBudget::unlimited());
        assert!(runner.validate().is_ok());
        let kept = (runner.population_size as f64 * runner.elite_ratio) as usize;
        assert_eq!(kept, elite_count);
    }

    #[test]
    fn test_runner_config_mapping() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(12)
            .with_tournament_size(4)
            .with_crossover_rate(0.7)
            .with_mutation_rate(0.02)
            .with_seed(9);
        let runner = config.runner_config(&TimeBudget::unlimited());
        assert_eq!(runner.population_size, 30);
        assert_eq!(runner.max_generations, 12);
        assert_eq!(runner.selection, Selection::Tournament(4));
        assert!((runner.crossover_rate - 0.7).abs() < 1e-12);
        // per-gene rate stays with the operators
        assert!((runner.mutation_rate - 1.0).abs() < 1e-12);
        assert_eq!(runner.seed, Some(9));
        assert_eq!(runner.time_limit_ms, None);
        assert!(!runner.parallel);
    }

    #[test]
    fn test_runner_time_limit_from_budget() {
        let budget = TimeBudget::new(Duration::from_secs(30));
        let runner = GaConfig::default().runner_config(&budget);
        let limit = runner.time_limit_ms.unwrap();
        assert!(limit > 29_000 && limit <= 30_000);

        let spent = TimeBudget::starting_at(
            Instant::now() - Duration::from_millis(50),
            Duration::from_millis(10),
        );
        let runner = GaConfig::default().runner_config(&spent);
        assert_eq!(runner.time_limit_ms, Some(1));
        assert!(runner.validate().is_ok());
    }

    #[test]
    fn test_nan_rate_rejected() {
        let config = GaConfig::default().with_mutation_rate(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { name: "mutation_rate", .. })
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GaConfig =
            serde_json::from_str(r#"{"population_size": 12, "seed": 3}"#).unwrap();
        assert_eq!(config.population_size, 12);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.max_generations, 100);
        assert!((config.crossover_rate - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_operator_types_serialize() {
        let config = GaConfig::default()
            .with_crossover_type(CrossoverType::OnePoint)
            .with_mutation_type(MutationType::Exchange);
        let json = serde_json::to_string(&config).unwrap();
        let back: GaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
