//! Wave solver entry point.
//!
//! [`WaveSolver::solve`] builds the item→aisle index once, runs the
//! configured [`Strategy`], and reports the chosen wave together with how
//! it was found. The returned wave is re-checked with
//! [`Evaluator::is_feasible`] before it is labeled [`SolveStatus::Feasible`];
//! callers can audit it again with the same evaluator.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use u_metaheur::ga::GaRunner;

use crate::error::ConfigError;
use crate::evaluation::{Evaluator, ItemAisleIndex};
use crate::ga::{GaConfig, OrderChromosome, WaveGaProblem};
use crate::greedy::GreedyConstructor;
use crate::models::{Instance, Wave};
use crate::monitor::TimeBudget;
use crate::ranking::RankingEngine;

/// Which heuristics a solve runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Stock-aware greedy construction only.
    Greedy,
    /// Genetic search from random individuals only.
    Genetic,
    /// Greedy construction, then genetic search seeded with the greedy wave.
    #[default]
    GreedyThenGenetic,
}

/// Solver configuration.
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Heuristics to run.
    pub strategy: Strategy,
    /// Genetic parameters (ignored by [`Strategy::Greedy`]).
    pub ga: GaConfig,
}

impl SolverConfig {
    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the genetic parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }
}

/// Quality of the returned wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The wave passes the exact feasibility check.
    Feasible,
    /// The genetic search found nothing feasible; the wave is its best
    /// individual, reaches the lower bound, and may violate the upper bound
    /// or stock.
    BestEffort,
    /// No wave was found; the returned wave is empty.
    NotFound,
}

/// Heuristic that produced the returned wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveSource {
    /// Greedy constructor.
    Greedy,
    /// Genetic search.
    Genetic,
    /// Nothing was produced.
    None,
}

/// Outcome of [`WaveSolver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Selected orders and visited aisles. Empty when nothing was found.
    pub wave: Wave,
    /// Quality of `wave`.
    pub status: SolveStatus,
    /// Units per visited aisle (0 for the empty wave).
    pub objective: f64,
    /// Heuristic that produced `wave`.
    pub source: SolveSource,
    /// Genetic generations completed (0 when the genetic search did not run).
    pub generations: usize,
    /// Wall time spent in the solve.
    pub elapsed: Duration,
}

impl SolveResult {
    /// Whether the wave passed the exact feasibility check.
    pub fn is_feasible(&self) -> bool {
        self.status == SolveStatus::Feasible
    }
}

/// Candidate wave produced by one heuristic.
struct Candidate {
    wave: Wave,
    objective: f64,
    feasible: bool,
    source: SolveSource,
}

/// Wave-picking solver.
///
/// # Example
/// ```
/// use u_wave::models::{Aisle, Instance, Order};
/// use u_wave::monitor::TimeBudget;
/// use u_wave::solver::{SolveStatus, SolverConfig, Strategy, WaveSolver};
///
/// let instance = Instance::new(2, 5, 10)
///     .with_order(Order::new().with_item(0, 3))
///     .with_order(Order::new().with_item(1, 4))
///     .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5));
///
/// let solver = WaveSolver::new(SolverConfig::default().with_strategy(Strategy::Greedy)).unwrap();
/// let result = solver.solve(&instance, &TimeBudget::unlimited());
/// assert_eq!(result.status, SolveStatus::Feasible);
/// assert!((result.objective - 7.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaveSolver {
    config: SolverConfig,
    greedy: GreedyConstructor,
}

impl WaveSolver {
    /// Creates a solver after validating `config`.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.ga.validate()?;
        Ok(Self {
            config,
            greedy: GreedyConstructor::new(),
        })
    }

    /// Sets the ranking used by the greedy constructor.
    pub fn with_ranking(mut self, ranking: RankingEngine) -> Self {
        self.greedy = self.greedy.with_ranking(ranking);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Selects a wave for `instance` within `budget`.
    pub fn solve(&self, instance: &Instance, budget: &TimeBudget) -> SolveResult {
        let started = Instant::now();
        let index = ItemAisleIndex::build(&instance.aisles);
        debug!(
            "solve: {} orders, {} aisles, {} stocked items, {} index entries",
            instance.order_count(),
            instance.aisle_count(),
            index.stocked_item_count(),
            index.entry_count()
        );

        let greedy = match self.config.strategy {
            Strategy::Genetic => None,
            Strategy::Greedy | Strategy::GreedyThenGenetic => {
                Some(self.run_greedy(instance, &index, budget))
            }
        };

        let mut generations = 0;
        let genetic = match self.config.strategy {
            Strategy::Greedy => None,
            Strategy::Genetic | Strategy::GreedyThenGenetic => {
                let seed_wave = greedy.as_ref().filter(|c| c.feasible).map(|c| &c.wave);
                self.run_genetic(instance, &index, budget, seed_wave)
                    .map(|(c, completed)| {
                        generations = completed;
                        c
                    })
            }
        };

        let chosen = choose(greedy, genetic);
        let result = match chosen {
            Some(c) if c.feasible => SolveResult {
                wave: c.wave,
                status: SolveStatus::Feasible,
                objective: c.objective,
                source: c.source,
                generations,
                elapsed: started.elapsed(),
            },
            Some(c) if !c.wave.is_empty() => {
                warn!(
                    "solve: no feasible wave found, returning best-effort wave of {} orders",
                    c.wave.order_count()
                );
                SolveResult {
                    wave: c.wave,
                    status: SolveStatus::BestEffort,
                    objective: c.objective,
                    source: c.source,
                    generations,
                    elapsed: started.elapsed(),
                }
            }
            _ => SolveResult {
                wave: Wave::empty(),
                status: SolveStatus::NotFound,
                objective: 0.0,
                source: SolveSource::None,
                generations,
                elapsed: started.elapsed(),
            },
        };

        info!(
            "solve: {:?} via {:?}: {} orders, {} aisles, objective {:.4} in {:?}",
            result.status,
            result.source,
            result.wave.order_count(),
            result.wave.aisle_count(),
            result.objective,
            result.elapsed
        );
        result
    }

    fn run_greedy(&self, instance: &Instance, index: &ItemAisleIndex, budget: &TimeBudget) -> Candidate {
        let wave = self.greedy.construct(instance, index, budget);
        candidate(instance, wave, SolveSource::Greedy)
    }

    /// Runs the genetic search; returns the candidate and the generations
    /// completed.
    ///
    /// Yields no candidate when the budget is already spent, when the best
    /// individual cannot reach the lower bound, or when its wave would be
    /// degenerate.
    fn run_genetic(
        &self,
        instance: &Instance,
        index: &ItemAisleIndex,
        budget: &TimeBudget,
        seed_wave: Option<&Wave>,
    ) -> Option<(Candidate, usize)> {
        if budget.is_exhausted() {
            warn!("solve: time budget exhausted before the genetic search");
            return None;
        }

        let config = &self.config.ga;
        let seeds: Vec<OrderChromosome> = seed_wave
            .map(|wave| OrderChromosome::from_wave(instance.order_count(), wave))
            .into_iter()
            .collect();
        let problem = WaveGaProblem::new(instance, index)
            .with_config(config)
            .with_seeds(seeds);

        let result = GaRunner::run(&problem, &config.runner_config(budget));
        debug!(
            "solve: genetic search ran {} generations, best fitness {:.4}{}",
            result.generations,
            result.best_fitness,
            if result.timed_out { " (timed out)" } else { "" }
        );

        if let Some(wave) = problem.decode(&result.best) {
            let c = candidate(instance, wave, SolveSource::Genetic);
            if c.feasible {
                return Some((c, result.generations));
            }
        }

        // every individual is repaired, so a best below the lower bound
        // means no order subset reaches it
        if !problem.reaches_lower_bound(&result.best) {
            debug!("solve: genetic search cannot reach the lower bound");
            return None;
        }
        let wave = problem.decode_lenient(&result.best);
        if wave.is_degenerate() {
            return None;
        }
        Some((candidate(instance, wave, SolveSource::Genetic), result.generations))
    }
}

fn candidate(instance: &Instance, wave: Wave, source: SolveSource) -> Candidate {
    let evaluator = Evaluator::new(instance);
    Candidate {
        feasible: evaluator.is_feasible(&wave),
        objective: evaluator.objective(&wave),
        wave,
        source,
    }
}

/// Feasible beats infeasible; among feasible waves the higher objective
/// wins and ties keep the greedy wave.
fn choose(greedy: Option<Candidate>, genetic: Option<Candidate>) -> Option<Candidate> {
    match (greedy, genetic) {
        (Some(g), Some(x)) => {
            let take_genetic = match (g.feasible, x.feasible) {
                (true, true) => x.objective > g.objective,
                (false, true) => true,
                (true, false) => false,
                (false, false) => g.wave.is_empty(),
            };
            Some(if take_genetic { x } else { g })
        }
        (g, x) => g.or(x),
    }
}
