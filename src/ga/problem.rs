//! Wave-selection GA problem definition.
//!
//! Implements `u_metaheur::ga::GaProblem` over [`OrderChromosome`]s. The
//! order set is encoded; the aisle set is derived at decode time by
//! first-cover assignment: for each item of each selected order, the
//! lowest-indexed aisle whose stock of that item alone covers the order's
//! quantity.
//!
//! First-cover assignment ignores split supply across aisles, so it can
//! miss valid aisle combinations. Fitness never trusts the decoder:
//! every decoded wave is re-checked with [`Evaluator::is_feasible`], so a
//! negative fitness always belongs to a truly feasible wave.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use rand::Rng;
use u_metaheur::ga::GaProblem;

use super::chromosome::{repair_lower_bound, OrderChromosome};
use super::operators::GeneticOperators;
use super::GaConfig;
use crate::evaluation::{Evaluator, ItemAisleIndex};
use crate::models::{Instance, Wave};

/// Fitness of an undecodable or infeasible chromosome.
///
/// Feasible waves score the negated objective, so any feasible wave beats
/// this penalty.
pub const INFEASIBLE_FITNESS: f64 = 1e6;

/// GA problem for selecting a wave.
///
/// Every individual the problem hands to the runner (created, bred or
/// mutated) is repaired toward the lower bound.
///
/// # Example
/// ```
/// use u_metaheur::ga::GaRunner;
/// use u_wave::evaluation::ItemAisleIndex;
/// use u_wave::ga::{GaConfig, WaveGaProblem};
/// use u_wave::models::{Aisle, Instance, Order};
/// use u_wave::monitor::TimeBudget;
///
/// let instance = Instance::new(2, 5, 10)
///     .with_order(Order::new().with_item(0, 3))
///     .with_order(Order::new().with_item(1, 4))
///     .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5));
/// let index = ItemAisleIndex::build(&instance.aisles);
///
/// let config = GaConfig::default().with_population_size(10).with_max_generations(5).with_seed(1);
/// let problem = WaveGaProblem::new(&instance, &index).with_config(&config);
/// let result = GaRunner::run(&problem, &config.runner_config(&TimeBudget::unlimited()));
/// assert!((result.best_fitness + 7.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct WaveGaProblem<'a> {
    instance: &'a Instance,
    index: &'a ItemAisleIndex,
    order_units: Vec<u64>,
    operators: GeneticOperators,
    mutation_rate: f64,
    init_probability: f64,
    seeds: Vec<OrderChromosome>,
    seeds_issued: AtomicUsize,
}

impl<'a> WaveGaProblem<'a> {
    /// Creates a problem with the default operators.
    pub fn new(instance: &'a Instance, index: &'a ItemAisleIndex) -> Self {
        let total = instance.total_demand();
        let init_probability = if total == 0 {
            0.0
        } else {
            (instance.bounds.midpoint() / total as f64).clamp(0.0, 1.0)
        };
        Self {
            instance,
            index,
            order_units: instance.order_units(),
            operators: GeneticOperators::default(),
            mutation_rate: GaConfig::default().mutation_rate,
            init_probability,
            seeds: Vec::new(),
            seeds_issued: AtomicUsize::new(0),
        }
    }

    /// Takes the operators and per-gene mutation rate of `config`.
    pub fn with_config(self, config: &GaConfig) -> Self {
        self.with_operators(GeneticOperators::from_config(config))
            .with_mutation_rate(config.mutation_rate)
    }

    /// Sets the crossover and mutation operators.
    pub fn with_operators(mut self, operators: GeneticOperators) -> Self {
        self.operators = operators;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Chromosomes returned, in order, by the first calls to
    /// `create_individual` before random ones are drawn.
    pub fn with_seeds(mut self, seeds: Vec<OrderChromosome>) -> Self {
        self.seeds = seeds;
        self.seeds_issued = AtomicUsize::new(0);
        self
    }

    /// Per-gene probability used for random initial chromosomes.
    ///
    /// Chosen so that the expected units sit at the middle of the bounds.
    pub fn init_probability(&self) -> f64 {
        self.init_probability
    }

    /// Units per order.
    pub fn order_units(&self) -> &[u64] {
        &self.order_units
    }

    /// Adds random unselected orders until the lower bound is reached.
    pub fn repair<R: Rng>(&self, chromosome: &mut OrderChromosome, rng: &mut R) {
        repair_lower_bound(
            chromosome,
            &self.order_units,
            self.instance.bounds.lower,
            rng,
        );
    }

    /// Whether the selected orders reach the lower bound.
    pub fn reaches_lower_bound(&self, chromosome: &OrderChromosome) -> bool {
        chromosome.units(&self.order_units) >= self.instance.bounds.lower
    }

    /// Decodes a chromosome by first-cover aisle assignment.
    ///
    /// Returns `None` when some selected item has no single aisle covering
    /// its quantity. Genes beyond the order list are ignored.
    pub fn decode(&self, chromosome: &OrderChromosome) -> Option<Wave> {
        let orders = self.known_orders(chromosome);
        let mut aisles = BTreeSet::new();
        for &order in &orders {
            for (item, needed) in self.instance.orders[order].iter() {
                aisles.insert(self.first_cover(item, needed)?);
            }
        }
        Some(Wave::new(orders, aisles))
    }

    /// Like [`decode`](Self::decode), but an item without a first-cover
    /// aisle pulls in every aisle that stocks it.
    ///
    /// Always produces a wave; used to extract best-effort results.
    pub fn decode_lenient(&self, chromosome: &OrderChromosome) -> Wave {
        let orders = self.known_orders(chromosome);
        let mut aisles = BTreeSet::new();
        for &order in &orders {
            for (item, needed) in self.instance.orders[order].iter() {
                match self.first_cover(item, needed) {
                    Some(aisle) => {
                        aisles.insert(aisle);
                    }
                    None => aisles.extend(self.index.aisles_for(item).iter().copied()),
                }
            }
        }
        Wave::new(orders, aisles)
    }

    fn known_orders(&self, chromosome: &OrderChromosome) -> Vec<usize> {
        let count = self.instance.order_count();
        chromosome
            .selected_orders()
            .into_iter()
            .take_while(|&order| order < count)
            .collect()
    }

    /// Lowest-indexed aisle holding at least `needed` of `item`.
    fn first_cover(&self, item: usize, needed: u32) -> Option<usize> {
        self.index
            .aisles_for(item)
            .iter()
            .copied()
            .find(|&aisle| {
                self.instance
                    .aisles
                    .get(aisle)
                    .is_some_and(|stock| stock.quantity(item) >= needed)
            })
    }
}

impl GaProblem for WaveGaProblem<'_> {
    type Individual = OrderChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> OrderChromosome {
        let issued = self.seeds_issued.fetch_add(1, Ordering::Relaxed);
        if let Some(seed) = self.seeds.get(issued) {
            return seed.clone();
        }
        let mut chromosome =
            OrderChromosome::random(self.instance.order_count(), self.init_probability, rng);
        self.repair(&mut chromosome, rng);
        chromosome
    }

    fn evaluate(&self, individual: &OrderChromosome) -> f64 {
        let evaluator = Evaluator::new(self.instance);
        match self.decode(individual) {
            Some(wave) if evaluator.is_feasible(&wave) => -evaluator.objective(&wave),
            _ => INFEASIBLE_FITNESS,
        }
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &OrderChromosome,
        parent2: &OrderChromosome,
        rng: &mut R,
    ) -> Vec<OrderChromosome> {
        let mut child = self.operators.crossover(parent1, parent2, rng);
        self.repair(&mut child, rng);
        vec![child]
    }

    fn mutate<R: Rng>(&self, individual: &mut OrderChromosome, rng: &mut R) {
        self.operators.mutate(individual, self.mutation_rate, rng);
        self.repair(individual, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        debug!("ga: generation {generation}: best fitness {best_fitness:.4}");
    }
}
