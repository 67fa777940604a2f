//! Order-inclusion bit-vector chromosome.
//!
//! # Encoding
//!
//! Gene `i` is `true` when order `i` is in the wave. The aisle set is not
//! encoded; it is derived when the chromosome is decoded (see
//! [`WaveGaProblem::decode`](super::WaveGaProblem::decode)).

use rand::Rng;
use u_metaheur::ga::Individual;

use crate::models::Wave;

/// Bit-vector chromosome over the instance's orders.
///
/// Lower fitness = better wave (minimization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderChromosome {
    /// Inclusion flag per order.
    pub genes: Vec<bool>,
    /// Fitness value (lower = better).
    pub fitness: f64,
}

impl Individual for OrderChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl OrderChromosome {
    /// A chromosome selecting no order.
    pub fn empty(order_count: usize) -> Self {
        Self {
            genes: vec![false; order_count],
            fitness: f64::INFINITY,
        }
    }

    /// Encodes the orders of `wave`. Out-of-range orders are ignored.
    pub fn from_wave(order_count: usize, wave: &Wave) -> Self {
        let mut chromosome = Self::empty(order_count);
        for &order in &wave.orders {
            if let Some(gene) = chromosome.genes.get_mut(order) {
                *gene = true;
            }
        }
        chromosome
    }

    /// Sets each gene independently with probability `p` (clamped to [0, 1]).
    pub fn random<R: Rng>(order_count: usize, p: f64, rng: &mut R) -> Self {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        Self {
            genes: (0..order_count).map(|_| rng.random_bool(p)).collect(),
            fitness: f64::INFINITY,
        }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Indices of selected orders, ascending.
    pub fn selected_orders(&self) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(order, &on)| on.then_some(order))
            .collect()
    }

    /// Number of selected orders.
    pub fn selected_count(&self) -> usize {
        self.genes.iter().filter(|&&on| on).count()
    }

    /// Total units of the selected orders.
    pub fn units(&self, order_units: &[u64]) -> u64 {
        self.genes
            .iter()
            .zip(order_units)
            .filter(|(&on, _)| on)
            .map(|(_, &units)| units)
            .sum()
    }
}

// ======================== Crossover Operators ========================

/// Uniform crossover: each gene comes from either parent with equal
/// probability.
pub fn uniform_crossover<R: Rng>(
    p1: &OrderChromosome,
    p2: &OrderChromosome,
    rng: &mut R,
) -> OrderChromosome {
    let genes = p1
        .genes
        .iter()
        .zip(&p2.genes)
        .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
        .collect();
    OrderChromosome {
        genes,
        fitness: f64::INFINITY,
    }
}

/// One-point crossover: genes before a random cut come from `p1`, the rest
/// from `p2`.
pub fn one_point_crossover<R: Rng>(
    p1: &OrderChromosome,
    p2: &OrderChromosome,
    rng: &mut R,
) -> OrderChromosome {
    let n = p1.len().min(p2.len());
    if n < 2 {
        return OrderChromosome {
            genes: p1.genes.clone(),
            fitness: f64::INFINITY,
        };
    }
    let cut = rng.random_range(1..n);
    let mut genes = p1.genes[..cut].to_vec();
    genes.extend_from_slice(&p2.genes[cut..n]);
    OrderChromosome {
        genes,
        fitness: f64::INFINITY,
    }
}

// ======================== Mutation Operators ========================

/// Flips each gene independently with probability `rate`.
pub fn bit_flip_mutation<R: Rng>(chromosome: &mut OrderChromosome, rate: f64, rng: &mut R) {
    for gene in chromosome.genes.iter_mut() {
        if rng.random_bool(rate) {
            *gene = !*gene;
        }
    }
}

/// With probability `rate` per selected order, swaps it for a random
/// unselected order. Keeps the selected count unchanged.
pub fn exchange_mutation<R: Rng>(chromosome: &mut OrderChromosome, rate: f64, rng: &mut R) {
    let selected = chromosome.selected_orders();
    let mut unselected: Vec<usize> = chromosome
        .genes
        .iter()
        .enumerate()
        .filter_map(|(order, &on)| (!on).then_some(order))
        .collect();

    for out in selected {
        if unselected.is_empty() {
            break;
        }
        if !rng.random_bool(rate) {
            continue;
        }
        let k = rng.random_range(0..unselected.len());
        let into = unselected[k];
        chromosome.genes[out] = false;
        chromosome.genes[into] = true;
        unselected[k] = out;
    }
}

// ======================== Repair ========================

/// Selects random unselected orders until the selected units reach `lower`
/// or no unselected order remains.
///
/// Neither the upper bound nor stock is enforced here.
pub fn repair_lower_bound<R: Rng>(
    chromosome: &mut OrderChromosome,
    order_units: &[u64],
    lower: u64,
    rng: &mut R,
) {
    let mut units = chromosome.units(order_units);
    if units >= lower {
        return;
    }

    let mut pool: Vec<usize> = chromosome
        .genes
        .iter()
        .enumerate()
        .filter_map(|(order, &on)| (!on).then_some(order))
        .collect();

    while units < lower && !pool.is_empty() {
        let order = pool.swap_remove(rng.random_range(0..pool.len()));
        chromosome.genes[order] = true;
        units += order_units.get(order).copied().unwrap_or(0);
    }
}
