use super::crossover::breed;
use super::individual::{IdGen, Individual};
use super::initialization::{random_individual, seed_population};
use super::mutation::{effective_mutation_rate, maybe_mutate};
use super::selection::select_parents;
use crate::config::GeneticConfig;
use crate::error::{KeResult, KeyEvolveError};
use crate::fitness::Evaluator;
use crate::geometry::KeyboardGeometry;
use crate::layouts::{all_layouts, Layout};
use fastrand::Rng;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Best-fitness change below which a generation counts as stagnant.
pub const STAGNATION_EPSILON: f64 = 0.0001;

pub struct OptimizationResult {
    pub best: Individual,
    pub generations: usize,
    pub elapsed: Duration,
    pub stagnated: bool,
    /// Best fitness per generation, generation zero first.
    pub history: Vec<f64>,
}

pub struct GenerationReport<'a> {
    pub generation: usize,
    pub best: &'a Individual,
    pub stagnation: usize,
    /// Rate that will be applied when breeding the next generation.
    pub mutation_rate: f64,
}

/// Observer for the generational loop. It cannot stop a run; only the
/// generation and stagnation limits do.
pub trait ProgressCallback: Send + Sync {
    fn on_generation(&self, report: &GenerationReport<'_>);
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_generation(&self, _report: &GenerationReport<'_>) {}
}

pub struct GeneticOptimizer {
    evaluator: Arc<Evaluator>,
    keyboard: Arc<KeyboardGeometry>,
    config: GeneticConfig,
    seeds: Vec<Layout>,
    pool: rayon::ThreadPool,
}

impl GeneticOptimizer {
    pub fn new(
        evaluator: Arc<Evaluator>,
        keyboard: Arc<KeyboardGeometry>,
        config: GeneticConfig,
    ) -> KeResult<Self> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads())
            .build()?;

        Ok(Self {
            evaluator,
            keyboard,
            config,
            seeds: all_layouts(),
            pool,
        })
    }

    /// Replaces the canonical seed library. Every seed must be a
    /// permutation of the first one.
    pub fn with_seeds(mut self, seeds: Vec<Layout>) -> KeResult<Self> {
        let Some(first) = seeds.first() else {
            return Err(KeyEvolveError::Config(
                "seed library must not be empty".to_string(),
            ));
        };
        if first.has_duplicates() {
            return Err(KeyEvolveError::Config(format!(
                "seed '{}' repeats a character",
                first.name
            )));
        }
        if let Some(bad) = seeds.iter().find(|s| !s.is_permutation_of(first)) {
            return Err(KeyEvolveError::Config(format!(
                "seed '{}' is not a permutation of '{}'",
                bad.name, first.name
            )));
        }
        self.seeds = seeds;
        Ok(self)
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        seed: Option<u64>,
        callback: CB,
    ) -> KeResult<OptimizationResult> {
        let cfg = &self.config;
        let start_time = Instant::now();
        let mut rng = seed.map(Rng::with_seed).unwrap_or_else(Rng::new);
        let mut ids = IdGen::default();

        // 1. Generation zero
        let mut population = seed_population(&self.seeds, cfg.population_size, &mut ids, &mut rng);
        self.evaluate(&mut population);
        rank(&mut population);

        let mut history = vec![best_fitness(&population)];
        let mut stagnation = 0usize;
        let mut generation = 0usize;
        self.report(&callback, &population, generation, stagnation);

        // 2. Main loop
        while generation < cfg.max_generations && stagnation < cfg.stagnation_limit {
            let rate = effective_mutation_rate(cfg.mutation_rate, stagnation);
            generation += 1;

            population = self.next_generation(&population, generation, rate, &mut ids, &mut rng);
            self.evaluate(&mut population);
            rank(&mut population);

            history.push(best_fitness(&population));
            stagnation = track_stagnation(&history, stagnation);

            debug!(
                "Gen {:4} | Best: {:.5} | Stagnant: {:3} | Mut: {:.3}",
                generation,
                history[history.len() - 1],
                stagnation,
                rate
            );
            self.report(&callback, &population, generation, stagnation);
        }

        let stagnated = stagnation >= cfg.stagnation_limit;
        let elapsed = start_time.elapsed();
        info!(
            "🏁 Finished after {} generations in {:.2?} ({})",
            generation,
            elapsed,
            if stagnated {
                "stagnated"
            } else {
                "generation limit"
            }
        );

        let best = population
            .into_iter()
            .next()
            .filter(Individual::is_evaluated)
            .ok_or_else(|| {
                KeyEvolveError::Invariant(
                    "run finished without an evaluated best individual".to_string(),
                )
            })?;

        Ok(OptimizationResult {
            best,
            generations: generation,
            elapsed,
            stagnated,
            history,
        })
    }

    /// Scores every unevaluated individual on the worker pool. Each task
    /// writes only its own slot; the call returns once the batch is done.
    fn evaluate(&self, population: &mut [Individual]) {
        let evaluator = &self.evaluator;
        let keyboard = &self.keyboard;

        self.pool.install(|| {
            population
                .par_iter_mut()
                .filter(|ind| !ind.is_evaluated())
                .for_each(|ind| {
                    let result = evaluator.evaluate(&ind.layout, keyboard);
                    ind.set_result(result);
                });
        });
    }

    fn next_generation(
        &self,
        current: &[Individual],
        generation: usize,
        mutation_rate: f64,
        ids: &mut IdGen,
        rng: &mut Rng,
    ) -> Vec<Individual> {
        let cfg = &self.config;
        let elite = cfg.elite_count.min(current.len());
        let slots = cfg.population_size.saturating_sub(elite);

        let mut next: Vec<Individual> = Vec::with_capacity(cfg.population_size);
        next.extend_from_slice(&current[..elite]);

        // Selecting + Breeding
        let parents = select_parents(&current[elite..], cfg.tournament_size, slots, rng);
        let offspring = breed(&parents, cfg.offspring_per_pair, rng);

        // Mutating
        let children: Vec<Individual> = offspring
            .into_iter()
            .map(|child| {
                let (chars, _) = maybe_mutate(child.chars, mutation_rate, rng);
                let id = ids.next_id();
                let layout = Layout::new(format!("gen{}-{}", generation, id), chars);
                Individual::new(id, Arc::new(layout), generation, child.parents.to_vec())
            })
            .collect();

        // Replacing
        next.extend(children.into_iter().take(slots));
        if let Some(template) = self.seeds.first() {
            while next.len() < cfg.population_size {
                next.push(random_individual(template, generation, ids, rng));
            }
        }

        next
    }

    fn report<CB: ProgressCallback>(
        &self,
        callback: &CB,
        population: &[Individual],
        generation: usize,
        stagnation: usize,
    ) {
        if let Some(best) = population.first() {
            callback.on_generation(&GenerationReport {
                generation,
                best,
                stagnation,
                mutation_rate: effective_mutation_rate(self.config.mutation_rate, stagnation),
            });
        }
    }
}

/// Stable descending sort by fitness; unevaluated counts as zero.
pub fn rank(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness_or_zero().total_cmp(&a.fitness_or_zero()));
}

fn best_fitness(population: &[Individual]) -> f64 {
    population.first().map_or(0.0, Individual::fitness_or_zero)
}

/// Next stagnation counter given the fitness history (latest entry last).
pub fn track_stagnation(history: &[f64], counter: usize) -> usize {
    match history {
        [.., prev, last] if (last - prev).abs() < STAGNATION_EPSILON => counter + 1,
        [.., _, _] => 0,
        _ => counter,
    }
}
