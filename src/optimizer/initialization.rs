use super::individual::{IdGen, Individual};
use crate::layouts::Layout;
use fastrand::Rng;
use std::sync::Arc;

/// Builds generation zero: up to half the population from the canonical
/// library (in library order), the rest as uniform shuffles of the first
/// library entry's character set.
pub fn seed_population(
    library: &[Layout],
    population_size: usize,
    ids: &mut IdGen,
    rng: &mut Rng,
) -> Vec<Individual> {
    let Some(template) = library.first() else {
        return Vec::new();
    };

    let canonical = (population_size / 2).min(library.len());
    let mut population = Vec::with_capacity(population_size);

    for layout in &library[..canonical] {
        population.push(Individual::new(
            ids.next_id(),
            Arc::new(layout.clone()),
            0,
            Vec::new(),
        ));
    }

    while population.len() < population_size {
        population.push(random_individual(template, 0, ids, rng));
    }

    population
}

pub fn random_individual(
    template: &Layout,
    generation: usize,
    ids: &mut IdGen,
    rng: &mut Rng,
) -> Individual {
    let id = ids.next_id();
    let layout = template.shuffled(format!("random-{}", id), rng);
    Individual::new(id, Arc::new(layout), generation, Vec::new())
}
