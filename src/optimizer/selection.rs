use super::individual::Individual;
use fastrand::Rng;

/// Draws `min(size, pool.len())` distinct contenders uniformly and returns
/// the fittest. Ties go to the contender drawn first.
pub fn tournament<'a>(pool: &'a [Individual], size: usize, rng: &mut Rng) -> &'a Individual {
    debug_assert!(!pool.is_empty());
    let n = pool.len();
    let k = size.clamp(1, n);

    // Partial Fisher-Yates: the first k entries are a uniform distinct sample
    let mut idx: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.usize(i..n);
        idx.swap(i, j);
    }

    let mut best = &pool[idx[0]];
    for &i in &idx[1..k] {
        if pool[i].fitness_or_zero() > best.fitness_or_zero() {
            best = &pool[i];
        }
    }
    best
}

/// Runs tournaments (with replacement across tournaments) until there are
/// enough parents to pair off `slots` children, rounded up to an even count.
pub fn select_parents<'a>(
    pool: &'a [Individual],
    tournament_size: usize,
    slots: usize,
    rng: &mut Rng,
) -> Vec<&'a Individual> {
    if pool.is_empty() {
        return Vec::new();
    }
    let count = slots + slots % 2;
    (0..count)
        .map(|_| tournament(pool, tournament_size, rng))
        .collect()
}
