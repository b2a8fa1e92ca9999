use super::individual::Individual;
use fastrand::Rng;
use std::collections::HashSet;

/// Chance of inheriting parent A's character at a position.
pub const PARENT_A_BIAS: f64 = 0.75;

/// Biased uniform crossover with permutation repair.
///
/// Each position takes parent A's character with probability
/// `PARENT_A_BIAS` unless the child already holds it. Remaining positions
/// are filled, in index order, with parent B's unused characters in
/// shuffled order. Parents are expected to be permutations of the same set.
pub fn crossover_biased(p1: &[char], p2: &[char], rng: &mut Rng) -> Vec<char> {
    let len = p1.len();
    let mut child: Vec<Option<char>> = vec![None; len];
    let mut used: HashSet<char> = HashSet::with_capacity(len);

    // 1. Inherit from A
    for (slot, &gene) in child.iter_mut().zip(p1) {
        if rng.f64() < PARENT_A_BIAS && !used.contains(&gene) {
            used.insert(gene);
            *slot = Some(gene);
        }
    }

    // 2. Repair from B
    let mut remaining: Vec<char> = p2.iter().copied().filter(|c| !used.contains(c)).collect();
    rng.shuffle(&mut remaining);

    // A's leftovers only matter if the parents disagree on the character set
    let mut fill = remaining.into_iter().chain(p1.iter().copied());
    for slot in child.iter_mut().filter(|s| s.is_none()) {
        *slot = fill.by_ref().find(|c| used.insert(*c));
    }

    child.into_iter().flatten().collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offspring {
    pub chars: Vec<char>,
    pub parents: [u64; 2],
}

/// Breeds `offspring_per_pair` children from each consecutive parent pair.
/// A child identical to one already produced in this call is dropped; the
/// guard does not look at the existing population.
pub fn breed(parents: &[&Individual], offspring_per_pair: usize, rng: &mut Rng) -> Vec<Offspring> {
    let mut seen: HashSet<Vec<char>> = HashSet::new();
    let mut children = Vec::with_capacity(parents.len() / 2 * offspring_per_pair);

    for pair in parents.chunks_exact(2) {
        let (a, b) = (pair[0], pair[1]);
        for _ in 0..offspring_per_pair {
            let chars = crossover_biased(&a.layout.chars, &b.layout.chars, rng);
            if seen.insert(chars.clone()) {
                children.push(Offspring {
                    chars,
                    parents: [a.id, b.id],
                });
            }
        }
    }

    children
}
