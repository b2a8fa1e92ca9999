use fastrand::Rng;

/// Mutation-rate growth per generation of stagnation.
pub const STAGNATION_RATE_STEP: f64 = 0.1;

/// Upper bound on the adaptive mutation rate.
pub const MAX_MUTATION_RATE: f64 = 0.2;

/// `base * (1 + 0.1 * stagnation)`, capped at `MAX_MUTATION_RATE`.
pub fn effective_mutation_rate(base: f64, stagnation: usize) -> f64 {
    (base * (1.0 + stagnation as f64 * STAGNATION_RATE_STEP)).min(MAX_MUTATION_RATE)
}

/// Applies 1-3 random pairwise swaps to a copy of `chars`.
pub fn swap_mutate(chars: &[char], rng: &mut Rng) -> Vec<char> {
    let mut out = chars.to_vec();
    let len = out.len();
    if len < 2 {
        return out;
    }

    let swaps = rng.usize(1..=3);
    for _ in 0..swaps {
        let a = rng.usize(0..len);
        let mut b = rng.usize(0..len - 1);
        if b >= a {
            b += 1;
        }
        out.swap(a, b);
    }
    out
}

/// Mutates with probability `rate`; returns the chromosome and whether it
/// was touched.
pub fn maybe_mutate(chars: Vec<char>, rate: f64, rng: &mut Rng) -> (Vec<char>, bool) {
    if rng.f64() < rate {
        (swap_mutate(&chars, rng), true)
    } else {
        (chars, false)
    }
}
