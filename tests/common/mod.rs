#![allow(dead_code)]

use keyevolve::config::{FitnessConfig, GeneticConfig};
use keyevolve::geometry::{Finger, Hand, KeyNode, KeyboardGeometry};

/// `n` keys on a single row at x = 0..n, all pressed by an index finger.
pub fn line_keyboard(n: usize) -> KeyboardGeometry {
    let keys = (0..n)
        .map(|i| KeyNode {
            id: format!("k{}", i),
            hand: if i < n / 2 { Hand::Left } else { Hand::Right },
            finger: Finger::Index,
            row: 0,
            col: i as i8,
            x: i as f64,
            y: 0.0,
        })
        .collect();
    KeyboardGeometry::new("line", keys).expect("line keyboard is valid")
}

pub fn alphabet() -> String {
    ('a'..='z').collect()
}

pub fn small_genetic() -> GeneticConfig {
    GeneticConfig {
        population_size: 20,
        max_generations: 15,
        tournament_size: 3,
        elite_count: 2,
        stagnation_limit: 50,
        num_threads: Some(2),
        ..Default::default()
    }
}

pub fn short_window() -> FitnessConfig {
    FitnessConfig {
        window_size: 400,
        ..Default::default()
    }
}
