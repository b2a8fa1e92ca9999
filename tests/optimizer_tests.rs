mod common;

use common::{alphabet, line_keyboard, short_window, small_genetic};
use keyevolve::config::{FitnessConfig, GeneticConfig};
use keyevolve::error::KeyEvolveError;
use keyevolve::fitness::Evaluator;
use keyevolve::geometry::KeyboardGeometry;
use keyevolve::layouts::Layout;
use keyevolve::optimizer::{
    GenerationReport, GeneticOptimizer, NoProgress, OptimizationResult, ProgressCallback,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(usize, String, f64)>>,
}

impl ProgressCallback for Recorder {
    fn on_generation(&self, report: &GenerationReport<'_>) {
        self.seen.lock().unwrap().push((
            report.generation,
            report.best.layout.as_string(),
            report.best.fitness_or_zero(),
        ));
    }
}

impl ProgressCallback for &Recorder {
    fn on_generation(&self, report: &GenerationReport<'_>) {
        (**self).on_generation(report)
    }
}

fn optimizer(
    fitness: FitnessConfig,
    text: Option<&str>,
    genetic: GeneticConfig,
) -> (GeneticOptimizer, Arc<KeyboardGeometry>) {
    let evaluator = match text {
        Some(t) => Evaluator::with_text(fitness, t).unwrap(),
        None => Evaluator::new(fitness).unwrap(),
    };
    let keyboard = Arc::new(line_keyboard(26));
    let opt = GeneticOptimizer::new(Arc::new(evaluator), keyboard.clone(), genetic).unwrap();
    (opt, keyboard)
}

fn run_small(seed: u64) -> OptimizationResult {
    let genetic = GeneticConfig {
        num_threads: Some(1),
        ..small_genetic()
    };
    let (opt, _) = optimizer(short_window(), None, genetic);
    opt.run(Some(seed), NoProgress).unwrap()
}

#[test]
fn test_every_best_is_a_permutation() {
    let (opt, _) = optimizer(short_window(), None, small_genetic());
    let recorder = Recorder::default();
    let result = opt.run(Some(7), &recorder).unwrap();

    let reference = Layout::from_letters("ref", &alphabet());
    assert!(result.best.layout.is_permutation_of(&reference));
    assert!(result.best.is_evaluated());

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen.len(), result.generations + 1);
    for (generation, layout, _) in seen.iter() {
        let l = Layout::from_letters("seen", layout);
        assert!(l.is_permutation_of(&reference), "gen {}: {}", generation, layout);
    }
}

#[test]
fn test_history_never_drops_with_elites() {
    let (opt, _) = optimizer(short_window(), None, small_genetic());
    let result = opt.run(Some(3), NoProgress).unwrap();

    assert_eq!(result.history.len(), result.generations + 1);
    for pair in result.history.windows(2) {
        assert!(pair[1] >= pair[0], "history dropped: {:?}", pair);
    }
    assert_eq!(
        result.best.fitness_or_zero(),
        *result.history.last().unwrap()
    );
}

#[test]
fn test_flat_landscape_stagnates() {
    // Repeating one character gives every layout identical raw scores.
    let genetic = GeneticConfig {
        max_generations: 1000,
        stagnation_limit: 3,
        ..small_genetic()
    };
    let (opt, _) = optimizer(FitnessConfig::default(), Some("aaaaaaaa"), genetic);
    let result = opt.run(Some(1), NoProgress).unwrap();

    assert!(result.stagnated);
    assert_eq!(result.generations, 3);
    assert_eq!(result.history.len(), 4);
}

#[test]
fn test_generation_limit_stops_run() {
    let genetic = GeneticConfig {
        max_generations: 4,
        ..small_genetic()
    };
    let (opt, _) = optimizer(short_window(), None, genetic);
    let result = opt.run(Some(5), NoProgress).unwrap();

    assert!(!result.stagnated);
    assert_eq!(result.generations, 4);
}

#[test]
fn test_same_seed_single_thread_reproduces() {
    let a = run_small(42);
    let b = run_small(42);
    assert_eq!(a.best.layout.as_string(), b.best.layout.as_string());
    assert_eq!(a.history, b.history);
}

#[test]
fn test_custom_seed_library() {
    let evaluator = Evaluator::with_text(FitnessConfig::default(), "abcabcfedhgbad").unwrap();
    let keyboard = Arc::new(line_keyboard(8));
    let seeds = vec![
        Layout::from_letters("one", "abcdefgh"),
        Layout::from_letters("two", "hgfedcba"),
    ];
    let opt = GeneticOptimizer::new(Arc::new(evaluator), keyboard, small_genetic())
        .unwrap()
        .with_seeds(seeds.clone())
        .unwrap();

    let result = opt.run(Some(9), NoProgress).unwrap();
    assert_eq!(result.best.layout.len(), 8);
    assert!(result.best.layout.is_permutation_of(&seeds[0]));
}

#[test]
fn test_bad_seed_libraries() {
    let make = || {
        let evaluator = Evaluator::new(short_window()).unwrap();
        GeneticOptimizer::new(
            Arc::new(evaluator),
            Arc::new(line_keyboard(26)),
            small_genetic(),
        )
        .unwrap()
    };

    assert!(matches!(
        make().with_seeds(vec![]),
        Err(KeyEvolveError::Config(_))
    ));
    assert!(matches!(
        make().with_seeds(vec![Layout::from_letters("dup", "aabc")]),
        Err(KeyEvolveError::Config(_))
    ));
    assert!(matches!(
        make().with_seeds(vec![
            Layout::from_letters("a", "abcd"),
            Layout::from_letters("b", "abce"),
        ]),
        Err(KeyEvolveError::Config(_))
    ));
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let evaluator = Evaluator::new(short_window()).unwrap();
    let genetic = GeneticConfig {
        population_size: 2,
        ..small_genetic()
    };
    let res = GeneticOptimizer::new(Arc::new(evaluator), Arc::new(line_keyboard(26)), genetic);
    assert!(matches!(res, Err(KeyEvolveError::Config(_))));
}
